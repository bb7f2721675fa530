//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── site.yml
//! └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [articles]
//! sort = "title"            # published-first | published-last | title | edited | pinned
//! pinned = []               # Titles listed first when sort = "pinned"
//!
//! [output]
//! clean = false             # Empty the output directory before writing
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"    # Dates, breadcrumbs, footer
//! border = "#e0e0e0"
//! link = "#1a4d8f"
//! link_hover = "#000000"
//!
//! [colors.dark]
//! background = "#101214"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#8ab4f8"
//! link_hover = "#ffffff"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [articles]
//! sort = "published-first"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::sort::{ArticleOrder, ArticleSort};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// File name of the configuration inside the content root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Article ordering in listings.
    pub articles: ArticlesConfig,
    /// Output directory handling.
    pub output: OutputConfig,
    /// Color overrides for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.articles.pinned.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "articles.pinned must not contain empty titles".into(),
            ));
        }
        for (mode, palette) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if let Some(field) = palette.first_blank() {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode}.{field} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// The article order for this site, with `sort` overriding the configured mode.
    pub fn article_order(&self, sort: Option<ArticleSort>) -> ArticleOrder {
        ArticleOrder::new(sort.unwrap_or(self.articles.sort))
            .with_pinned(self.articles.pinned.iter().cloned())
    }
}

/// Article ordering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArticlesConfig {
    /// Sort mode for the home page and every article listing.
    pub sort: ArticleSort,
    /// Titles of articles that sort first under `sort = "pinned"`.
    pub pinned: Vec<String>,
}

/// Output directory settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Remove everything in the output directory before writing.
    pub clean: bool,
}

/// Palette slots: config key and the CSS custom property it sets.
const SLOTS: [(&str, &str); 6] = [
    ("background", "--color-bg"),
    ("text", "--color-text"),
    ("text_muted", "--color-text-muted"),
    ("border", "--color-border"),
    ("link", "--color-link"),
    ("link_hover", "--color-link-hover"),
];

/// Built-in light palette, in [`SLOTS`] order.
const LIGHT: [&str; 6] = ["#ffffff", "#111111", "#666666", "#e0e0e0", "#1a4d8f", "#000000"];

/// Built-in dark palette, in [`SLOTS`] order.
const DARK: [&str; 6] = ["#101214", "#eeeeee", "#999999", "#333333", "#8ab4f8", "#ffffff"];

/// Color overrides for light and dark modes.
///
/// Each mode starts from its built-in palette; a `[colors.dark]` table that
/// sets only `link` keeps every other dark default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: Palette,
    pub dark: Palette,
}

/// Colors set for one mode. Unset slots use the built-in palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Dates, breadcrumbs, footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_muted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_hover: Option<String>,
}

impl Palette {
    /// Overrides in [`SLOTS`] order.
    fn overrides(&self) -> [Option<&str>; 6] {
        [
            self.background.as_deref(),
            self.text.as_deref(),
            self.text_muted.as_deref(),
            self.border.as_deref(),
            self.link.as_deref(),
            self.link_hover.as_deref(),
        ]
    }

    /// Config key of the first slot set to a blank value.
    fn first_blank(&self) -> Option<&'static str> {
        SLOTS
            .iter()
            .zip(self.overrides())
            .find(|(_, value)| value.is_some_and(|v| v.trim().is_empty()))
            .map(|((key, _), _)| *key)
    }

    /// `--color-*` declarations, one per line, overrides applied to `base`.
    fn declarations(&self, base: &[&str; 6], indent: &str) -> String {
        SLOTS
            .iter()
            .zip(self.overrides())
            .zip(base)
            .map(|(((_, property), value), fallback)| {
                format!("{indent}{property}: {};\n", value.unwrap_or(*fallback))
            })
            .collect()
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file yields the defaults. Unknown keys and invalid values are
/// errors.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(SiteConfig::default());
    }
    parse_config(&fs::read_to_string(&config_path)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Treepress Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root next to the project metadata.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Article ordering
# ---------------------------------------------------------------------------
[articles]
# How the home page and article listings are ordered:
#   "published-first"  newest published date first
#   "published-last"   oldest published date first
#   "title"            by title
#   "edited"           least recently edited first
#   "pinned"           articles listed in `pinned` first, then by title
# Every mode falls back to the title on ties.
sort = "title"

# Titles of pinned articles (only used with sort = "pinned").
pinned = []

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Remove everything in the output directory before writing the site.
clean = false

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Dates, breadcrumbs, footer
border = "#e0e0e0"
link = "#1a4d8f"
link_hover = "#000000"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#101214"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#8ab4f8"
link_hover = "#ffffff"
"##
}

/// CSS custom properties for both modes; dark applies under
/// `prefers-color-scheme: dark`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{}}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}    }}\n}}\n",
        colors.light.declarations(&LIGHT, "    "),
        colors.dark.declarations(&DARK, "        "),
    )
}
