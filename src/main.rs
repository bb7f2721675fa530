use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use treepress::output::{self, ListOptions};
use treepress::sort::ArticleSort;
use treepress::{config, render, scan, site};

#[derive(Parser)]
#[command(name = "treepress")]
#[command(about = "Static site generator for three-level article trees")]
#[command(long_about = "\
Static site generator for three-level article trees

Your filesystem is the data source. Top-level directories become articles,
their subdirectories sub-articles, and one level below that sub-sub-articles.
Markdown, text, images, videos and YouTube references inside a directory are
that article's content.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── site.yml                     # Project metadata: title, organization (required)
  ├── Travel/                      # Article
  │   ├── meta.yml                 # title, date, topics
  │   ├── intro.md                 # Text (front matter merges into metadata)
  │   ├── peak.jpg                 # Image, copied next to the article page
  │   └── Alps/                    # Sub-article
  │       ├── talk.youtube         # YAML: id, title
  │       └── Day 1/               # Sub-sub-article (no deeper levels)
  │           └── notes.txt
  └── _drafts/                     # Leading underscore = skipped

Topics declared anywhere in a subtree show up on every ancestor.

Run 'treepress gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Article order, overriding `articles.sort` in config.toml
    #[arg(long, value_enum, global = true)]
    sort: Option<ArticleSort>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan, plan and write the HTML site
    Build,
    /// Validate the content directory without building
    Check,
    /// Show the article tree
    List {
        /// Include sub-articles
        #[arg(long)]
        all: bool,
        /// Show topics per article and the topic list
        #[arg(long)]
        topics: bool,
        /// Show the total content size
        #[arg(long)]
        size: bool,
    },
    /// Print the page plan as JSON
    Plan,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            println!("==> Scanning {}", cli.source.display());
            let project = scan::scan(&cli.source)?;

            let engine = render::HtmlEngine::new(&config.colors);
            let generator =
                site::SiteGenerator::new(&project, &engine, config.article_order(cli.sort));
            let plan = generator.plan()?;

            if config.output.clean {
                site::clean_output_dir(&cli.output)?;
            }
            println!("==> Writing {}", cli.output.display());
            let summary = plan.write(&engine, &cli.output)?;
            output::print_build_output(&plan, &summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            match scan::scan(&cli.source) {
                Ok(project) => output::print_check_output(&project),
                Err(scan::ScanError::Project(err)) if err.is_format_error() => {
                    println!("==> Invalid content: {err}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::List { all, topics, size } => {
            let config = config::load_config(&cli.source)?;
            let project = scan::scan(&cli.source)?;
            let order = config.article_order(cli.sort);
            output::print_article_tree(&project, &order, ListOptions { all, topics });
            if topics {
                println!();
                output::print_topics(&project);
            }
            if size {
                println!();
                println!("{}", output::format_total_size(&project));
            }
        }
        Command::Plan => {
            let config = config::load_config(&cli.source)?;
            let project = scan::scan(&cli.source)?;
            let engine = render::HtmlEngine::new(&config.colors);
            let plan = site::SiteGenerator::new(&project, &engine, config.article_order(cli.sort))
                .plan()?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "treepress=debug" } else { "treepress=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
