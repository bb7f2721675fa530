//! Canonical paths and addressing.
//!
//! Every page lives at a canonical path that starts and ends with `/`:
//!
//! | Page | Path |
//! |---|---|
//! | Home | `/` |
//! | Article list, page k+1 | `/articles/`, `/articles/2/`, ... |
//! | Topic list | `/topics/`, `/topics/2/`, ... |
//! | Topic page | `/topics/{topic-id}/`, `/topics/{topic-id}/2/`, ... |
//! | Entry | `/p/{article-id}/{sub-id}/{sub-sub-id}/` |
//!
//! These prefixes are part of the public link structure and do not change.
//! A page is written to `{path}index.html` under the output directory, and
//! links between pages are relative, computed from path depth alone.

use crate::types::SiteUrl;
use std::path::{Path, PathBuf};

pub const HOME: &str = "/";
pub const ARTICLES: &str = "/articles/";
pub const TOPICS: &str = "/topics/";
pub const ENTRY: &str = "/p/";
pub const INDEX_FILE: &str = "index.html";

/// Canonical path of an entry from the ids of its ancestors, root first,
/// ending with the entry's own id.
pub fn entry_path<S: AsRef<str>>(ids: &[S]) -> String {
    let mut path = String::from(ENTRY);
    for id in ids {
        path.push_str(id.as_ref());
        path.push('/');
    }
    path
}

pub fn topic_path(id: &str) -> String {
    format!("{TOPICS}{id}/")
}

/// Path of page `index` (zero-based) of a paginated listing at `base`.
/// The first page keeps the base path; page k is `{base}{k+1}/`.
pub fn paginated_path(base: &str, index: usize) -> String {
    if index == 0 {
        base.to_string()
    } else {
        format!("{base}{}/", index + 1)
    }
}

/// Relative path from the page at `path` back to the site root.
///
/// Depth is the number of `/` in the path: depth 1 is `.`, depth N is
/// N−1 parent references.
///
/// ```text
/// "/"               → "."
/// "/articles/"      → ".."
/// "/p/a/b/"         → "../../.."
/// ```
pub fn rel_path(path: &str) -> String {
    let depth = path.matches('/').count();
    if depth <= 1 {
        ".".to_string()
    } else {
        vec![".."; depth - 1].join("/")
    }
}

/// The URL of a canonical path: the path plus the index file name.
pub fn url(path: &str) -> SiteUrl {
    SiteUrl::new(format!("{path}{INDEX_FILE}"))
}

/// Directory on disk that holds the page at `path`.
pub fn output_dir(out_dir: &Path, path: &str) -> PathBuf {
    path.split('/')
        .filter(|part| !part.is_empty())
        .fold(out_dir.to_path_buf(), |dir, part| dir.join(part))
}

/// File on disk for the page at `path`.
pub fn output_location(out_dir: &Path, path: &str) -> PathBuf {
    output_dir(out_dir, path).join(INDEX_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_paths_nest_ids() {
        assert_eq!(entry_path(&["travel"]), "/p/travel/");
        assert_eq!(entry_path(&["travel", "alps", "day_1"]), "/p/travel/alps/day_1/");
    }

    #[test]
    fn topic_paths() {
        assert_eq!(topic_path("rust"), "/topics/rust/");
    }

    #[test]
    fn paginated_paths() {
        assert_eq!(paginated_path(ARTICLES, 0), "/articles/");
        assert_eq!(paginated_path(ARTICLES, 1), "/articles/2/");
        assert_eq!(paginated_path("/topics/rust/", 4), "/topics/rust/5/");
    }

    #[test]
    fn rel_path_by_depth() {
        assert_eq!(rel_path(HOME), ".");
        assert_eq!(rel_path(ARTICLES), "..");
        assert_eq!(rel_path("/a/b/"), "../..");
        assert_eq!(rel_path("/p/a/b/c/"), "../../../..");
    }

    #[test]
    fn url_appends_index_file() {
        assert_eq!(url("/p/x/").as_str(), "/p/x/index.html");
        assert_eq!(url(HOME).as_str(), "/index.html");
    }

    #[test]
    fn output_locations() {
        let out = Path::new("/site");
        assert_eq!(output_location(out, HOME), PathBuf::from("/site/index.html"));
        assert_eq!(
            output_location(out, "/p/a/b/"),
            PathBuf::from("/site/p/a/b/index.html")
        );
        assert_eq!(output_dir(out, "/topics/"), PathBuf::from("/site/topics"));
    }
}
