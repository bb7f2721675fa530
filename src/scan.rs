//! Filesystem scanning: walks a content directory and assembles the project.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root = the project
//! ├── config.toml                  # Site configuration (optional)
//! ├── site.yml                     # Project metadata: title, organization
//! ├── Travel/                      # Article
//! │   ├── meta.yml                 # Entry metadata (title, date, topics, ...)
//! │   ├── intro.md                 # Markdown document (optional front matter)
//! │   ├── notes.txt                # Plain text document
//! │   ├── Alps/                    # Sub-article
//! │   │   ├── photo.jpg            # Image
//! │   │   ├── clip.mp4             # Video
//! │   │   └── Day-1/               # Sub-sub-article (deepest level)
//! │   │       └── talk.youtube     # YAML: id (+ optional title)
//! │   └── _drafts/                 # Skipped: leading underscore
//! └── Cooking/
//!     └── bread.md
//! ```
//!
//! ## File Types
//!
//! | Extension | Becomes |
//! |---|---|
//! | `yml`, `yaml` | metadata of the enclosing directory |
//! | `md` | text document, front matter merged into the directory metadata |
//! | `txt` | text document, paragraphs split at blank lines |
//! | `jpg`, `jpeg`, `png` | image |
//! | `mp4`, `mpg` | video |
//! | `youtube` | YouTube embed |
//!
//! Anything else is ignored, as are hidden files and directories starting
//! with `_`. Entries are visited in file-name order.
//!
//! ## Validation
//!
//! The assembler enforces the structure: content files directly in the
//! project root, a fourth directory level, or missing project `title` /
//! `organization` metadata all fail the scan.

use crate::assemble::{ProjectAssembler, ProjectError};
use crate::content::{ContentItem, FileStamp, MediaFile, TextDocument, YoutubeEmbed};
use crate::dates;
use crate::markdown;
use crate::metadata;
use crate::project::Project;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{0}")]
    Project(#[from] ProjectError),
}

const METADATA_EXTENSIONS: &[&str] = &["yml", "yaml"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mpg"];

/// What a file contributes to its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Metadata,
    Markdown,
    PlainText,
    Image,
    Video,
    Youtube,
}

fn file_kind(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let kind = match ext.as_str() {
        e if METADATA_EXTENSIONS.contains(&e) => FileKind::Metadata,
        "md" => FileKind::Markdown,
        "txt" => FileKind::PlainText,
        e if IMAGE_EXTENSIONS.contains(&e) => FileKind::Image,
        e if VIDEO_EXTENSIONS.contains(&e) => FileKind::Video,
        "youtube" => FileKind::Youtube,
        _ => return None,
    };
    Some(kind)
}

fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && name.starts_with('_'))
}

/// Scan `root` and assemble the project it contains.
pub fn scan(root: &Path) -> Result<Project, ScanError> {
    let root_meta = fs::metadata(root)?;
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "content".to_string());
    let root_stamp = file_stamp(&root_meta);
    let mut assembler = ProjectAssembler::new(root_name, root_stamp.created, root_stamp.updated);

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e));

    for entry in walker {
        let entry = entry?;
        let depth = entry.depth();
        // Close every directory that is not an ancestor of this entry.
        while assembler.depth() >= depth {
            assembler.finish_directory()?;
        }

        if entry.file_type().is_dir() {
            let stamp = file_stamp(&entry.metadata()?);
            let name = entry.file_name().to_string_lossy().into_owned();
            assembler.open_directory(name, stamp.created, stamp.updated)?;
        } else if entry.file_type().is_file() {
            load_file(&mut assembler, entry.path())?;
        }
    }

    while assembler.depth() > 0 {
        assembler.finish_directory()?;
    }
    let project = assembler.build_project()?;
    info!(
        articles = project.articles().len(),
        entries = project.entries().len(),
        "scanned {}",
        root.display()
    );
    Ok(project)
}

fn load_file(assembler: &mut ProjectAssembler, path: &Path) -> Result<(), ScanError> {
    let Some(kind) = file_kind(path) else {
        debug!(path = %path.display(), "ignoring file");
        return Ok(());
    };
    let stamp = file_stamp(&fs::metadata(path)?);
    let yaml_error = |source: serde_yaml::Error| ScanError::Yaml {
        path: path.to_path_buf(),
        source,
    };

    match kind {
        FileKind::Metadata => {
            let meta = metadata::parse_yaml(&fs::read_to_string(path)?).map_err(yaml_error)?;
            assembler.found_metadata(&meta)?;
        }
        FileKind::Markdown => {
            let (meta, paragraphs) =
                markdown::parse_document(&fs::read_to_string(path)?).map_err(yaml_error)?;
            // Front matter describes the entry as well as the document.
            assembler.found_metadata(&meta)?;
            assembler.found_content(ContentItem::Text(TextDocument::new(paragraphs, meta, stamp)))?;
        }
        FileKind::PlainText => {
            let paragraphs = markdown::parse_plain_text(&fs::read_to_string(path)?);
            assembler.found_content(ContentItem::Text(TextDocument::new(
                paragraphs,
                metadata::Metadata::new(),
                stamp,
            )))?;
        }
        FileKind::Image => {
            assembler.found_content(ContentItem::Image(MediaFile::new(path, stamp)))?;
        }
        FileKind::Video => {
            assembler.found_content(ContentItem::Video(MediaFile::new(path, stamp)))?;
        }
        FileKind::Youtube => {
            let meta = metadata::parse_yaml(&fs::read_to_string(path)?).map_err(yaml_error)?;
            match meta.get("id").map(str::trim).filter(|id| !id.is_empty()) {
                Some(id) => assembler.found_content(ContentItem::Youtube(YoutubeEmbed {
                    video_id: id.to_string(),
                    title: meta.get("title").map(str::to_string),
                    stamp,
                }))?,
                None => warn!(path = %path.display(), "youtube file has no 'id', skipping"),
            }
        }
    }
    Ok(())
}

fn file_stamp(meta: &fs::Metadata) -> FileStamp {
    let modified = meta.modified().ok();
    let created = meta.created().ok().or(modified);
    let updated = modified.map(dates::from_system_time).unwrap_or_else(dates::now);
    FileStamp {
        created: created.map(dates::from_system_time).unwrap_or(updated),
        updated,
        size: if meta.is_file() { meta.len() } else { 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKey;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn project_root() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "site.yml", "title: Site\norganization: Org\n");
        tmp
    }

    fn names(project: &Project) -> Vec<&str> {
        project.entries().iter().map(|e| e.name()).collect()
    }

    // =========================================================================
    // File kinds
    // =========================================================================

    #[test]
    fn file_kinds_by_extension() {
        assert_eq!(file_kind(Path::new("a.yml")), Some(FileKind::Metadata));
        assert_eq!(file_kind(Path::new("a.YAML")), Some(FileKind::Metadata));
        assert_eq!(file_kind(Path::new("a.md")), Some(FileKind::Markdown));
        assert_eq!(file_kind(Path::new("a.txt")), Some(FileKind::PlainText));
        assert_eq!(file_kind(Path::new("a.JPG")), Some(FileKind::Image));
        assert_eq!(file_kind(Path::new("a.png")), Some(FileKind::Image));
        assert_eq!(file_kind(Path::new("a.mpg")), Some(FileKind::Video));
        assert_eq!(file_kind(Path::new("a.youtube")), Some(FileKind::Youtube));
        assert_eq!(file_kind(Path::new("config.toml")), None);
        assert_eq!(file_kind(Path::new("README")), None);
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    #[test]
    fn scan_builds_nested_entries() {
        let tmp = project_root();
        write(tmp.path(), "Travel/intro.md", "# Travel Log\n\nWe went places.\n");
        write(tmp.path(), "Travel/Alps/notes.txt", "cold\n");
        write(tmp.path(), "Travel/Alps/Day 1/photo.jpg", "jpg");
        write(tmp.path(), "Cooking/bread.md", "Flour.\n");

        let project = scan(tmp.path()).unwrap();
        assert_eq!(project.title(), "Site");
        assert_eq!(project.organization(), "Org");
        assert_eq!(names(&project), vec!["Cooking", "Travel", "Alps", "Day 1"]);
        assert_eq!(project.articles()[1].title(), "Travel Log");

        let day = project
            .entry(&EntryKey::from_indices(vec![1, 0, 0]))
            .unwrap();
        assert_eq!(day.content().len(), 1);
        assert_eq!(day.content()[0].kind(), "image");
        assert_eq!(day.content()[0].size(), 3);
    }

    #[test]
    fn files_after_subdirectory_stay_with_parent() {
        let tmp = project_root();
        write(tmp.path(), "A/B/inner.txt", "inner\n");
        write(tmp.path(), "A/zz.txt", "outer\n");
        let project = scan(tmp.path()).unwrap();
        let a = &project.articles()[0];
        assert_eq!(a.content().len(), 1);
        assert_eq!(a.children()[0].content().len(), 1);
    }

    #[test]
    fn skips_underscore_dirs_and_hidden_files() {
        let tmp = project_root();
        write(tmp.path(), "A/text.txt", "a\n");
        write(tmp.path(), "A/_drafts/draft.md", "draft\n");
        write(tmp.path(), "A/.hidden.md", "hidden\n");
        write(tmp.path(), "_templates/x.md", "x\n");
        let project = scan(tmp.path()).unwrap();
        assert_eq!(names(&project), vec!["A"]);
        assert_eq!(project.articles()[0].content().len(), 1);
    }

    // =========================================================================
    // Metadata and topics
    // =========================================================================

    #[test]
    fn yaml_and_front_matter_merge_into_entry() {
        let tmp = project_root();
        write(tmp.path(), "A/a.yml", "title: From YAML\ntopics: [x, y]\n");
        write(tmp.path(), "A/b.md", "---\ndate: 2024-02-03\n---\nBody\n");
        let project = scan(tmp.path()).unwrap();
        let a = &project.articles()[0];
        assert_eq!(a.title(), "From YAML");
        assert_eq!(a.metadata().get("date"), Some("2024-02-03"));
        assert_eq!(project.all_topics().len(), 2);
    }

    #[test]
    fn deep_topic_visible_at_article() {
        let tmp = project_root();
        write(tmp.path(), "A/B/C/meta.yml", "topics: deep\n");
        let project = scan(tmp.path()).unwrap();
        let topics = project.topics(&EntryKey::root(0));
        assert_eq!(
            topics.iter().map(|t| t.name()).collect::<Vec<_>>(),
            vec!["deep"]
        );
    }

    // =========================================================================
    // YouTube
    // =========================================================================

    #[test]
    fn youtube_with_id_and_title() {
        let tmp = project_root();
        write(tmp.path(), "A/talk.youtube", "id: abc123\ntitle: My Talk\n");
        let project = scan(tmp.path()).unwrap();
        let a = &project.articles()[0];
        assert_eq!(a.content()[0].kind(), "youtube");
        assert_eq!(a.title(), "My Talk");
    }

    #[test]
    fn youtube_without_id_skipped() {
        let tmp = project_root();
        write(tmp.path(), "A/talk.youtube", "title: No Id\n");
        let project = scan(tmp.path()).unwrap();
        assert!(project.articles()[0].content().is_empty());
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn loose_content_in_root_fails() {
        let tmp = project_root();
        write(tmp.path(), "loose.jpg", "jpg");
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::Project(ProjectError::ContentInProject)));
    }

    #[test]
    fn config_file_in_root_is_fine() {
        let tmp = project_root();
        write(tmp.path(), "config.toml", "[articles]\n");
        assert!(scan(tmp.path()).is_ok());
    }

    #[test]
    fn fourth_level_fails() {
        let tmp = project_root();
        write(tmp.path(), "A/B/C/D/x.txt", "x\n");
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::Project(ProjectError::TooDeep(_))));
    }

    #[test]
    fn missing_project_metadata_fails() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "site.yml", "title: Only Title\n");
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            ScanError::Project(ProjectError::MissingOrganization)
        ));
    }

    #[test]
    fn invalid_yaml_names_file() {
        let tmp = project_root();
        write(tmp.path(), "A/bad.yml", "title: [oops\n");
        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("bad.yml"));
    }
}
