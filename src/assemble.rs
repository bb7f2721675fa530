//! Builds a [`Project`] from a depth-first stream of directory events.
//!
//! The scanner (or a test) drives the assembler with calls mirroring a walk
//! of the content tree:
//!
//! ```text
//! ProjectAssembler::new("content", ..)     root accumulator (depth 0)
//!   found_metadata({title, organization})
//!   open_directory("Travel", ..)           depth 1 → article
//!     found_content(index.md)
//!     open_directory("Alps", ..)           depth 2 → sub-article
//!       found_metadata({topics: hiking})
//!     finish_directory()                   Alps built, attached to Travel
//!   finish_directory()                     Travel built, attached to root
//! build_project()
//! ```
//!
//! Each open directory is an accumulator on a stack. Finishing a directory
//! pops it, builds the [`Entry`] for its rank, registers the topics it
//! declares and appends it to the parent's children. The root accumulator
//! only takes metadata and child entries.

use crate::content::ContentItem;
use crate::dates::Timestamp;
use crate::entry::{Entry, EntryKey, EntryParts, Rank};
use crate::metadata::Metadata;
use crate::project::{Project, TopicIndex};
use crate::topic::Topic;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Project metadata has no 'title'")]
    MissingTitle,
    #[error("Project metadata has no 'organization'")]
    MissingOrganization,
    #[error("Project may not contain content directly; move it into an article directory")]
    ContentInProject,
    #[error("Directory nested too deeply (at most 3 levels below the project): {0}")]
    TooDeep(String),
    #[error("finish_directory called with no open directory")]
    NoOpenDirectory,
    #[error("build_project called with {0} directories still open")]
    DirectoriesStillOpen(usize),
    #[error("Entry {child} is not keyed below its parent {parent}")]
    MisplacedChild { parent: String, child: String },
}

impl ProjectError {
    /// True for errors caused by the content itself, false for misuse of the
    /// assembler by its caller.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ProjectError::MissingTitle
                | ProjectError::MissingOrganization
                | ProjectError::ContentInProject
                | ProjectError::TooDeep(_)
        )
    }
}

#[derive(Debug)]
struct DirectoryAccumulator {
    name: String,
    created: Timestamp,
    updated: Timestamp,
    metadata: Metadata,
    content: Vec<ContentItem>,
    children: Vec<Entry>,
    /// Index of this directory among its parent's children.
    position: usize,
}

impl DirectoryAccumulator {
    fn new(name: String, created: Timestamp, updated: Timestamp, position: usize) -> Self {
        Self {
            name,
            created,
            updated,
            metadata: Metadata::new(),
            content: Vec::new(),
            children: Vec::new(),
            position,
        }
    }
}

/// Stack-based builder for a [`Project`].
#[derive(Debug)]
pub struct ProjectAssembler {
    stack: Vec<DirectoryAccumulator>,
    topics: TopicIndex,
}

impl ProjectAssembler {
    /// Start a project rooted at a directory called `name`.
    pub fn new(name: impl Into<String>, created: Timestamp, updated: Timestamp) -> Self {
        Self {
            stack: vec![DirectoryAccumulator::new(name.into(), created, updated, 0)],
            topics: TopicIndex::new(),
        }
    }

    /// Number of entry directories currently open (0 = only the root).
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// Enter a subdirectory of the current directory.
    pub fn open_directory(
        &mut self,
        name: impl Into<String>,
        created: Timestamp,
        updated: Timestamp,
    ) -> Result<(), ProjectError> {
        let name = name.into();
        let parent = self.stack.last().ok_or(ProjectError::NoOpenDirectory)?;
        if Rank::new(self.depth()).is_none() {
            return Err(ProjectError::TooDeep(name));
        }
        let position = parent.children.len();
        debug!(directory = %name, depth = self.depth() + 1, "open");
        self.stack
            .push(DirectoryAccumulator::new(name, created, updated, position));
        Ok(())
    }

    /// Merge metadata into the current directory; later values win.
    pub fn found_metadata(&mut self, metadata: &Metadata) -> Result<(), ProjectError> {
        let current = self.stack.last_mut().ok_or(ProjectError::NoOpenDirectory)?;
        current.metadata = current.metadata.concat(metadata);
        Ok(())
    }

    /// Attach a content item to the current directory.
    pub fn found_content(&mut self, item: ContentItem) -> Result<(), ProjectError> {
        if self.stack.len() <= 1 {
            return Err(ProjectError::ContentInProject);
        }
        let current = self.stack.last_mut().ok_or(ProjectError::NoOpenDirectory)?;
        current.content.push(item);
        Ok(())
    }

    /// Close the current directory and attach its entry to the parent.
    pub fn finish_directory(&mut self) -> Result<(), ProjectError> {
        if self.stack.len() <= 1 {
            return Err(ProjectError::NoOpenDirectory);
        }
        let acc = self.stack.pop().ok_or(ProjectError::NoOpenDirectory)?;

        let mut indices: Vec<usize> = self.stack[1..].iter().map(|a| a.position).collect();
        indices.push(acc.position);
        let key = EntryKey::from_indices(indices);

        let topics = Topic::from_metadata(&acc.metadata);
        let entry = Entry::new(EntryParts {
            key: key.clone(),
            name: acc.name,
            created: acc.created,
            updated: acc.updated,
            metadata: acc.metadata,
            content: acc.content,
            children: acc.children,
        })?;
        debug!(entry = %entry.title(), key = %key, rank = %entry.rank(), "finished");
        self.topics.register(key, topics);

        let parent = self.stack.last_mut().ok_or(ProjectError::NoOpenDirectory)?;
        parent.children.push(entry);
        Ok(())
    }

    /// Finish assembly. Valid only once every opened directory is finished.
    pub fn build_project(mut self) -> Result<Project, ProjectError> {
        if self.stack.len() > 1 {
            return Err(ProjectError::DirectoriesStillOpen(self.stack.len() - 1));
        }
        let root = self.stack.pop().ok_or(ProjectError::NoOpenDirectory)?;
        let title = root
            .metadata
            .get("title")
            .ok_or(ProjectError::MissingTitle)?
            .to_string();
        let organization = root
            .metadata
            .get("organization")
            .ok_or(ProjectError::MissingOrganization)?
            .to_string();
        debug!(articles = root.children.len(), "project assembled");
        Ok(Project::new(
            title,
            organization,
            root.metadata,
            root.children,
            self.topics,
        ))
    }
}
