//! The validated book model.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;
use walkdir::WalkDir;

use crate::descriptor::BookDescriptor;

/// Descriptor file name, relative to the book root.
pub const CONFIG_FILE: &str = "dokapi.json";

/// Directory holding content pages, relative to the book root.
pub const CONTENT_DIR: &str = "content";

/// A book whose descriptor passed validation.
///
/// Every referenced content file, template and the assets directory existed
/// when the book was parsed. The model is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    root: PathBuf,
    descriptor: BookDescriptor,
    raw: Value,
    referenced_files: Vec<PathBuf>,
}

/// An index entry flattened out of the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef<'a> {
    /// 0 for top-level entries, 1 for children
    pub depth: usize,
    pub name: &'a str,
    pub key: Option<&'a str>,
    pub content: Option<&'a str>,
    pub hidden: bool,
}

impl Book {
    pub fn new(
        root: PathBuf,
        descriptor: BookDescriptor,
        raw: Value,
        referenced_files: Vec<PathBuf>,
    ) -> Self {
        Self {
            root,
            descriptor,
            raw,
            referenced_files,
        }
    }

    /// Absolute book root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor(&self) -> &BookDescriptor {
        &self.descriptor
    }

    /// The descriptor exactly as parsed.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Absolute paths of every content file, main page first, then the
    /// index in order with children after their parent's own page.
    pub fn referenced_files(&self) -> &[PathBuf] {
        &self.referenced_files
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(CONTENT_DIR)
    }

    pub fn site_template_path(&self) -> PathBuf {
        self.root.join(&self.descriptor.site_template)
    }

    pub fn page_template_path(&self) -> PathBuf {
        self.root.join(&self.descriptor.page_template)
    }

    pub fn assets_path(&self) -> PathBuf {
        self.root.join(&self.descriptor.assets)
    }

    /// The table of contents, depth first.
    pub fn entries(&self) -> Vec<EntryRef<'_>> {
        let mut entries = Vec::new();
        for entry in &self.descriptor.index {
            entries.push(EntryRef {
                depth: 0,
                name: &entry.name,
                key: entry.key.as_deref(),
                content: entry.content.as_deref(),
                hidden: entry.is_hidden(),
            });
            for child in entry.children() {
                entries.push(EntryRef {
                    depth: 1,
                    name: &child.name,
                    key: child.key.as_deref(),
                    content: Some(&child.content),
                    hidden: entry.is_hidden(),
                });
            }
        }
        entries
    }

    /// Markdown files under the content directory that no entry refers to.
    pub fn unreferenced_content_files(&self) -> Vec<PathBuf> {
        let referenced: HashSet<&Path> = self.referenced_files.iter().map(PathBuf::as_path).collect();

        let mut orphans: Vec<PathBuf> = WalkDir::new(self.content_dir())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "md"))
            .filter(|path| !referenced.contains(path.as_path()))
            .collect();
        orphans.sort();

        debug!("{} unreferenced content files in {}", orphans.len(), self.name());
        orphans
    }
}
