//! Entity types
//!
//! A file-system entity is either a file or a directory. Both share identity,
//! naming, a parent link and a permission set; the variant decides whether the
//! entity carries contents or children.

use core_types::{EntityId, PermissionSet};
use serde::{Deserialize, Serialize};

/// Variant-specific entity data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// A file with an optional extension and text contents
    File {
        extension: Option<String>,
        contents: String,
    },
    /// A directory owning an ordered list of child IDs
    Directory { children: Vec<EntityId> },
}

/// A node in the file-system tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier, never reused
    pub id: EntityId,
    /// Display name, without the extension for files
    pub name: String,
    /// Owning directory; `None` only for the root
    pub parent_id: Option<EntityId>,
    /// Permission bits
    pub permissions: PermissionSet,
    /// True only for the single top-level directory
    pub is_root: bool,
    /// File or directory data
    pub kind: EntityKind,
}

impl Entity {
    /// Creates a new file entity
    pub fn file(
        name: impl Into<String>,
        extension: Option<String>,
        contents: impl Into<String>,
        parent_id: EntityId,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            parent_id: Some(parent_id),
            permissions,
            is_root: false,
            kind: EntityKind::File {
                extension,
                contents: contents.into(),
            },
        }
    }

    /// Creates a new, empty directory entity
    pub fn directory(
        name: impl Into<String>,
        parent_id: EntityId,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            parent_id: Some(parent_id),
            permissions,
            is_root: false,
            kind: EntityKind::Directory {
                children: Vec::new(),
            },
        }
    }

    /// Creates the root directory
    pub fn root(permissions: PermissionSet) -> Self {
        Self {
            id: EntityId::new(),
            name: "/".to_string(),
            parent_id: None,
            permissions,
            is_root: true,
            kind: EntityKind::Directory {
                children: Vec::new(),
            },
        }
    }

    /// Returns true for the directory variant
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntityKind::Directory { .. })
    }

    /// Returns true for the file variant
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntityKind::File { .. })
    }

    /// File extension, if any
    pub fn extension(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::File { extension, .. } => extension.as_deref(),
            EntityKind::Directory { .. } => None,
        }
    }

    /// File contents; directories have none
    pub fn contents(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::File { contents, .. } => Some(contents.as_str()),
            EntityKind::Directory { .. } => None,
        }
    }

    /// Child IDs; files have none
    pub fn children(&self) -> &[EntityId] {
        match &self.kind {
            EntityKind::Directory { children } => children,
            EntityKind::File { .. } => &[],
        }
    }

    /// Name including the extension, e.g. `color.conf`
    pub fn full_name(&self) -> String {
        match self.extension() {
            Some(extension) => format!("{}.{}", self.name, extension),
            None => self.name.clone(),
        }
    }

    /// Returns true if `name` matches the full name exactly
    pub fn matches_full_name(&self, name: &str) -> bool {
        match self.extension() {
            Some(extension) => name
                .strip_prefix(self.name.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|rest| rest == extension),
            None => self.name == name,
        }
    }
}

/// Splits a file name on its last `.` into base name and extension
///
/// Multiple dots stay in the base name; no dot means no extension.
pub fn split_file_name(file_name: &str) -> (String, Option<String>) {
    match file_name.rsplit_once('.') {
        Some((name, extension)) => (name.to_string(), Some(extension.to_string())),
        None => (file_name.to_string(), None),
    }
}
