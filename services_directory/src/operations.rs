//! Directory operations
//!
//! This module defines the operations provided by the directory service.

use core_types::{EntityId, PermissionSet};
use fs_tree::TreeError;
use thiserror::Error;

/// Errors that can occur during directory operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperationError {
    /// Structural tree error
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Name or path does not resolve
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resolved, but not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Required permission bit is missing
    #[error("Insufficient permission: {0}")]
    InsufficientPermission(String),

    /// Create or delete called without a name
    #[error("Empty name")]
    EmptyName,

    /// Name cannot be used for an entry
    #[error("Invalid name: {0}")]
    InvalidName(String),
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Entity ID
    pub id: EntityId,
    /// Full name including any extension
    pub name: String,
    /// True for directories
    pub is_directory: bool,
    /// Permission bits
    pub permissions: PermissionSet,
}

/// Contents of one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Absolute path of the listed directory
    pub path: String,
    /// Children in directory order
    pub entries: Vec<ListingEntry>,
}

/// Mutating and listing operations over the current directory
///
/// Permission checks on the current directory are the caller's job; these
/// operations only validate names and structure.
pub trait DirectoryOperations {
    /// Creates a file in the current directory
    ///
    /// The name is split on its last `.` into base name and extension. The
    /// new file gets the default user permissions.
    fn create_file(&mut self, name: &str) -> Result<EntityId, OperationError>;

    /// Creates an empty directory in the current directory
    fn create_directory(&mut self, name: &str) -> Result<EntityId, OperationError>;

    /// Deletes `id` if it is a direct child of the current directory
    ///
    /// Returns `Ok(false)` and changes nothing otherwise. A deleted
    /// directory takes its whole subtree with it.
    fn delete_entity(&mut self, id: EntityId) -> Result<bool, OperationError>;

    /// Replaces a file's contents
    fn write_file(&mut self, id: EntityId, contents: &str) -> Result<(), OperationError>;

    /// Replaces an entity's permission set
    fn set_permissions(&mut self, id: EntityId, permissions: PermissionSet) -> Result<(), OperationError>;

    /// Lists a directory, or the current directory if `path` is `None`
    ///
    /// Requires user read on the listed directory.
    fn list(&self, path: Option<&str>) -> Result<Listing, OperationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_conversion() {
        let id = EntityId::new();
        let error: OperationError = TreeError::NotFound(id).into();
        assert!(matches!(error, OperationError::Tree(TreeError::NotFound(_))));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(OperationError::EmptyName.to_string(), "Empty name");
        assert_eq!(
            OperationError::NotFound("docs".to_string()).to_string(),
            "Not found: docs"
        );
    }
}
