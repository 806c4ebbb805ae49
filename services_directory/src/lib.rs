//! # Directory Service
//!
//! CRUD and navigation API over the Terminal OS file system.
//!
//! ## Operations
//!
//! - `current_directory()` / `set_current_directory(id)`: navigation, silent on
//!   non-directories
//! - `resolve_directory(path)`: shorthand-aware directory lookup
//! - `create_file(name)` / `create_directory(name)`: append to the current
//!   directory with default user permissions
//! - `delete_entity(id)`: remove a direct child of the current directory
//! - `write_file(id, contents)` / `set_permissions(id, set)`: in-place updates
//! - `list(path)`: directory listing

pub mod operations;
pub mod service;

pub use operations::{DirectoryOperations, Listing, ListingEntry, OperationError};
pub use service::DirectoryService;
