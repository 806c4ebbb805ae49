//! # Core Types
//!
//! This crate defines the fundamental types shared by every Terminal OS crate.
//!
//! ## Key Types
//!
//! - [`EntityId`]: Unique identifier for files and directories
//! - [`Permission`]: A single admin/user read/write/execute bit
//! - [`PermissionSet`]: An unordered set of permission bits with a fixed
//!   six-character display order

pub mod ids;
pub mod permission;

pub use ids::EntityId;
pub use permission::{Permission, PermissionError, PermissionSet};
