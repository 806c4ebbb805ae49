//! # File-System Tree
//!
//! In-memory hierarchical file system for Terminal OS.
//!
//! ## Design
//!
//! - The [`FileSystem`] is the sole owner of every [`Entity`], held in an
//!   arena keyed by [`core_types::EntityId`]
//! - Parent links are plain IDs, resolved by lookup
//! - Files and directories are variants of one tagged type, so a file can
//!   never own children
//! - Path resolution walks one segment at a time; the first matching child
//!   wins when names collide

pub mod bootstrap;
pub mod entity;
pub mod path;
pub mod programs;
pub mod tree;

pub use bootstrap::bootstrap;
pub use entity::{split_file_name, Entity, EntityKind};
pub use path::{PathResolver, PathTarget, HOME_PATH, SEPARATOR};
pub use programs::{parse_help, Program, PROGRAMS};
pub use tree::{FileSystem, TreeError};
