//! # Terminal OS Host
//!
//! The host runtime for the Terminal OS shell.
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Boots the file system from the default layout
//! - Runs the shell loop (prompt → line → interpreter → output)
//! - Reads lines from stdin or from a deterministic input script
//! - Presents every command outcome, including the editor, colours,
//!   hardware and network reports and saves
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Decide what a command means (that is `cli_console`)
//! - Mutate the tree except through the directory service
//! - Load saved snapshots back

pub mod input_script;
pub mod providers;
pub mod runtime;
pub mod save;

pub use input_script::{InputScript, InputScriptError, LineSource, ReaderSource};
pub use providers::{hardware_report, network_report, NetworkColumn, NetworkQuery, ProviderError};
pub use runtime::{HostRuntime, HostRuntimeConfig, HostRuntimeError, EDIT_TERMINATOR};
pub use save::{save_snapshot, SaveError, SaveSnapshot};
