//! # CLI Console
//!
//! The Terminal OS command interpreter.
//!
//! Input lines are tokenized, classified against a fixed alias table and
//! routed to a single handler that works against a
//! [`services_directory::DirectoryService`]. The result is always a
//! [`CommandOutcome`]; presentation is left to the host.

pub mod commands;
pub mod help;
pub mod interpreter;
pub mod listing;
pub mod outcome;

pub use commands::{CommandParser, ParsedInput, UserCommand};
pub use help::render_help;
pub use interpreter::{Clock, CommandInterpreter, FixedClock, SystemClock};
pub use listing::render_listing;
pub use outcome::CommandOutcome;
