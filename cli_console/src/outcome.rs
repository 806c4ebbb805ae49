//! Command outcomes
//!
//! The interpreter never prints or signals anything itself. Each input line
//! produces exactly one [`CommandOutcome`] and the host decides how to
//! present it.

use core_types::EntityId;

/// Result of executing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Show this text
    Message(String),
    /// Nothing to show
    Silent,
    /// Render a listing of `path`, or of the current directory
    ListDirectory { path: Option<String> },
    /// Open the editor on a file
    EditFile { file_id: EntityId },
    /// Switch the output colour
    ChangeColor { name: String, hex: String },
    /// Show the hardware descriptors
    ListHardware,
    /// Show network information filtered by `args`
    Network { args: Vec<String> },
    /// Persist the terminal state
    Save,
    /// Leave the shell
    Exit,
}

impl CommandOutcome {
    /// Builds a [`CommandOutcome::Message`]
    pub fn message(text: impl Into<String>) -> Self {
        CommandOutcome::Message(text.into())
    }
}
