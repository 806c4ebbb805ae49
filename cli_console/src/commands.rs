//! # User Commands
//!
//! The closed set of commands the interpreter understands.
//!
//! ## Command Set
//!
//! - `exit`, `save`, `help [topic]`, `commands`, `color <name>`
//! - `ls [path]`, `cd <path>`, `vw <file>`, `mf <file>`, `md <dir>`, `edit <file>`
//! - `vp <name>`, `chp <name> <bits>`, `df <file>`, `dd <dir> [-r]`
//! - `lhw`, `net [flags]`, `date`, `time`, `now`
//!
//! Command names are matched case-insensitively. Arguments are plain
//! whitespace-delimited tokens with no quoting.

use std::fmt;

/// A recognised command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserCommand {
    Exit,
    Help,
    Color,
    Save,
    Commands,
    ListDirectory,
    ChangeDirectory,
    ViewFile,
    MakeFile,
    MakeDirectory,
    EditFile,
    ListHardware,
    ViewPermissions,
    ChangePermissions,
    Date,
    Time,
    Now,
    Network,
    DeleteFile,
    DeleteDirectory,
    /// Matched no alias
    Unknown,
}

impl UserCommand {
    /// Every known command, in catalog order
    pub const ALL: [UserCommand; 20] = [
        UserCommand::Exit,
        UserCommand::Help,
        UserCommand::Color,
        UserCommand::Save,
        UserCommand::Commands,
        UserCommand::ListDirectory,
        UserCommand::ChangeDirectory,
        UserCommand::ViewFile,
        UserCommand::MakeFile,
        UserCommand::MakeDirectory,
        UserCommand::EditFile,
        UserCommand::ListHardware,
        UserCommand::ViewPermissions,
        UserCommand::ChangePermissions,
        UserCommand::Date,
        UserCommand::Time,
        UserCommand::Now,
        UserCommand::Network,
        UserCommand::DeleteFile,
        UserCommand::DeleteDirectory,
    ];

    /// Classifies a command token
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "exit" => UserCommand::Exit,
            "help" => UserCommand::Help,
            "color" => UserCommand::Color,
            "save" => UserCommand::Save,
            "commands" => UserCommand::Commands,
            "ls" | "list" => UserCommand::ListDirectory,
            "cd" | "change" | "changedir" => UserCommand::ChangeDirectory,
            "vw" | "view" => UserCommand::ViewFile,
            "mf" | "makefile" => UserCommand::MakeFile,
            "md" | "makedir" | "makedirectory" => UserCommand::MakeDirectory,
            "edit" => UserCommand::EditFile,
            "lhw" | "listhardware" => UserCommand::ListHardware,
            "vp" | "viewperm" | "viewpermissions" => UserCommand::ViewPermissions,
            "chp" | "changeperm" | "changepermissions" => UserCommand::ChangePermissions,
            "date" => UserCommand::Date,
            "time" => UserCommand::Time,
            "now" | "dt" | "datetime" | "current" => UserCommand::Now,
            "net" | "network" => UserCommand::Network,
            "df" | "deletefile" => UserCommand::DeleteFile,
            "dd" | "deletedirectory" => UserCommand::DeleteDirectory,
            _ => UserCommand::Unknown,
        }
    }

    /// Name of the program file holding this command's help
    pub fn program_name(self) -> Option<&'static str> {
        let name = match self {
            UserCommand::Exit => "exit",
            UserCommand::Help => "help",
            UserCommand::Color => "color",
            UserCommand::Save => "save",
            UserCommand::Commands => "commands",
            UserCommand::ListDirectory => "list",
            UserCommand::ChangeDirectory => "change",
            UserCommand::ViewFile => "view",
            UserCommand::MakeFile => "makefile",
            UserCommand::MakeDirectory => "makedirectory",
            UserCommand::EditFile => "edit",
            UserCommand::ListHardware => "listhardware",
            UserCommand::ViewPermissions => "viewpermissions",
            UserCommand::ChangePermissions => "changepermissions",
            UserCommand::Date => "date",
            UserCommand::Time => "time",
            UserCommand::Now => "now",
            UserCommand::Network => "network",
            UserCommand::DeleteFile => "deletefile",
            UserCommand::DeleteDirectory => "deletedirectory",
            UserCommand::Unknown => return None,
        };
        Some(name)
    }

    /// Returns true if the command is meaningless without an argument
    ///
    /// Such a command given alone shows its help instead of running.
    pub fn requires_argument(self) -> bool {
        matches!(
            self,
            UserCommand::Color
                | UserCommand::ChangeDirectory
                | UserCommand::ViewFile
                | UserCommand::MakeFile
                | UserCommand::MakeDirectory
                | UserCommand::EditFile
                | UserCommand::ViewPermissions
                | UserCommand::ChangePermissions
                | UserCommand::DeleteFile
                | UserCommand::DeleteDirectory
        )
    }
}

impl fmt::Display for UserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program_name().unwrap_or("unknown"))
    }
}

/// A tokenized input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput<'a> {
    /// Classified first token
    pub command: UserCommand,
    /// All tokens, command name included
    pub tokens: Vec<&'a str>,
}

impl<'a> ParsedInput<'a> {
    /// The command name as typed
    pub fn name(&self) -> &'a str {
        self.tokens.first().copied().unwrap_or_default()
    }

    /// Positional argument `index`, counting from zero after the name
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index + 1).copied()
    }

    /// Arguments from position `index` onwards
    pub fn args_from(&self, index: usize) -> &[&'a str] {
        self.tokens.get(index + 1..).unwrap_or_default()
    }

    /// Returns true if only the command name was given
    pub fn is_bare(&self) -> bool {
        self.tokens.len() == 1
    }
}

/// Input line parser
pub struct CommandParser;

impl CommandParser {
    /// Tokenizes and classifies an input line
    ///
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<ParsedInput<'_>> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let command = UserCommand::from_token(tokens.first()?);
        Some(ParsedInput { command, tokens })
    }
}
