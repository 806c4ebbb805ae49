//! # Command Interpreter
//!
//! Turns one raw input line into one [`CommandOutcome`].
//!
//! ## Flow
//!
//! 1. Tokenize on whitespace and classify the first token
//! 2. Commands that need an argument but got none show their help
//! 3. Route to exactly one handler
//!
//! Every failure becomes a message. A handler performs at most one tree
//! mutation and none at all when it fails.

use crate::commands::{CommandParser, ParsedInput, UserCommand};
use crate::help::render_help;
use crate::outcome::CommandOutcome;
use chrono::{DateTime, Months, Utc};
use core_types::{Permission, PermissionSet};
use services_directory::{DirectoryOperations, DirectoryService, OperationError};
use services_settings::ConfigService;

/// Years the in-world clock runs ahead of real time
pub const YEARS_AHEAD: u32 = 250;

const DATE_FORMAT: &str = "%A, %B %-d, %Y";
const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Flags that allow `dd` to delete a non-empty directory
const RECURSE_FLAGS: [&str; 2] = ["-r", "--recurse"];

/// Source of the current instant
pub trait Clock {
    /// Current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The command interpreter
///
/// Holds no state between lines; the directory service is passed in on
/// every call.
#[derive(Debug, Clone, Default)]
pub struct CommandInterpreter<C: Clock = SystemClock> {
    clock: C,
}

impl CommandInterpreter<SystemClock> {
    /// Creates an interpreter on the system clock
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> CommandInterpreter<C> {
    /// Creates an interpreter on a custom clock
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Executes one input line
    pub fn execute(&self, directory: &mut DirectoryService, line: &str) -> CommandOutcome {
        let Some(input) = CommandParser::parse(line) else {
            return CommandOutcome::Silent;
        };

        if input.command.requires_argument() && input.is_bare() {
            return CommandOutcome::Message(render_help(directory, input.command));
        }

        log::debug!("executing {:?} with {} token(s)", input.command, input.tokens.len());

        match input.command {
            UserCommand::Help | UserCommand::Commands => self.help(directory, &input),
            UserCommand::ChangeDirectory => self.change_directory(directory, &input),
            UserCommand::ListDirectory => CommandOutcome::ListDirectory {
                path: input.arg(0).map(str::to_string),
            },
            UserCommand::ViewFile => self.view_file(directory, &input),
            UserCommand::MakeFile => self.make_file(directory, &input),
            UserCommand::MakeDirectory => self.make_directory(directory, &input),
            UserCommand::EditFile => self.edit_file(directory, &input),
            UserCommand::ListHardware => CommandOutcome::ListHardware,
            UserCommand::ViewPermissions => self.view_permissions(directory, &input),
            UserCommand::ChangePermissions => self.change_permissions(directory, &input),
            UserCommand::Date => CommandOutcome::Message(self.world_time().format(DATE_FORMAT).to_string()),
            UserCommand::Time => CommandOutcome::Message(self.world_time().format(TIME_FORMAT).to_string()),
            UserCommand::Now => {
                let now = self.world_time();
                CommandOutcome::Message(format!(
                    "{}, {}",
                    now.format(TIME_FORMAT),
                    now.format(DATE_FORMAT)
                ))
            }
            UserCommand::Network => CommandOutcome::Network {
                args: input.args_from(0).iter().map(|arg| arg.to_string()).collect(),
            },
            UserCommand::Color => self.change_color(directory, &input),
            UserCommand::Save => CommandOutcome::Save,
            UserCommand::Exit => CommandOutcome::Exit,
            UserCommand::DeleteFile => self.delete_file(directory, &input),
            UserCommand::DeleteDirectory => self.delete_directory(directory, &input),
            UserCommand::Unknown => CommandOutcome::Message(format!(
                "\"{}\" is an unknown command. Use \"commands\" to get a list of available commands.",
                input.name()
            )),
        }
    }

    /// In-world time, running ahead of the clock
    pub fn world_time(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        now.checked_add_months(Months::new(YEARS_AHEAD * 12))
            .unwrap_or(now)
    }

    fn help(&self, directory: &DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let topic = input.arg(0).unwrap_or(input.name());
        let command = match UserCommand::from_token(topic) {
            UserCommand::Unknown => UserCommand::Help,
            command => command,
        };
        CommandOutcome::Message(render_help(directory, command))
    }

    fn change_directory(&self, directory: &mut DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let path = input.arg(0).unwrap_or_default();
        let Some(target) = directory.resolve_directory(path) else {
            return CommandOutcome::message(format!("\"{}\" is not a directory.", path));
        };

        if !target.permissions.contains(Permission::UserRead) {
            return CommandOutcome::message(format!(
                "Insufficient permissions to enter the \"{}\" directory.",
                directory.entity_path(target)
            ));
        }

        let id = target.id;
        directory.set_current_directory(id);
        CommandOutcome::Silent
    }

    fn view_file(&self, directory: &DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let name = input.arg(0).unwrap_or_default();
        let Some(file) = directory.resolve_file(name) else {
            return CommandOutcome::message(format!("\"{}\" does not exist.", name));
        };

        if file.permissions.is_executable() {
            return CommandOutcome::message(format!("\"{}\" is an executable.", name));
        }

        if !file.permissions.contains(Permission::UserRead) {
            return CommandOutcome::message(format!(
                "Insufficient permissions to view the \"{}\" file.",
                name
            ));
        }

        CommandOutcome::message(file.contents().unwrap_or_default())
    }

    fn make_file(&self, directory: &mut DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        if !directory.current_directory_allows(Permission::UserWrite) {
            return CommandOutcome::message(
                "Insufficient permissions to create a file in the current directory.",
            );
        }

        let name = input.arg(0).unwrap_or_default();
        match directory.create_file(name) {
            Ok(_) => CommandOutcome::Silent,
            Err(err) => creation_failure(name, err),
        }
    }

    fn make_directory(&self, directory: &mut DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        if !directory.current_directory_allows(Permission::UserWrite) {
            return CommandOutcome::message(
                "Insufficient permissions to create a directory in the current directory.",
            );
        }

        let name = input.arg(0).unwrap_or_default();
        match directory.create_directory(name) {
            Ok(_) => CommandOutcome::Silent,
            Err(err) => creation_failure(name, err),
        }
    }

    fn edit_file(&self, directory: &DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let name = input.arg(0).unwrap_or_default();
        let file = match directory.find_file_in_current(name) {
            Ok(file) => file,
            Err(OperationError::EmptyName) => {
                return CommandOutcome::message("File can't be edited without a name.")
            }
            Err(_) => {
                return CommandOutcome::message(format!(
                    "No file with the name '{}' exists.",
                    name
                ))
            }
        };

        if !file.permissions.contains(Permission::UserWrite) {
            return CommandOutcome::message(format!(
                "Insufficient permissions to edit the \"{}\" file.",
                name
            ));
        }

        CommandOutcome::EditFile { file_id: file.id }
    }

    fn view_permissions(&self, directory: &DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let name = input.arg(0).unwrap_or_default();
        match directory.find_in_current(name) {
            Ok(entity) => CommandOutcome::message(format!(
                "{}: {}",
                entity.permissions,
                entity.permissions.describe()
            )),
            Err(_) => missing_entity(name),
        }
    }

    fn change_permissions(&self, directory: &mut DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        if !directory.current_directory_allows(Permission::UserWrite) {
            return CommandOutcome::message(
                "Insufficient permissions to change permissions in the current directory.",
            );
        }

        let name = input.arg(0).unwrap_or_default();
        let id = match directory.find_in_current(name) {
            Ok(entity) => entity.id,
            Err(_) => return missing_entity(name),
        };

        let bits = input.arg(1).unwrap_or_default();
        let permissions = match PermissionSet::parse(bits) {
            Ok(permissions) => permissions,
            Err(_) => {
                return CommandOutcome::message(format!(
                    "\"{}\" is not a valid permission set. Permission sets are exactly 6 characters of \"0\" or \"1\".",
                    bits
                ))
            }
        };

        match directory.set_permissions(id, permissions) {
            Ok(()) => CommandOutcome::message(format!(
                "\"{}\" permissions updated to {}.",
                name, permissions
            )),
            Err(err) => unexpected(err),
        }
    }

    fn change_color(&self, directory: &DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let name = input.arg(0).unwrap_or_default();
        match ConfigService::color(directory, name) {
            Ok(Some(rgb)) => CommandOutcome::ChangeColor {
                name: name.to_string(),
                hex: rgb.to_string(),
            },
            Ok(None) => CommandOutcome::message(format!("\"{}\" is not a valid color.", name)),
            Err(err) => {
                log::warn!("color lookup failed: {}", err);
                CommandOutcome::message(format!("\"{}\" is not a valid color.", name))
            }
        }
    }

    fn delete_file(&self, directory: &mut DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let name = input.arg(0).unwrap_or_default();
        if !directory.current_directory_allows(Permission::UserWrite) {
            return insufficient_delete(name);
        }

        let id = match directory.find_file_in_current(name) {
            Ok(file) => file.id,
            Err(OperationError::EmptyName) => {
                return CommandOutcome::message("File can't be deleted without a name.")
            }
            Err(_) => {
                return CommandOutcome::message(format!(
                    "No file with the name of \"{}\" exists.",
                    name
                ))
            }
        };

        match directory.delete_entity(id) {
            Ok(_) => CommandOutcome::message(format!("\"{}\" deleted.", name)),
            Err(err) => unexpected(err),
        }
    }

    fn delete_directory(&self, directory: &mut DirectoryService, input: &ParsedInput<'_>) -> CommandOutcome {
        let name = input.arg(0).unwrap_or_default();
        if !directory.current_directory_allows(Permission::UserWrite) {
            return insufficient_delete(name);
        }

        let target = match directory.find_directory_in_current(name) {
            Ok(target) => target,
            Err(OperationError::EmptyName) => {
                return CommandOutcome::message("Directory can't be deleted without a name.")
            }
            Err(_) => {
                return CommandOutcome::message(format!(
                    "No folder with the name of \"{}\" exists.",
                    name
                ))
            }
        };

        let recurse = input
            .args_from(1)
            .iter()
            .any(|arg| RECURSE_FLAGS.contains(arg));
        if !recurse && !target.children().is_empty() {
            return CommandOutcome::message(format!(
                "Cannot delete the \"{}\" directory, it has files or folders in it.",
                name
            ));
        }

        let id = target.id;
        match directory.delete_entity(id) {
            Ok(_) => CommandOutcome::message(format!("\"{}\" deleted.", name)),
            Err(err) => unexpected(err),
        }
    }
}

fn creation_failure(name: &str, err: OperationError) -> CommandOutcome {
    match err {
        OperationError::EmptyName | OperationError::InvalidName(_) => {
            CommandOutcome::message(format!("\"{}\" is not a valid name.", name))
        }
        err => unexpected(err),
    }
}

fn missing_entity(name: &str) -> CommandOutcome {
    CommandOutcome::message(format!(
        "No file or folder with the name \"{}\" exists.",
        name
    ))
}

fn insufficient_delete(name: &str) -> CommandOutcome {
    CommandOutcome::message(format!(
        "Insufficient permissions to delete \"{}\" in the current directory.",
        name
    ))
}

fn unexpected(err: OperationError) -> CommandOutcome {
    log::error!("directory operation failed: {}", err);
    CommandOutcome::message(format!("Operation failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> CommandInterpreter<FixedClock> {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        CommandInterpreter::with_clock(FixedClock(instant))
    }

    #[test]
    fn test_blank_is_silent() {
        let mut directory = DirectoryService::bootstrap().unwrap();
        assert_eq!(CommandInterpreter::new().execute(&mut directory, "  "), CommandOutcome::Silent);
    }

    #[test]
    fn test_world_time_runs_ahead() {
        let interpreter = fixed();
        assert_eq!(
            interpreter.world_time(),
            Utc.with_ymd_and_hms(2274, 3, 5, 14, 7, 9).unwrap()
        );
    }

    #[test]
    fn test_date_and_time_formats() {
        let mut directory = DirectoryService::bootstrap().unwrap();
        let interpreter = fixed();

        assert_eq!(
            interpreter.execute(&mut directory, "date"),
            CommandOutcome::message("Thursday, March 5, 2274")
        );
        assert_eq!(
            interpreter.execute(&mut directory, "time"),
            CommandOutcome::message("2:07:09 PM")
        );
        assert_eq!(
            interpreter.execute(&mut directory, "now"),
            CommandOutcome::message("2:07:09 PM, Thursday, March 5, 2274")
        );
    }

    #[test]
    fn test_simple_routes() {
        let mut directory = DirectoryService::bootstrap().unwrap();
        let interpreter = fixed();

        assert_eq!(interpreter.execute(&mut directory, "exit"), CommandOutcome::Exit);
        assert_eq!(interpreter.execute(&mut directory, "SAVE"), CommandOutcome::Save);
        assert_eq!(interpreter.execute(&mut directory, "lhw"), CommandOutcome::ListHardware);
        assert_eq!(
            interpreter.execute(&mut directory, "ls"),
            CommandOutcome::ListDirectory { path: None }
        );
        assert_eq!(
            interpreter.execute(&mut directory, "list /system"),
            CommandOutcome::ListDirectory {
                path: Some("/system".to_string())
            }
        );
        assert_eq!(
            interpreter.execute(&mut directory, "net -a -v8"),
            CommandOutcome::Network {
                args: vec!["-a".to_string(), "-v8".to_string()]
            }
        );
    }
}
