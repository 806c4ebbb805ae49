//! # Host Runtime
//!
//! The shell loop that ties everything together.
//!
//! ## Flow
//!
//! 1. Print the prompt (`<current path>> `)
//! 2. Read one line from the [`LineSource`]
//! 3. Hand it to the interpreter
//! 4. Present the [`CommandOutcome`]
//!
//! The interpreter decides what happens; the runtime owns every side effect
//! outside the tree: writing output, the editor, colours, providers and saves.

use crate::input_script::{InputScriptError, LineSource};
use crate::providers::{self, ProviderError};
use crate::save::{save_snapshot, SaveError, SaveSnapshot};
use chrono::Utc;
use cli_console::{render_listing, Clock, CommandInterpreter, CommandOutcome, SystemClock};
use core_types::EntityId;
use services_directory::{DirectoryOperations, DirectoryService, OperationError};
use services_settings::{ConfigError, ConfigService, Rgb};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Line that ends editor input
pub const EDIT_TERMINATOR: &str = ".";

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Directory error: {0}")]
    Directory(#[from] OperationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    /// Where `save` writes its snapshot
    pub save_path: PathBuf,
    /// Whether messages are wrapped in the chosen ANSI colour
    pub color_output: bool,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("terminal-os-save.json"),
            color_output: true,
        }
    }
}

/// Host runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostState {
    Running,
    Shutdown,
}

/// Host runtime
pub struct HostRuntime<W: Write, C: Clock = SystemClock> {
    /// Configuration
    config: HostRuntimeConfig,
    /// File system and navigation
    directory: DirectoryService,
    interpreter: CommandInterpreter<C>,
    /// Shell output
    output: W,
    /// Active colour name and value
    color: Option<(String, Rgb)>,
    state: HostState,
    /// Lines handed to the interpreter
    steps: usize,
}

impl<W: Write> HostRuntime<W, SystemClock> {
    /// Creates a new host runtime on the system clock
    pub fn new(config: HostRuntimeConfig, output: W) -> Result<Self, HostRuntimeError> {
        Self::with_clock(config, output, SystemClock)
    }
}

impl<W: Write, C: Clock> HostRuntime<W, C> {
    /// Creates a new host runtime on a custom clock
    pub fn with_clock(config: HostRuntimeConfig, output: W, clock: C) -> Result<Self, HostRuntimeError> {
        let mut directory = DirectoryService::bootstrap()?;

        if let Err(err) = ConfigService::update_color_program(&mut directory) {
            log::warn!("color program help not updated: {}", err);
        }

        match ConfigService::user_config(&directory) {
            Ok(user) => log::debug!("loaded user config with {} entries", user.len()),
            Err(err) => log::warn!("user config unavailable: {}", err),
        }

        Ok(Self {
            config,
            directory,
            interpreter: CommandInterpreter::with_clock(clock),
            output,
            color: None,
            state: HostState::Running,
            steps: 0,
        })
    }

    /// Runs the shell loop
    ///
    /// Returns when:
    /// - `exit` is entered
    /// - The line source is exhausted
    pub fn run(&mut self, source: &mut dyn LineSource) -> Result<(), HostRuntimeError> {
        while self.state == HostState::Running {
            write!(self.output, "{}> ", self.directory.current_path())?;
            self.output.flush()?;

            let Some(line) = source.next_line()? else {
                writeln!(self.output)?;
                break;
            };

            if source.is_scripted() {
                writeln!(self.output, "{}", line)?;
            }

            self.step(&line, source)?;
        }

        log::info!("shell stopped after {} line(s)", self.steps);
        Ok(())
    }

    /// Executes one input line and presents the outcome
    ///
    /// `source` supplies editor content when the line opens the editor.
    pub fn step(&mut self, line: &str, source: &mut dyn LineSource) -> Result<(), HostRuntimeError> {
        let outcome = self.interpreter.execute(&mut self.directory, line);
        self.steps += 1;

        match outcome {
            CommandOutcome::Message(text) => self.print(&text)?,
            CommandOutcome::Silent => {}
            CommandOutcome::ListDirectory { path } => self.list_directory(path.as_deref())?,
            CommandOutcome::EditFile { file_id } => self.edit_file(file_id, source)?,
            CommandOutcome::ChangeColor { name, hex } => {
                let rgb = Rgb::from_hex(&hex)?;
                log::info!("output color set to {} ({})", name, rgb);
                self.color = Some((name, rgb));
            }
            CommandOutcome::ListHardware => {
                let report = providers::hardware_report(&self.directory)?;
                self.print(&report)?;
            }
            CommandOutcome::Network { args } => {
                match providers::network_report(&self.directory, &args[..]) {
                    Ok(report) => self.print(&report)?,
                    Err(err @ ProviderError::UnknownNetworkArgument(_)) => {
                        self.print(&err.to_string())?
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            CommandOutcome::Save => match self.save() {
                Ok(()) => self.print("Progress saved.")?,
                Err(err) => {
                    log::error!("save failed: {}", err);
                    self.print(&format!("Unable to save: {}", err))?;
                }
            },
            CommandOutcome::Exit => self.state = HostState::Shutdown,
        }

        Ok(())
    }

    fn list_directory(&mut self, path: Option<&str>) -> Result<(), HostRuntimeError> {
        match self.directory.list(path) {
            Ok(listing) => {
                if !listing.entries.is_empty() {
                    self.print(&render_listing(&listing))?;
                }
                Ok(())
            }
            Err(OperationError::NotADirectory(path)) => {
                self.print(&format!("\"{}\" is not a directory.", path))
            }
            Err(OperationError::InsufficientPermission(path)) => self.print(&format!(
                "Insufficient permissions to list the \"{}\" directory.",
                path
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces a file's contents with lines up to the terminator
    fn edit_file(&mut self, file_id: EntityId, source: &mut dyn LineSource) -> Result<(), HostRuntimeError> {
        let name = self
            .directory
            .get(file_id)
            .map(|file| file.full_name())
            .ok_or(OperationError::NotFound(file_id.to_string()))?;

        if !source.is_scripted() {
            self.print(&format!(
                "Editing \"{}\". Enter a line with only \"{}\" to finish.",
                name, EDIT_TERMINATOR
            ))?;
        }

        let mut lines = Vec::new();
        while let Some(line) = source.next_line()? {
            if source.is_scripted() {
                writeln!(self.output, "{}", line)?;
            }
            if line == EDIT_TERMINATOR {
                break;
            }
            lines.push(line);
        }

        self.directory.write_file(file_id, &lines.join("\n"))?;
        self.print(&format!("\"{}\" saved.", name))
    }

    fn save(&self) -> Result<(), SaveError> {
        let snapshot = SaveSnapshot {
            saved_at: Utc::now(),
            current_directory: self.directory.current_path(),
            color: self.color_name(),
            file_system: self.directory.file_system(),
        };
        save_snapshot(&self.config.save_path, &snapshot)
    }

    /// Writes one message, coloured when enabled
    fn print(&mut self, text: &str) -> Result<(), HostRuntimeError> {
        match (&self.color, self.config.color_output) {
            (Some((_, rgb)), true) => writeln!(
                self.output,
                "\x1b[38;2;{};{};{}m{}\x1b[0m",
                rgb.r, rgb.g, rgb.b, text
            )?,
            _ => writeln!(self.output, "{}", text)?,
        }
        Ok(())
    }

    /// The directory service
    pub fn directory(&self) -> &DirectoryService {
        &self.directory
    }

    /// Name of the active colour
    pub fn color_name(&self) -> Option<&str> {
        self.color.as_ref().map(|(name, _)| name.as_str())
    }

    /// Returns true until `exit` is executed
    pub fn is_running(&self) -> bool {
        self.state == HostState::Running
    }

    /// Number of lines executed
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The output writer
    pub fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_script::InputScript;

    fn runtime() -> HostRuntime<Vec<u8>> {
        let config = HostRuntimeConfig {
            color_output: false,
            ..HostRuntimeConfig::default()
        };
        HostRuntime::new(config, Vec::new()).unwrap()
    }

    fn run(runtime: &mut HostRuntime<Vec<u8>>, script: &str) -> String {
        let mut script = InputScript::from_text(script).unwrap();
        runtime.run(&mut script).unwrap();
        String::from_utf8(runtime.output().clone()).unwrap()
    }

    #[test]
    fn test_prompt_and_echo() {
        let mut runtime = runtime();
        let output = run(&mut runtime, "cd ..\nexit");
        assert_eq!(output, "/users/user/home> cd ..\n/users/user> exit\n");
        assert!(!runtime.is_running());
        assert_eq!(runtime.steps(), 2);
    }

    #[test]
    fn test_stops_at_exit() {
        let mut runtime = runtime();
        let output = run(&mut runtime, "exit\nls");
        assert!(!output.contains("mail/"));
        assert_eq!(runtime.steps(), 1);
    }

    #[test]
    fn test_end_of_input_stops() {
        let mut runtime = runtime();
        let output = run(&mut runtime, "ls");
        assert_eq!(output, "/users/user/home> ls\nmail/\n/users/user/home> \n");
        assert!(runtime.is_running());
    }

    #[test]
    fn test_list_failures() {
        let mut runtime = runtime();
        let output = run(&mut runtime, "ls /nowhere\nls /system/network/ethernet");
        assert!(output.contains("\"/nowhere\" is not a directory.\n"));
        assert!(output.contains("\"/system/network/ethernet\" is not a directory.\n"));
    }

    #[test]
    fn test_edit_then_view() {
        let mut runtime = runtime();
        let output = run(
            &mut runtime,
            "mf note.txt\nedit note.txt\nfirst line\nsecond line\n.\nvw note.txt",
        );
        assert!(output.contains("\"note.txt\" saved.\n"));
        assert!(output.ends_with("first line\nsecond line\n/users/user/home> \n"));
    }

    #[test]
    fn test_color_wraps_messages() {
        let mut runtime = HostRuntime::new(HostRuntimeConfig::default(), Vec::new()).unwrap();
        let output = run(&mut runtime, "color teal\nvw mail/welcome-to-terminal-os.mail");
        assert_eq!(runtime.color_name(), Some("teal"));
        assert!(output.contains(
            "\x1b[38;2;28;103;122mThis is a mail file in Terminal OS. Welcome!\x1b[0m\n"
        ));
    }

    #[test]
    fn test_color_help_lists_colors() {
        let mut runtime = runtime();
        let output = run(&mut runtime, "help color");
        assert!(output.contains("green, blue, teal, purple, orange, red"));
        assert!(!output.contains("@@@@"));
    }

    #[test]
    fn test_network_flags() {
        let mut runtime = runtime();
        let output = run(&mut runtime, "net -n\nnet --bogus");
        assert!(output.contains("\nethernet\nloopback\n"));
        assert!(output.contains("\"--bogus\" is not a valid network argument.\n"));
    }

    #[test]
    fn test_list_hardware() {
        let mut runtime = runtime();
        let output = run(&mut runtime, "lhw");
        assert!(output.contains("processor/0\n    name: CPU\n"));
    }
}
