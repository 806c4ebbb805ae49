//! # Help System
//!
//! Help text lives in the program files under `/system/programs`. Rendering
//! reads the file back, expands the command-list placeholder and lays each
//! record out as a heading followed by indented lines.

use crate::commands::UserCommand;
use fs_tree::programs::{parse_help, COMMANDS_PLACEHOLDER, PROGRAMS_PATH};
use services_directory::DirectoryService;

const INDENT: &str = "    ";

/// Renders help for `command`
///
/// Unknown commands get the general `help` page.
pub fn render_help(directory: &DirectoryService, command: UserCommand) -> String {
    let program = command
        .program_name()
        .or_else(|| UserCommand::Help.program_name())
        .unwrap_or("help");

    let path = format!("{}/{}", PROGRAMS_PATH, program);
    let fs = directory.file_system();
    let Some(contents) = fs.find_file(fs.root(), &path).and_then(|file| file.contents()) else {
        log::warn!("help requested for {} but /{} is missing", program, path);
        return format!("No help is available for \"{}\".", program);
    };

    let sections = parse_help(contents);
    let command_list = command_names();

    sections
        .iter()
        .map(|(key, value)| {
            let value = value.replace(COMMANDS_PLACEHOLDER, &command_list);
            let body: Vec<String> = value
                .lines()
                .map(|line| format!("{}{}", INDENT, line))
                .collect();
            format!("{}\n{}", key, body.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Program names of every command, one per line
fn command_names() -> String {
    UserCommand::ALL
        .iter()
        .filter_map(|command| command.program_name())
        .collect::<Vec<_>>()
        .join("\n")
}
