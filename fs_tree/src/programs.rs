//! Program catalog and help records
//!
//! Every built-in command has a program file under `/system/programs`. The
//! file's contents are its help metadata, stored as `[KEY:=:VALUE]` records
//! separated by [`HELP_LINE_SEPARATOR`].

/// Separator between successive help records
pub const HELP_LINE_SEPARATOR: &str = "\n---\n";

/// Separator between a record's key and value
pub const HELP_KEY_VALUE_SEPARATOR: &str = ":=:";

/// Replaced by the list of program names when `commands` help is rendered
pub const COMMANDS_PLACEHOLDER: &str = "$$$$";

/// Replaced by the configured colour names at boot
pub const COLORS_PLACEHOLDER: &str = "@@@@";

/// Directory holding the program files, relative to the root
pub const PROGRAMS_PATH: &str = "system/programs";

/// A built-in program and its help records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Program {
    /// Program file name
    pub name: &'static str,
    /// Help records in display order
    pub records: &'static [(&'static str, &'static str)],
}

impl Program {
    /// Encodes the help records as program-file contents
    pub fn contents(&self) -> String {
        encode_help(self.records.iter().copied())
    }
}

const PERMISSION_FORMAT: &str = "Permission sets are 6 bits in order: \"admin executable\", \"admin write\", \"admin read\", \"user executable\", \"user write\", and \"user read\". If no bits are set, the permissions are \"none\".";

const PERMISSION_EXAMPLE_SETS: &str = "111111: \"admin executable\", \"admin write\", \"admin read\", \"user executable\", \"user write\", and \"user read\".\n000000: \"none\".";

/// Every built-in program, in catalog order
pub const PROGRAMS: &[Program] = &[
    Program {
        name: "exit",
        records: &[("COMMAND", "exit"), ("REMARKS", "Exits Terminal OS.")],
    },
    Program {
        name: "help",
        records: &[
            ("COMMAND", "help"),
            ("REMARKS", "Displays help about Terminal OS commands."),
            (
                "EXAMPLES",
                "help commands    : Display information about the terminal commands.",
            ),
        ],
    },
    Program {
        name: "color",
        records: &[
            ("COMMAND", "color"),
            (
                "REMARKS",
                "Changes the color of the terminal output.\nColor information is stored in the color config file at /system/config/color.conf.",
            ),
            ("EXAMPLES", "color green    : Change the terminal output to green."),
            ("COLORS", COLORS_PLACEHOLDER),
        ],
    },
    Program {
        name: "save",
        records: &[
            ("COMMAND", "save"),
            ("REMARKS", "Saves the state of the terminal."),
        ],
    },
    Program {
        name: "commands",
        records: &[
            ("COMMAND", "commands"),
            (
                "REMARKS",
                "Displays information about the terminal commands. Use help [command] to get more information about each command.",
            ),
            ("COMMANDS", COMMANDS_PLACEHOLDER),
        ],
    },
    Program {
        name: "list",
        records: &[
            ("COMMAND", "ls [list]"),
            ("REMARKS", "Lists contents of a directory."),
            (
                "EXAMPLES",
                "ls        : List the contents of the current directory.\nls /system : List the contents of the \"/system\" directory.",
            ),
        ],
    },
    Program {
        name: "change",
        records: &[
            ("COMMAND", "cd [change] [changedir]"),
            ("REMARKS", "Changes directory."),
            (
                "EXAMPLES",
                "cd ~    : Change directory to the default home directory for the current user.",
            ),
        ],
    },
    Program {
        name: "view",
        records: &[
            ("COMMAND", "vw [view]"),
            ("REMARKS", "View the contents of a file."),
            (
                "EXAMPLES",
                "view file.ext    : List the contents of the file.ext file.",
            ),
        ],
    },
    Program {
        name: "makefile",
        records: &[
            ("COMMAND", "mf [makefile]"),
            ("REMARKS", "Make a file."),
            (
                "EXAMPLES",
                "mf new.txt    : Creates a blank file called 'new.txt' in the current directory.",
            ),
        ],
    },
    Program {
        name: "makedirectory",
        records: &[
            ("COMMAND", "md [makedir] [makedirectory]"),
            ("REMARKS", "Make a directory."),
            (
                "EXAMPLES",
                "md newdir    : Creates an empty directory called 'newdir' in the current directory.",
            ),
        ],
    },
    Program {
        name: "edit",
        records: &[
            ("COMMAND", "edit"),
            ("REMARKS", "Edit a file."),
            (
                "EXAMPLES",
                "edit new.txt    : Edits the 'new.txt' file in the current directory.",
            ),
        ],
    },
    Program {
        name: "listhardware",
        records: &[
            ("COMMAND", "lhw [listhardware]"),
            ("REMARKS", "View a list of hardware for the system."),
        ],
    },
    Program {
        name: "viewpermissions",
        records: &[
            ("COMMAND", "vp [viewperm] [viewpermissions]"),
            ("REMARKS", "View the permissions of a file or directory."),
            ("FORMAT", PERMISSION_FORMAT),
            ("EXAMPLE SETS", PERMISSION_EXAMPLE_SETS),
            (
                "EXAMPLES",
                "vp new.txt    : Shows the permissions for the 'new.txt' file in the current directory.",
            ),
        ],
    },
    Program {
        name: "changepermissions",
        records: &[
            ("COMMAND", "chp [changeperm] [changepermissions]"),
            ("REMARKS", "Changes the permissions of a file or directory."),
            ("FORMAT", PERMISSION_FORMAT),
            ("EXAMPLE SETS", PERMISSION_EXAMPLE_SETS),
            (
                "EXAMPLES",
                "chp new.txt 010100    : Updates the permissions for the 'new.txt' file to \"admin write\" and \"user executable\".",
            ),
        ],
    },
    Program {
        name: "date",
        records: &[("COMMAND", "date"), ("REMARKS", "View the current date.")],
    },
    Program {
        name: "time",
        records: &[("COMMAND", "time"), ("REMARKS", "View the current time.")],
    },
    Program {
        name: "now",
        records: &[
            ("COMMAND", "now [dt] [datetime] [current]"),
            ("REMARKS", "View the current date and time."),
        ],
    },
    Program {
        name: "network",
        records: &[
            ("COMMAND", "net [network]"),
            ("REMARKS", "View current networking information."),
            (
                "ARGUMENTS",
                "-a [--active]: Show active networks.\n-d [--device]: Show network devices.\n-n [--name]: Show network names.\n-v6 [--ipv6]: Show ipv6 addresses.\n-v8 [--ipv8]: Show ipv8 addresses.",
            ),
            (
                "EXAMPLES",
                "net -a -v8    : Show the ipv8 addresses for active networks.",
            ),
        ],
    },
    Program {
        name: "deletefile",
        records: &[
            ("COMMAND", "df [deletefile]"),
            ("REMARKS", "Deletes a file."),
            ("EXAMPLES", "df new.txt    : Deletes the new.txt file."),
        ],
    },
    Program {
        name: "deletedirectory",
        records: &[
            ("COMMAND", "dd [deletedirectory]"),
            ("REMARKS", "Deletes a directory."),
            (
                "ARGUMENTS",
                "-r [--recurse]: Deletes a folder and all child files and folders.",
            ),
            (
                "EXAMPLES",
                "dd newdir    : Deletes the \"newdir\" directory.\ndd newdir -r : Deletes the \"newdir\" directory and all files and folders inside of it.",
            ),
        ],
    },
];

/// Looks up a program by file name
pub fn find_program(name: &str) -> Option<&'static Program> {
    PROGRAMS.iter().find(|program| program.name == name)
}

/// Encodes `(key, value)` pairs as `[KEY:=:VALUE]` records
pub fn encode_help<'a>(records: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    records
        .into_iter()
        .map(|(key, value)| format!("[{}{}{}]", key, HELP_KEY_VALUE_SEPARATOR, value))
        .collect::<Vec<_>>()
        .join(HELP_LINE_SEPARATOR)
}

/// Parses program-file contents back into ordered `(key, value)` pairs
///
/// Records missing their brackets or key/value separator are skipped.
pub fn parse_help(contents: &str) -> Vec<(String, String)> {
    contents
        .split(HELP_LINE_SEPARATOR)
        .filter_map(|record| {
            let inner = record.trim().strip_prefix('[')?.strip_suffix(']')?;
            let (key, value) = inner.split_once(HELP_KEY_VALUE_SEPARATOR)?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<_> = PROGRAMS.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PROGRAMS.len());
    }

    #[test]
    fn test_every_program_has_command_record() {
        for program in PROGRAMS {
            assert_eq!(program.records[0].0, "COMMAND", "{}", program.name);
        }
    }

    #[test]
    fn test_encode_help() {
        let encoded = encode_help([("COMMAND", "exit"), ("REMARKS", "Exits Terminal OS.")]);
        assert_eq!(
            encoded,
            "[COMMAND:=:exit]\n---\n[REMARKS:=:Exits Terminal OS.]"
        );
    }

    #[test]
    fn test_parse_help_keeps_multiline_values() {
        let program = find_program("list").unwrap();
        let parsed = parse_help(&program.contents());

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], ("COMMAND".to_string(), "ls [list]".to_string()));
        assert!(parsed[2].1.contains("\nls /system"));
    }

    #[test]
    fn test_parse_help_skips_malformed_records() {
        let parsed = parse_help("[A:=:1]\n---\nnot a record\n---\n[B:=:2]");
        assert_eq!(
            parsed,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_placeholders_present() {
        assert!(find_program("commands")
            .unwrap()
            .contents()
            .contains(COMMANDS_PLACEHOLDER));
        assert!(find_program("color")
            .unwrap()
            .contents()
            .contains(COLORS_PLACEHOLDER));
    }
}
