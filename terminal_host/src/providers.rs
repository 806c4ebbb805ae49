//! # Hardware and Network Providers
//!
//! Reports for `lhw` and `net`, built from the descriptor files seeded under
//! `/system/device` and `/system/network`. Descriptors use the config file
//! format and are read directly from the tree, independent of the shell's
//! current directory and of the files' user permissions.

use fs_tree::bootstrap::{DEVICE_PATH, NETWORK_PATH};
use fs_tree::{Entity, FileSystem};
use services_directory::DirectoryService;
use services_settings::Config;
use thiserror::Error;

const INDENT: &str = "    ";

/// Provider error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Missing directory: /{0}")]
    MissingDirectory(String),

    #[error("\"{0}\" is not a valid network argument.")]
    UnknownNetworkArgument(String),
}

/// Renders every hardware descriptor as a heading plus indented properties
pub fn hardware_report(directory: &DirectoryService) -> Result<String, ProviderError> {
    let fs = directory.file_system();
    let devices = descriptor_directory(fs, DEVICE_PATH)?;

    let mut sections = Vec::new();
    for kind in fs.children_of(devices).filter(|entity| entity.is_directory()) {
        for descriptor in fs.children_of(kind).filter(|entity| entity.is_file()) {
            let heading = format!("{}/{}", kind.name, descriptor.full_name());
            let Some(config) = descriptor_config(descriptor) else {
                log::warn!("hardware descriptor {} holds no data", heading);
                continue;
            };

            let properties: Vec<String> = config
                .iter()
                .map(|(key, value)| format!("{}{}: {}", INDENT, key, value))
                .collect();
            sections.push(format!("{}\n{}", heading, properties.join("\n")));
        }
    }

    Ok(sections.join("\n"))
}

/// A column of the network report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkColumn {
    Name,
    Device,
    Ipv6,
    Ipv8,
}

impl NetworkColumn {
    /// Every column in display order
    pub const ALL: [NetworkColumn; 4] = [
        NetworkColumn::Name,
        NetworkColumn::Device,
        NetworkColumn::Ipv6,
        NetworkColumn::Ipv8,
    ];

    /// Descriptor key holding this column, `None` for the file name
    fn key(self) -> Option<&'static str> {
        match self {
            NetworkColumn::Name => None,
            NetworkColumn::Device => Some("device"),
            NetworkColumn::Ipv6 => Some("ipv6"),
            NetworkColumn::Ipv8 => Some("ipv8"),
        }
    }
}

/// Parsed `net` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkQuery {
    /// Only include networks marked `active:true`
    pub active_only: bool,
    /// Columns to show, in display order
    pub columns: Vec<NetworkColumn>,
}

impl NetworkQuery {
    /// Parses `net` flags
    ///
    /// With no column flags every column is shown.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, ProviderError> {
        let mut active_only = false;
        let mut selected = Vec::new();

        for arg in args {
            let column = match arg.as_ref().to_lowercase().as_str() {
                "-a" | "--active" => {
                    active_only = true;
                    continue;
                }
                "-n" | "--name" => NetworkColumn::Name,
                "-d" | "--device" => NetworkColumn::Device,
                "-v6" | "--ipv6" => NetworkColumn::Ipv6,
                "-v8" | "--ipv8" => NetworkColumn::Ipv8,
                _ => return Err(ProviderError::UnknownNetworkArgument(arg.as_ref().to_string())),
            };
            selected.push(column);
        }

        let columns = if selected.is_empty() {
            NetworkColumn::ALL.to_vec()
        } else {
            NetworkColumn::ALL
                .into_iter()
                .filter(|column| selected.contains(column))
                .collect()
        };

        Ok(Self {
            active_only,
            columns,
        })
    }
}

/// Renders one line per matching network
pub fn network_report<S: AsRef<str>>(
    directory: &DirectoryService,
    args: &[S],
) -> Result<String, ProviderError> {
    let query = NetworkQuery::parse(args)?;
    let fs = directory.file_system();
    let networks = descriptor_directory(fs, NETWORK_PATH)?;

    let lines: Vec<String> = fs
        .children_of(networks)
        .filter(|entity| entity.is_file())
        .filter_map(|file| {
            let config = descriptor_config(file)?;
            if query.active_only && config.get("active") != Some("true") {
                return None;
            }

            let name = file.full_name();
            let fields: Vec<String> = query
                .columns
                .iter()
                .map(|column| match column.key() {
                    None => name.clone(),
                    Some(key) => format!("{}: {}", key, config.get(key).unwrap_or("-")),
                })
                .collect();
            Some(fields.join("  "))
        })
        .collect();

    if lines.is_empty() {
        return Ok("No networks found.".to_string());
    }

    Ok(lines.join("\n"))
}

fn descriptor_directory<'a>(fs: &'a FileSystem, path: &str) -> Result<&'a Entity, ProviderError> {
    fs.find_directory(fs.root(), path)
        .ok_or_else(|| ProviderError::MissingDirectory(path.to_string()))
}

fn descriptor_config(file: &Entity) -> Option<Config> {
    Config::parse(file.contents().unwrap_or_default())
}
