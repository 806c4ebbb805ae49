//! Config service
//!
//! Reads the in-world config files through the directory service.

use crate::config::{Config, ConfigError, Rgb};
use fs_tree::bootstrap::{COLOR_CONFIG_PATH, USER_CONFIG_PATH};
use fs_tree::programs::{COLORS_PLACEHOLDER, PROGRAMS_PATH};
use services_directory::{DirectoryOperations, DirectoryService};

/// Program file whose help lists the configured colours
const COLOR_PROGRAM: &str = "color";

/// Read access to the config files plus the boot-time colour help update
pub struct ConfigService;

impl ConfigService {
    /// Loads and parses the config file at `path`, relative to the root
    pub fn load(directory: &DirectoryService, path: &str) -> Result<Config, ConfigError> {
        let fs = directory.file_system();
        let file = fs
            .find_file(fs.root(), path)
            .ok_or_else(|| ConfigError::NotFound(path.to_string()))?;

        Config::parse(file.contents().unwrap_or_default()).ok_or_else(|| {
            log::warn!("unable to parse any data from {}", path);
            ConfigError::Empty(path.to_string())
        })
    }

    /// `/system/config/color.conf`
    pub fn color_config(directory: &DirectoryService) -> Result<Config, ConfigError> {
        Self::load(directory, COLOR_CONFIG_PATH)
    }

    /// `/users/user/config/user.conf`
    pub fn user_config(directory: &DirectoryService) -> Result<Config, ConfigError> {
        Self::load(directory, USER_CONFIG_PATH)
    }

    /// Colours with valid hex values, in file order
    ///
    /// Entries with invalid hex are skipped with a warning.
    pub fn colors(directory: &DirectoryService) -> Result<Vec<(String, Rgb)>, ConfigError> {
        let config = Self::color_config(directory)?;
        Ok(config
            .iter()
            .filter_map(|(name, hex)| match Rgb::from_hex(hex) {
                Ok(rgb) => Some((name.to_string(), rgb)),
                Err(err) => {
                    log::warn!("skipping color {:?}: {}", name, err);
                    None
                }
            })
            .collect())
    }

    /// Looks up one colour by name
    pub fn color(directory: &DirectoryService, name: &str) -> Result<Option<Rgb>, ConfigError> {
        Ok(Self::colors(directory)?
            .into_iter()
            .find(|(color, _)| color == name)
            .map(|(_, rgb)| rgb))
    }

    /// Fills the colour placeholder in the `color` program's help
    pub fn update_color_program(directory: &mut DirectoryService) -> Result<(), ConfigError> {
        let names: Vec<String> = Self::colors(directory)?
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        let path = format!("{}/{}", PROGRAMS_PATH, COLOR_PROGRAM);
        let fs = directory.file_system();
        let program = fs
            .find_file(fs.root(), &path)
            .ok_or_else(|| ConfigError::NotFound(path.clone()))?;

        let updated = program
            .contents()
            .unwrap_or_default()
            .replace(COLORS_PLACEHOLDER, &names.join(", "));
        let id = program.id;

        directory.write_file(id, &updated)?;
        Ok(())
    }
}
