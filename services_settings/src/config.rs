//! Config file parsing
//!
//! Config files are plain text with one `key:value` pair per line. A line is
//! split on its first `:`; lines without one, or with an empty key, are
//! discarded.

use std::fmt;
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Config file holds no parsable lines
    #[error("No configuration in {0}")]
    Empty(String),

    /// Value is not a six-digit hex colour
    #[error("\"{0}\" is not a valid hex color")]
    InvalidHex(String),

    /// Directory operation failed
    #[error("Directory error: {0}")]
    Directory(#[from] services_directory::OperationError),
}

/// Parsed `key:value` pairs in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: Vec<(String, String)>,
}

impl Config {
    /// Parses config text
    ///
    /// Returns `None` when no line parses, matching an absent config.
    ///
    /// # Examples
    ///
    /// ```
    /// use services_settings::Config;
    ///
    /// let config = Config::parse("volume:100\nbroken line").unwrap();
    /// assert_eq!(config.get("volume"), Some("100"));
    /// assert_eq!(config.len(), 1);
    ///
    /// assert!(Config::parse("nothing here").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let entries: Vec<(String, String)> = text
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.trim().to_string()))
            })
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// Value for `key`; the first occurrence wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no pairs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An RGB colour from a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses six hex digits, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidHex(hex.to_string());
        let digits = hex.trim_start_matches('#');

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_colon() {
        let config = Config::parse("ipv6:2bae::a93c::dd1e").unwrap();
        assert_eq!(config.get("ipv6"), Some("2bae::a93c::dd1e"));
    }

    #[test]
    fn test_parse_discards_bad_lines() {
        let config = Config::parse("green:377a1c\n\nno colon\n:orphan\nblue:1c387a").unwrap();
        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys, vec!["green", "blue"]);
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert!(Config::parse("").is_none());
        assert!(Config::parse("\n\n").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let config = Config::parse("a:1\na:2").unwrap();
        assert_eq!(config.get("a"), Some("1"));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_rgb_from_hex() {
        let rgb = Rgb::from_hex("377a1c").unwrap();
        assert_eq!(rgb, Rgb { r: 0x37, g: 0x7a, b: 0x1c });
        assert_eq!(rgb.to_string(), "377a1c");
        assert_eq!(Rgb::from_hex("#1C387A").unwrap().b, 0x7a);
    }

    #[test]
    fn test_rgb_rejects_bad_hex() {
        assert!(Rgb::from_hex("12345").is_err());
        assert!(Rgb::from_hex("zzzzzz").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("+12345").is_err());
    }
}
