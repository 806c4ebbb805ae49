//! # Permission Bits
//!
//! Unix-like permission bits for file-system entities.
//!
//! Six independent bits split by role: admin and user each get executable,
//! write and read. A [`PermissionSet`] is an unordered collection of these
//! bits. Its textual form is always six characters of `0`/`1` in the fixed
//! order admin executable, admin write, admin read, user executable,
//! user write, user read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a permission bit string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    /// Input was not exactly six characters of `0`/`1`
    #[error("\"{0}\" is not a valid permission set")]
    MalformedPermissionString(String),
}

/// A single permission bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Admin may execute the entity
    AdminExecutable,
    /// Admin may modify the entity
    AdminWrite,
    /// Admin may read the entity
    AdminRead,
    /// User may execute the entity
    UserExecutable,
    /// User may modify the entity
    UserWrite,
    /// User may read the entity
    UserRead,
}

impl Permission {
    /// All bits in display order
    pub const ALL: [Permission; 6] = [
        Permission::AdminExecutable,
        Permission::AdminWrite,
        Permission::AdminRead,
        Permission::UserExecutable,
        Permission::UserWrite,
        Permission::UserRead,
    ];

    /// Position of this bit in the six-character display string
    pub fn index(self) -> usize {
        match self {
            Permission::AdminExecutable => 0,
            Permission::AdminWrite => 1,
            Permission::AdminRead => 2,
            Permission::UserExecutable => 3,
            Permission::UserWrite => 4,
            Permission::UserRead => 5,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Permission::AdminExecutable => "admin executable",
            Permission::AdminWrite => "admin write",
            Permission::AdminRead => "admin read",
            Permission::UserExecutable => "user executable",
            Permission::UserWrite => "user write",
            Permission::UserRead => "user read",
        }
    }

    /// Returns true for either executable bit
    pub fn is_executable(self) -> bool {
        matches!(
            self,
            Permission::AdminExecutable | Permission::UserExecutable
        )
    }

    fn mask(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A set of permission bits
///
/// Backed by a bitmask; duplicates are impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PermissionSet(u8);

impl PermissionSet {
    /// The empty set
    pub fn none() -> Self {
        Self(0)
    }

    /// Builds a set from a list of bits
    pub fn from_permissions(permissions: &[Permission]) -> Self {
        permissions
            .iter()
            .fold(Self::none(), |set, permission| set.with(*permission))
    }

    /// Default set for user-created files and directories
    pub fn user_default() -> Self {
        Self::from_permissions(&[Permission::UserRead, Permission::UserWrite])
    }

    /// Admin read/write only
    pub fn admin_read_write() -> Self {
        Self::from_permissions(&[Permission::AdminRead, Permission::AdminWrite])
    }

    /// Admin read/write plus user read
    pub fn user_read() -> Self {
        Self::admin_read_write().with(Permission::UserRead)
    }

    /// Admin read/write plus user read/write
    pub fn user_read_write() -> Self {
        Self::user_read().with(Permission::UserWrite)
    }

    /// Program files: admin read/write/execute plus user read/execute
    pub fn user_executable() -> Self {
        Self::user_read()
            .with(Permission::AdminExecutable)
            .with(Permission::UserExecutable)
    }

    /// Returns a copy with `permission` added
    pub fn with(self, permission: Permission) -> Self {
        Self(self.0 | permission.mask())
    }

    /// Returns a copy with `permission` removed
    pub fn without(self, permission: Permission) -> Self {
        Self(self.0 & !permission.mask())
    }

    /// Membership test
    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & permission.mask() != 0
    }

    /// Returns true if either executable bit is set
    pub fn is_executable(&self) -> bool {
        self.iter().any(Permission::is_executable)
    }

    /// Returns true if no bits are set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the set bits in display order
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL
            .into_iter()
            .filter(move |permission| self.contains(*permission))
    }

    /// Parses a six-character `0`/`1` string
    pub fn parse(input: &str) -> Result<Self, PermissionError> {
        let malformed = || PermissionError::MalformedPermissionString(input.to_string());

        if input.chars().count() != Permission::ALL.len() {
            return Err(malformed());
        }

        let mut set = Self::none();
        for (permission, bit) in Permission::ALL.iter().zip(input.chars()) {
            match bit {
                '1' => set = set.with(*permission),
                '0' => {}
                _ => return Err(malformed()),
            }
        }

        Ok(set)
    }

    /// Formats the set as a six-character `0`/`1` string
    pub fn to_bit_string(&self) -> String {
        Permission::ALL
            .iter()
            .map(|permission| if self.contains(*permission) { '1' } else { '0' })
            .collect()
    }

    /// Describes the set bits, e.g. `"admin write" and "user executable"`
    ///
    /// The empty set is described as `"none"`.
    pub fn describe(&self) -> String {
        let labels: Vec<String> = self
            .iter()
            .map(|permission| format!("\"{}\"", permission.label()))
            .collect();

        match labels.as_slice() {
            [] => "\"none\"".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{} and {}", first, second),
            [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
        }
    }
}

impl FromStr for PermissionSet {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bit_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order() {
        let set = PermissionSet::from_permissions(&[Permission::AdminExecutable]);
        assert_eq!(set.to_bit_string(), "100000");

        let set = PermissionSet::from_permissions(&[Permission::UserRead]);
        assert_eq!(set.to_bit_string(), "000001");
    }

    #[test]
    fn test_parse_admin_write_user_executable() {
        let set = PermissionSet::parse("010100").unwrap();
        assert!(set.contains(Permission::AdminWrite));
        assert!(set.contains(Permission::UserExecutable));
        assert_eq!(set.iter().count(), 2);
        assert!(set.is_executable());
    }

    #[test]
    fn test_parse_all_zero_is_empty() {
        let set = PermissionSet::parse("000000").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.describe(), "\"none\"");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            PermissionSet::parse("0101"),
            Err(PermissionError::MalformedPermissionString("0101".to_string()))
        );
        assert!(PermissionSet::parse("0101010").is_err());
        assert!(PermissionSet::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_binary() {
        assert!(PermissionSet::parse("01012x").is_err());
        assert!(PermissionSet::parse("abcdef").is_err());
        assert!(PermissionSet::parse("0101 1").is_err());
    }

    #[test]
    fn test_round_trip_every_bit_string() {
        for value in 0u8..64 {
            let bits: String = (0..6)
                .rev()
                .map(|shift| if value >> shift & 1 == 1 { '1' } else { '0' })
                .collect();
            let set = PermissionSet::parse(&bits).unwrap();
            assert_eq!(set.to_bit_string(), bits);
            assert_eq!(PermissionSet::parse(&set.to_bit_string()).unwrap(), set);
        }
    }

    #[test]
    fn test_presets() {
        assert_eq!(PermissionSet::user_default().to_bit_string(), "000011");
        assert_eq!(PermissionSet::admin_read_write().to_bit_string(), "011000");
        assert_eq!(PermissionSet::user_read().to_bit_string(), "011001");
        assert_eq!(PermissionSet::user_read_write().to_bit_string(), "011011");
        assert_eq!(PermissionSet::user_executable().to_bit_string(), "111101");
    }

    #[test]
    fn test_with_and_without() {
        let set = PermissionSet::none()
            .with(Permission::UserRead)
            .with(Permission::UserRead);
        assert_eq!(set.iter().count(), 1);

        let set = set.without(Permission::UserRead);
        assert!(set.is_empty());
    }

    #[test]
    fn test_describe() {
        let set = PermissionSet::parse("010100").unwrap();
        assert_eq!(set.describe(), "\"admin write\" and \"user executable\"");

        let set = PermissionSet::parse("000001").unwrap();
        assert_eq!(set.describe(), "\"user read\"");

        let set = PermissionSet::parse("111111").unwrap();
        assert_eq!(
            set.describe(),
            "\"admin executable\", \"admin write\", \"admin read\", \
             \"user executable\", \"user write\", and \"user read\""
        );
    }

    #[test]
    fn test_from_str() {
        let set: PermissionSet = "000011".parse().unwrap();
        assert_eq!(set, PermissionSet::user_default());
    }
}
