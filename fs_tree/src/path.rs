//! Path parsing
//!
//! Paths are `/`-delimited. A handful of whole-path shorthands are recognised
//! before any splitting happens: `/` and `root` name the global root, `.` the
//! current directory, `..` its parent and `~` the home directory.

/// Path separator
pub const SEPARATOR: char = '/';

/// Home directory, relative to the root
pub const HOME_PATH: &str = "users/user/home";

/// Where a path starts walking from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTarget<'a> {
    /// The global root (`/` or `root`)
    Root,
    /// The current directory (`.`)
    Current,
    /// Parent of the current directory (`..`)
    Parent,
    /// The home directory (`~`)
    Home,
    /// Components walked from the root
    Absolute(Vec<&'a str>),
    /// Components walked from the current directory
    Relative(Vec<&'a str>),
}

/// Path resolver
///
/// Handles splitting paths into components and validating names.
pub struct PathResolver;

impl PathResolver {
    /// Splits a path into components
    ///
    /// Leading and trailing separators are trimmed and empty components are
    /// skipped, so `a//b/` yields `["a", "b"]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_tree::PathResolver;
    ///
    /// let components = PathResolver::split_path("system/config/");
    /// assert_eq!(components, vec!["system", "config"]);
    ///
    /// let components = PathResolver::split_path("/");
    /// assert!(components.is_empty());
    /// ```
    pub fn split_path(path: &str) -> Vec<&str> {
        path.trim_matches(SEPARATOR)
            .split(SEPARATOR)
            .filter(|component| !component.is_empty())
            .collect()
    }

    /// Classifies a user-supplied path
    ///
    /// Shorthand tokens are matched case-insensitively.
    pub fn classify(path: &str) -> PathTarget<'_> {
        let trimmed = path.trim();
        match trimmed.to_lowercase().as_str() {
            "/" | "root" => return PathTarget::Root,
            "." => return PathTarget::Current,
            ".." => return PathTarget::Parent,
            "~" => return PathTarget::Home,
            _ => {}
        }

        if trimmed.starts_with(SEPARATOR) {
            let components = Self::split_path(trimmed);
            if components.is_empty() {
                PathTarget::Root
            } else {
                PathTarget::Absolute(components)
            }
        } else {
            PathTarget::Relative(Self::split_path(trimmed))
        }
    }

    /// Validates a single entry name
    ///
    /// Returns true if the name can be used for a new file or directory.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(SEPARATOR)
            && !name.contains('\0')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_path() {
        assert_eq!(PathResolver::split_path("home"), vec!["home"]);
    }

    #[test]
    fn test_split_nested_path() {
        assert_eq!(
            PathResolver::split_path("users/user/home"),
            vec!["users", "user", "home"]
        );
    }

    #[test]
    fn test_split_path_with_leading_and_trailing_slash() {
        assert_eq!(
            PathResolver::split_path("/system/config/"),
            vec!["system", "config"]
        );
    }

    #[test]
    fn test_split_skips_empty_components() {
        assert_eq!(PathResolver::split_path("a//b"), vec!["a", "b"]);
        assert!(PathResolver::split_path("///").is_empty());
        assert!(PathResolver::split_path("").is_empty());
    }

    #[test]
    fn test_classify_shorthands() {
        assert_eq!(PathResolver::classify("/"), PathTarget::Root);
        assert_eq!(PathResolver::classify("root"), PathTarget::Root);
        assert_eq!(PathResolver::classify("ROOT"), PathTarget::Root);
        assert_eq!(PathResolver::classify("///"), PathTarget::Root);
        assert_eq!(PathResolver::classify("."), PathTarget::Current);
        assert_eq!(PathResolver::classify(".."), PathTarget::Parent);
        assert_eq!(PathResolver::classify("~"), PathTarget::Home);
    }

    #[test]
    fn test_classify_absolute_and_relative() {
        assert_eq!(
            PathResolver::classify("/system/config/"),
            PathTarget::Absolute(vec!["system", "config"])
        );
        assert_eq!(
            PathResolver::classify("mail"),
            PathTarget::Relative(vec!["mail"])
        );
        assert_eq!(
            PathResolver::classify("../home"),
            PathTarget::Relative(vec!["..", "home"])
        );
    }

    #[test]
    fn test_is_valid_name() {
        assert!(PathResolver::is_valid_name("todo.txt"));
        assert!(PathResolver::is_valid_name("my-file"));
        assert!(PathResolver::is_valid_name("file_123"));

        assert!(!PathResolver::is_valid_name(""));
        assert!(!PathResolver::is_valid_name("."));
        assert!(!PathResolver::is_valid_name(".."));
        assert!(!PathResolver::is_valid_name("has/slash"));
        assert!(!PathResolver::is_valid_name("has\0null"));
    }
}
