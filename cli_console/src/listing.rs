//! Directory listing renderer

use services_directory::Listing;

/// Renders a listing, one entry per line
///
/// Directories carry a trailing `/`. An empty directory renders as an empty
/// string.
pub fn render_listing(listing: &Listing) -> String {
    listing
        .entries
        .iter()
        .map(|entry| {
            if entry.is_directory {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use services_directory::{DirectoryOperations, DirectoryService};

    #[test]
    fn test_render_root() {
        let directory = DirectoryService::bootstrap().unwrap();
        let listing = directory.list(Some("/")).unwrap();
        assert_eq!(render_listing(&listing), "system/\nusers/\ntemp/");
    }

    #[test]
    fn test_render_files() {
        let directory = DirectoryService::bootstrap().unwrap();
        let listing = directory.list(Some("/system/config")).unwrap();
        assert_eq!(render_listing(&listing), "color.conf");
    }

    #[test]
    fn test_render_empty() {
        let directory = DirectoryService::bootstrap().unwrap();
        let listing = directory.list(Some("/system/logs")).unwrap();
        assert_eq!(render_listing(&listing), "");
    }
}
