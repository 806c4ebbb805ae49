//! Directory Service implementation
//!
//! This module provides the service that owns the file system and implements
//! the directory operations.

use crate::operations::{DirectoryOperations, Listing, ListingEntry, OperationError};
use core_types::{EntityId, Permission, PermissionSet};
use fs_tree::{split_file_name, Entity, FileSystem, PathResolver, PathTarget};

/// The Directory Service
///
/// Sole owner of the [`FileSystem`]. Navigation and lookups go through
/// here; so do all mutations.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    fs: FileSystem,
}

impl DirectoryService {
    /// Wraps an existing file system
    pub fn new(fs: FileSystem) -> Self {
        Self { fs }
    }

    /// Creates a service over the default bootstrap layout
    pub fn bootstrap() -> Result<Self, OperationError> {
        Ok(Self::new(fs_tree::bootstrap()?))
    }

    /// Read access to the underlying file system
    pub fn file_system(&self) -> &FileSystem {
        &self.fs
    }

    /// Gets an entity by ID
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.fs.get(id)
    }

    /// The root directory
    pub fn root(&self) -> &Entity {
        self.fs.root()
    }

    /// The home directory, if present
    pub fn home_directory(&self) -> Option<&Entity> {
        self.fs.home_directory()
    }

    /// The current directory
    pub fn current_directory(&self) -> &Entity {
        self.fs.current_directory()
    }

    /// Absolute path of the current directory
    pub fn current_path(&self) -> String {
        self.fs.entity_path(self.fs.current_directory())
    }

    /// Absolute path of an entity
    pub fn entity_path(&self, entity: &Entity) -> String {
        self.fs.entity_path(entity)
    }

    /// Parent of `entity`, or the root if it has none
    pub fn parent_directory<'a>(&'a self, entity: &'a Entity) -> &'a Entity {
        self.fs.parent_of(entity)
    }

    /// Changes the current directory by ID
    ///
    /// Does nothing if `id` is not a directory.
    pub fn set_current_directory(&mut self, id: EntityId) {
        if !self.fs.set_current_directory(id) {
            log::debug!("ignoring change to non-directory {}", id);
        }
    }

    /// Changes the current directory by path
    ///
    /// Does nothing if the path does not resolve to a directory.
    pub fn set_current_directory_path(&mut self, path: &str) {
        if let Some(id) = self.resolve_directory(path).map(|directory| directory.id) {
            self.set_current_directory(id);
        }
    }

    /// Resolves a user-supplied directory path
    ///
    /// Understands `/`, `root`, `.`, `..` and `~`. Relative paths are tried
    /// against the current directory first, then against the root.
    pub fn resolve_directory(&self, path: &str) -> Option<&Entity> {
        self.fs.resolve_directory(path).or_else(|| {
            match PathResolver::classify(path) {
                PathTarget::Relative(_) => self.fs.find_directory(self.fs.root(), path),
                _ => None,
            }
        })
    }

    /// Resolves a file path relative to the current directory
    pub fn resolve_file(&self, path: &str) -> Option<&Entity> {
        self.fs.find_file(self.fs.current_directory(), path)
    }

    /// Finds a direct child of the current directory by name
    pub fn find_in_current(&self, name: &str) -> Result<&Entity, OperationError> {
        self.find_in_current_where(name, |_| true)
    }

    /// Finds a file among the direct children of the current directory
    pub fn find_file_in_current(&self, name: &str) -> Result<&Entity, OperationError> {
        self.find_in_current_where(name, Entity::is_file)
    }

    /// Finds a directory among the direct children of the current directory
    pub fn find_directory_in_current(&self, name: &str) -> Result<&Entity, OperationError> {
        self.find_in_current_where(name, Entity::is_directory)
    }

    fn find_in_current_where(
        &self,
        name: &str,
        filter: fn(&Entity) -> bool,
    ) -> Result<&Entity, OperationError> {
        if name.is_empty() {
            log::warn!("lookup called with an empty name");
            return Err(OperationError::EmptyName);
        }

        self.fs
            .find_child_where(self.fs.current_directory(), name, filter)
            .ok_or_else(|| OperationError::NotFound(name.to_string()))
    }

    /// Returns true if the current directory carries `permission`
    pub fn current_directory_allows(&self, permission: Permission) -> bool {
        self.fs.current_directory().permissions.contains(permission)
    }

    fn validate_name(name: &str) -> Result<(), OperationError> {
        if name.is_empty() {
            log::warn!("create called with an empty name");
            return Err(OperationError::EmptyName);
        }
        if !PathResolver::is_valid_name(name) {
            return Err(OperationError::InvalidName(name.to_string()));
        }
        Ok(())
    }
}

impl DirectoryOperations for DirectoryService {
    fn create_file(&mut self, name: &str) -> Result<EntityId, OperationError> {
        Self::validate_name(name)?;

        let parent = self.fs.current_directory_id();
        let (base, extension) = split_file_name(name);
        let file = Entity::file(base, extension, "", parent, PermissionSet::user_default());
        let id = self.fs.insert(parent, file)?;

        log::info!("created file {:?} in {}", name, self.current_path());
        Ok(id)
    }

    fn create_directory(&mut self, name: &str) -> Result<EntityId, OperationError> {
        Self::validate_name(name)?;

        let parent = self.fs.current_directory_id();
        let directory = Entity::directory(name, parent, PermissionSet::user_default());
        let id = self.fs.insert(parent, directory)?;

        log::info!("created directory {:?} in {}", name, self.current_path());
        Ok(id)
    }

    fn delete_entity(&mut self, id: EntityId) -> Result<bool, OperationError> {
        let parent = self.fs.current_directory_id();
        let removed = self.fs.remove_child(parent, id)?;

        if removed {
            log::info!("deleted {} from {}", id, self.current_path());
        } else {
            log::debug!("{} is not a member of the current directory", id);
        }
        Ok(removed)
    }

    fn write_file(&mut self, id: EntityId, contents: &str) -> Result<(), OperationError> {
        self.fs.write_contents(id, contents)?;
        log::info!("wrote {} bytes to {}", contents.len(), id);
        Ok(())
    }

    fn set_permissions(&mut self, id: EntityId, permissions: PermissionSet) -> Result<(), OperationError> {
        self.fs.set_permissions(id, permissions)?;
        log::info!("set permissions of {} to {}", id, permissions);
        Ok(())
    }

    fn list(&self, path: Option<&str>) -> Result<Listing, OperationError> {
        let directory = match path {
            Some(path) => self
                .resolve_directory(path)
                .ok_or_else(|| OperationError::NotADirectory(path.to_string()))?,
            None => self.fs.current_directory(),
        };

        let directory_path = self.fs.entity_path(directory);
        if !directory.permissions.contains(Permission::UserRead) {
            return Err(OperationError::InsufficientPermission(directory_path));
        }

        let entries = self
            .fs
            .children_of(directory)
            .map(|child| ListingEntry {
                id: child.id,
                name: child.full_name(),
                is_directory: child.is_directory(),
                permissions: child.permissions,
            })
            .collect();

        Ok(Listing {
            path: directory_path,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> DirectoryService {
        DirectoryService::bootstrap().unwrap()
    }

    #[test]
    fn test_service_starts_at_home() {
        let service = service();
        assert_eq!(service.current_path(), "/users/user/home");
    }

    #[test]
    fn test_create_file_splits_extension() {
        let mut service = service();
        let id = service.create_file("report.txt").unwrap();
        let file = service.get(id).unwrap();

        assert!(file.is_file());
        assert_eq!(file.name, "report");
        assert_eq!(file.extension(), Some("txt"));
        assert_eq!(file.permissions, PermissionSet::user_default());
        assert_eq!(file.parent_id, Some(service.current_directory().id));
    }

    #[test]
    fn test_create_file_keeps_inner_dots() {
        let mut service = service();
        let id = service.create_file("archive.tar.gz").unwrap();
        let file = service.get(id).unwrap();
        assert_eq!(file.name, "archive.tar");
        assert_eq!(file.extension(), Some("gz"));
    }

    #[test]
    fn test_create_rejects_empty_and_invalid_names() {
        let mut service = service();
        assert_eq!(service.create_file(""), Err(OperationError::EmptyName));
        assert_eq!(service.create_directory(""), Err(OperationError::EmptyName));
        assert!(matches!(
            service.create_directory("a/b"),
            Err(OperationError::InvalidName(_))
        ));
    }

    #[test]
    fn test_create_directory_appends_child() {
        let mut service = service();
        let before = service.current_directory().children().len();
        let id = service.create_directory("projects").unwrap();

        let current = service.current_directory();
        assert_eq!(current.children().len(), before + 1);
        assert_eq!(current.children().last(), Some(&id));
    }

    #[test]
    fn test_delete_non_member_is_noop() {
        let mut service = service();
        let color = service
            .file_system()
            .find_file(service.root(), "system/config/color.conf")
            .unwrap()
            .id;
        let count = service.file_system().len();

        assert_eq!(service.delete_entity(color), Ok(false));
        assert_eq!(service.file_system().len(), count);
        assert!(service.get(color).is_some());
    }

    #[test]
    fn test_find_in_current() {
        let service = service();
        assert!(service.find_in_current("mail").unwrap().is_directory());
        assert_eq!(service.find_in_current(""), Err(OperationError::EmptyName));
        assert_eq!(
            service.find_in_current("nope"),
            Err(OperationError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_find_by_kind_in_current() {
        let mut service = service();
        service.create_directory("notes").unwrap();
        let file = service.create_file("notes.txt").unwrap();

        assert_eq!(service.find_file_in_current("notes").unwrap().id, file);
        assert!(service.find_directory_in_current("notes").unwrap().is_directory());
        assert!(matches!(
            service.find_file_in_current("mail"),
            Err(OperationError::NotFound(_))
        ));
    }

    #[test]
    fn test_set_current_directory_ignores_files() {
        let mut service = service();
        let mail = service.find_in_current("mail").unwrap().id;
        service.set_current_directory(mail);
        let welcome = service.find_in_current("welcome-to-terminal-os.mail").unwrap().id;

        service.set_current_directory(welcome);
        assert_eq!(service.current_directory().id, mail);
    }

    #[test]
    fn test_set_current_directory_path_falls_back_to_root() {
        let mut service = service();
        service.set_current_directory_path("system/config");
        assert_eq!(service.current_path(), "/system/config");

        service.set_current_directory_path("does/not/exist");
        assert_eq!(service.current_path(), "/system/config");
    }

    #[test]
    fn test_parent_directory_of_root_is_root() {
        let service = service();
        let root = service.root();
        assert_eq!(service.parent_directory(root).id, root.id);
    }

    #[test]
    fn test_list_current_directory() {
        let service = service();
        let listing = service.list(None).unwrap();
        assert_eq!(listing.path, "/users/user/home");
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].name, "mail");
        assert!(listing.entries[0].is_directory);
    }

    #[test]
    fn test_list_missing_directory() {
        let service = service();
        assert!(matches!(
            service.list(Some("/nowhere")),
            Err(OperationError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_write_file_rejects_directory() {
        let mut service = service();
        let mail = service.find_in_current("mail").unwrap().id;
        assert!(matches!(
            service.write_file(mail, "x"),
            Err(OperationError::Tree(_))
        ));
    }
}
