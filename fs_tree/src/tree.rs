//! File-system tree
//!
//! The [`FileSystem`] owns every entity in an arena keyed by [`EntityId`].
//! Directories hold ordered child ID lists and every non-root entity points
//! back at its parent by ID. Nothing outside the arena holds an entity by
//! value; callers work with IDs or short-lived borrows.

use crate::entity::{Entity, EntityKind};
use crate::path::{PathResolver, PathTarget, HOME_PATH, SEPARATOR};
use core_types::{EntityId, PermissionSet};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors from structural tree operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// No entity with this ID exists
    #[error("Not found: {0}")]
    NotFound(EntityId),

    /// The entity exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(EntityId),

    /// The entity exists but is not a file
    #[error("Not a file: {0}")]
    NotAFile(EntityId),

    /// The root directory cannot be detached
    #[error("The root directory cannot be removed")]
    RootRemoval,

    /// An integrity check failed
    #[error("Corrupted tree: {0}")]
    Corrupted(String),
}

/// The file-system aggregate
///
/// Owns all entities plus the current-directory pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSystem {
    root_id: EntityId,
    current_directory_id: EntityId,
    entities: HashMap<EntityId, Entity>,
}

impl FileSystem {
    /// Creates a file system holding only a root directory
    pub fn new(root_permissions: PermissionSet) -> Self {
        let root = Entity::root(root_permissions);
        let root_id = root.id;
        let mut entities = HashMap::new();
        entities.insert(root_id, root);

        Self {
            root_id,
            current_directory_id: root_id,
            entities,
        }
    }

    /// Returns the root ID
    pub fn root_id(&self) -> EntityId {
        self.root_id
    }

    /// Returns the root directory
    pub fn root(&self) -> &Entity {
        // The root is inserted at construction and can never be detached.
        &self.entities[&self.root_id]
    }

    /// Gets an entity by ID
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Number of entities, root included
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if only the root exists
    pub fn is_empty(&self) -> bool {
        self.entities.len() <= 1
    }

    /// Iterates every entity in no particular order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterates the children of `directory` in order
    ///
    /// Files yield nothing.
    pub fn children_of<'a>(&'a self, directory: &'a Entity) -> impl Iterator<Item = &'a Entity> {
        directory
            .children()
            .iter()
            .filter_map(move |id| self.entities.get(id))
    }

    /// Finds a direct child of `directory` by name
    ///
    /// A child matches on its full name (`name.ext`) or its bare name; the
    /// first matching child wins. Case-sensitive, no recursion.
    pub fn find_by_name_in<'a>(&'a self, directory: &'a Entity, name: &str) -> Option<&'a Entity> {
        self.find_child_where(directory, name, |_| true)
    }

    /// Like [`find_by_name_in`](Self::find_by_name_in), restricted to
    /// children accepted by `filter`
    pub fn find_child_where<'a, F>(
        &'a self,
        directory: &'a Entity,
        name: &str,
        filter: F,
    ) -> Option<&'a Entity>
    where
        F: Fn(&Entity) -> bool,
    {
        self.children_of(directory)
            .find(|child| filter(child) && (child.matches_full_name(name) || child.name == name))
    }

    /// Resolves a directory path starting at `start`
    ///
    /// A leading separator restarts the walk at the root. `.` and `..`
    /// segments stay put or step to the parent. Returns `None` if a segment
    /// is missing or resolves to a file.
    pub fn find_directory<'a>(&'a self, start: &'a Entity, path: &str) -> Option<&'a Entity> {
        let origin = if path.starts_with(SEPARATOR) {
            self.root()
        } else {
            start
        };

        self.walk(origin, &PathResolver::split_path(path))
    }

    /// Finds a directory anywhere in the tree by ID
    pub fn find_directory_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id).filter(|entity| entity.is_directory())
    }

    /// Resolves a file path starting at `start`
    ///
    /// Every segment but the last must be a directory; the last must be a
    /// file.
    pub fn find_file<'a>(&'a self, start: &'a Entity, path: &str) -> Option<&'a Entity> {
        let origin = if path.starts_with(SEPARATOR) {
            self.root()
        } else {
            start
        };

        let components = PathResolver::split_path(path);
        let (file_name, directories) = components.split_last()?;
        let directory = self.walk(origin, directories)?;

        self.find_child_where(directory, file_name, Entity::is_file)
    }

    /// Resolves a user-supplied directory path against the current directory
    ///
    /// Handles the `/`, `root`, `.`, `..` and `~` shorthands, absolute paths
    /// and paths relative to the current directory.
    pub fn resolve_directory(&self, path: &str) -> Option<&Entity> {
        let current = self.current_directory();
        match PathResolver::classify(path) {
            PathTarget::Root => Some(self.root()),
            PathTarget::Current => Some(current),
            PathTarget::Parent => Some(self.parent_of(current)),
            PathTarget::Home => self.home_directory(),
            PathTarget::Absolute(components) => self.walk(self.root(), &components),
            PathTarget::Relative(components) => self.walk(current, &components),
        }
    }

    /// Returns the home directory, if present
    pub fn home_directory(&self) -> Option<&Entity> {
        self.find_directory(self.root(), HOME_PATH)
    }

    /// Returns the parent of `entity`, or the root if it has none
    pub fn parent_of<'a>(&'a self, entity: &'a Entity) -> &'a Entity {
        entity
            .parent_id
            .and_then(|id| self.find_directory_by_id(id))
            .unwrap_or_else(|| self.root())
    }

    /// Absolute path of `entity`, e.g. `/system/config/color.conf`
    ///
    /// The root renders as a single separator.
    pub fn entity_path(&self, entity: &Entity) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(entity);
        let mut steps = 0;

        // Bounded by the arena size so a corrupted parent chain cannot loop.
        while let Some(node) = cursor {
            if node.is_root || steps > self.entities.len() {
                break;
            }
            names.push(node.full_name());
            cursor = node.parent_id.and_then(|id| self.entities.get(&id));
            steps += 1;
        }

        names.reverse();
        format!("{}{}", SEPARATOR, names.join(&SEPARATOR.to_string()))
    }

    /// Absolute path of a directory
    ///
    /// For a file, the path of its containing directory.
    pub fn directory_path(&self, entity: &Entity) -> String {
        if entity.is_directory() {
            self.entity_path(entity)
        } else {
            self.entity_path(self.parent_of(entity))
        }
    }

    /// Path of `entity` relative to the current directory
    pub fn relative_entity_path(&self, entity: &Entity) -> String {
        let absolute = self.entity_path(entity);
        let current = self.entity_path(self.current_directory());
        if current == SEPARATOR.to_string() {
            return absolute.trim_start_matches(SEPARATOR).to_string();
        }

        match absolute.strip_prefix(current.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with(SEPARATOR) => {
                rest.trim_start_matches(SEPARATOR).to_string()
            }
            _ => absolute,
        }
    }

    /// ID of the current directory
    pub fn current_directory_id(&self) -> EntityId {
        self.current_directory_id
    }

    /// The current directory, falling back to the root if it vanished
    pub fn current_directory(&self) -> &Entity {
        self.find_directory_by_id(self.current_directory_id)
            .unwrap_or_else(|| self.root())
    }

    /// Points the current directory at `id`
    ///
    /// Returns false and leaves the pointer untouched if `id` is not a
    /// directory.
    pub fn set_current_directory(&mut self, id: EntityId) -> bool {
        if self.find_directory_by_id(id).is_none() {
            return false;
        }
        self.current_directory_id = id;
        true
    }

    /// Appends `entity` to the children of `parent_id`
    ///
    /// The entity's parent link is rewritten to `parent_id`.
    pub fn insert(&mut self, parent_id: EntityId, mut entity: Entity) -> Result<EntityId, TreeError> {
        let parent = self
            .entities
            .get_mut(&parent_id)
            .ok_or(TreeError::NotFound(parent_id))?;

        let EntityKind::Directory { children } = &mut parent.kind else {
            return Err(TreeError::NotADirectory(parent_id));
        };

        let id = entity.id;
        entity.parent_id = Some(parent_id);
        entity.is_root = false;
        children.push(id);
        self.entities.insert(id, entity);

        Ok(id)
    }

    /// Detaches `id` from `parent_id` and drops its whole subtree
    ///
    /// Returns `Ok(false)` without touching anything if `id` is not a direct
    /// child of `parent_id`.
    pub fn remove_child(&mut self, parent_id: EntityId, id: EntityId) -> Result<bool, TreeError> {
        if id == self.root_id {
            return Err(TreeError::RootRemoval);
        }

        let parent = self
            .entities
            .get_mut(&parent_id)
            .ok_or(TreeError::NotFound(parent_id))?;

        let EntityKind::Directory { children } = &mut parent.kind else {
            return Err(TreeError::NotADirectory(parent_id));
        };

        let Some(position) = children.iter().position(|child| *child == id) else {
            return Ok(false);
        };
        children.remove(position);

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(removed) = self.entities.remove(&next) {
                pending.extend_from_slice(removed.children());
            }
        }

        if !self.entities.contains_key(&self.current_directory_id) {
            self.current_directory_id = parent_id;
        }

        Ok(true)
    }

    /// Replaces the permission set of `id`
    pub fn set_permissions(&mut self, id: EntityId, permissions: PermissionSet) -> Result<(), TreeError> {
        let entity = self.entities.get_mut(&id).ok_or(TreeError::NotFound(id))?;
        entity.permissions = permissions;
        Ok(())
    }

    /// Replaces the contents of the file `id`
    pub fn write_contents(&mut self, id: EntityId, new_contents: impl Into<String>) -> Result<(), TreeError> {
        let entity = self.entities.get_mut(&id).ok_or(TreeError::NotFound(id))?;
        match &mut entity.kind {
            EntityKind::File { contents, .. } => {
                *contents = new_contents.into();
                Ok(())
            }
            EntityKind::Directory { .. } => Err(TreeError::NotAFile(id)),
        }
    }

    /// Checks the structural invariants
    ///
    /// Exactly one root; every non-root parent link resolves to a directory
    /// listing the entity; every entity reachable from the root exactly once.
    pub fn verify_integrity(&self) -> Result<(), TreeError> {
        let roots = self.entities.values().filter(|e| e.is_root).count();
        if roots != 1 || !self.root().is_root || self.root().parent_id.is_some() {
            return Err(TreeError::Corrupted(format!("expected one root, found {}", roots)));
        }

        for entity in self.entities.values().filter(|e| !e.is_root) {
            let parent_id = entity
                .parent_id
                .ok_or_else(|| TreeError::Corrupted(format!("{} has no parent", entity.id)))?;
            let parent = self
                .find_directory_by_id(parent_id)
                .ok_or(TreeError::NotADirectory(parent_id))?;
            if !parent.children().contains(&entity.id) {
                return Err(TreeError::Corrupted(format!(
                    "{} is not listed by its parent",
                    entity.id
                )));
            }
        }

        let mut seen = HashSet::new();
        let mut pending = vec![self.root_id];
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                return Err(TreeError::Corrupted(format!("{} reached twice", id)));
            }
            let entity = self.entities.get(&id).ok_or(TreeError::NotFound(id))?;
            pending.extend_from_slice(entity.children());
        }

        if seen.len() != self.entities.len() {
            return Err(TreeError::Corrupted(format!(
                "{} of {} entities reachable",
                seen.len(),
                self.entities.len()
            )));
        }

        Ok(())
    }

    fn walk<'a>(&'a self, start: &'a Entity, components: &[&str]) -> Option<&'a Entity> {
        if !start.is_directory() {
            return None;
        }

        let mut current = start;
        for component in components {
            current = match *component {
                "." => current,
                ".." => self.parent_of(current),
                name => {
                    let next = self.find_by_name_in(current, name)?;
                    if !next.is_directory() {
                        log::debug!("path segment {:?} is not a directory", name);
                        return None;
                    }
                    next
                }
            };
        }

        Some(current)
    }
}
