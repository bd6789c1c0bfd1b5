//! Tag names and their stable numeric ids.
//!
//! Every tag key the registry cares about is registered once and gets a
//! [`TagId`]. Ids are handed out sequentially and never reused, so an id
//! written to a data file stays valid as long as the registry is rebuilt in
//! the same order.
//!
//! Tags come in two flavours:
//! - *internal*: only needed while classifying and parsing
//! - *external*: also visible to consumers of the processed data
//!
//! Registering an internal tag for external use promotes it; the id stays.
//!
//! # Examples
//!
//! ```
//! use geoclass::registry::TagTable;
//!
//! let mut tags = TagTable::new();
//!
//! let id = tags.register_internal("surface");
//! assert!(tags.info(id).is_internal_only());
//!
//! assert_eq!(tags.register_external("surface"), id);
//! assert!(!tags.info(id).is_internal_only());
//! ```

use hashbrown::HashMap;
use std::collections::BTreeMap;
use std::fmt;

/// Id of a registered tag.
///
/// Id 0 is reserved for the sentinel tag `""`, which stands for "no tag".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TagId(u32);

impl TagId {
    /// The reserved sentinel id.
    pub const IGNORE: TagId = TagId(0);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns true for the sentinel id.
    #[must_use]
    pub const fn is_ignore(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag record of one object, ordered by tag id.
///
/// Tags the registry does not know are dropped by the caller before
/// classification, so every key is a registered id.
pub type TagMap = BTreeMap<TagId, String>;

/// A registered tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    id: TagId,
    name: String,
    internal_only: bool,
}

impl TagInfo {
    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_internal_only(&self) -> bool {
        self.internal_only
    }
}

/// Append-only table of tags.
#[derive(Debug, Clone)]
pub struct TagTable {
    /// Indexed by tag id
    tags: Vec<TagInfo>,

    /// Name to id
    ids: HashMap<String, TagId>,
}

impl TagTable {
    /// Creates a table holding only the sentinel tag `""` with id 0.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            tags: Vec::new(),
            ids: HashMap::new(),
        };

        table.register_internal("");
        table
    }

    fn register(&mut self, name: &str, internal_only: bool) -> TagId {
        if let Some(&id) = self.ids.get(name) {
            if !internal_only {
                self.tags[id.as_usize()].internal_only = false;
            }
            return id;
        }

        let id = TagId::new(self.tags.len() as u32);

        self.tags.push(TagInfo {
            id,
            name: name.to_owned(),
            internal_only,
        });
        self.ids.insert(name.to_owned(), id);

        id
    }

    /// Registers `name` for internal use, returning its id.
    ///
    /// An already registered tag keeps both its id and its visibility.
    pub fn register_internal(&mut self, name: &str) -> TagId {
        self.register(name, true)
    }

    /// Registers `name` for external use, returning its id.
    ///
    /// An already registered internal tag is promoted to external.
    pub fn register_external(&mut self, name: &str) -> TagId {
        self.register(name, false)
    }

    /// Returns the id of `name`, or [`TagId::IGNORE`] if unknown.
    pub fn lookup(&self, name: &str) -> TagId {
        self.ids.get(name).copied().unwrap_or(TagId::IGNORE)
    }

    /// Returns the tag registered under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never handed out by this table.
    pub fn info(&self, id: TagId) -> &TagInfo {
        assert!(
            id.as_usize() < self.tags.len(),
            "tag id {id} is not registered"
        );
        &self.tags[id.as_usize()]
    }

    /// Returns the tag registered under `id`, if any.
    pub fn get(&self, id: TagId) -> Option<&TagInfo> {
        self.tags.get(id.as_usize())
    }

    /// Number of registered tags, including the sentinel.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always false: the sentinel is registered on construction.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates tags in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TagInfo> {
        self.tags.iter()
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new()
    }
}
