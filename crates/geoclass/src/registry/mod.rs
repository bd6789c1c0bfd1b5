//! The type registry.
//!
//! [`TypeConfig`] owns the tag table, the name priority tables, the
//! surface grade table, the feature catalog and every registered type. It
//! is built once (in code or from a `types.dat` file, see
//! [`TypeConfig::load_from_binary`]) and then shared read-only by any number
//! of classification workers.
//!
//! # Lifecycle
//!
//! ```text
//! TypeConfig::new()           sentinel tag/type, well-known tags, features
//!   -> register tags, add types, name/surface tables (or load types.dat)
//!   -> &TypeConfig shared across threads: classify, parse, encode
//! ```
//!
//! # Examples
//!
//! ```
//! use geoclass::condition::Condition;
//! use geoclass::registry::{GeometryKind, GeometryKinds, TagMap, TypeConfig, TypeInfo};
//!
//! let mut config = TypeConfig::new();
//! let building = config.register_tag_for_external_use("building");
//!
//! let mut info = TypeInfo::new("building");
//! info.add_condition(GeometryKinds::AREA, Condition::exists(building));
//! config.add_type(info).unwrap();
//!
//! let mut tags = TagMap::new();
//! tags.insert(building, "yes".to_string());
//!
//! assert_eq!(config.classify(&tags, GeometryKind::Area).name(), "building");
//! assert!(config.classify(&tags, GeometryKind::Node).id().is_ignore());
//! ```

mod store;
mod tag;
mod type_info;

pub use store::TYPES_DATA_FILE;
pub use tag::{TagId, TagInfo, TagMap, TagTable};
pub use type_info::{
    GeometryKind, GeometryKinds, IndexKinds, RouteModes, TypeBehavior, TypeCondition, TypeId,
    TypeInfo, TypeInfoRef,
};

use crate::error::{Error, Result};
use crate::feature::{FeatureDefinition, FeatureKind};
use hashbrown::HashMap;
use std::sync::Arc;

/// Tags known to every registry, visible to data consumers.
const EXTERNAL_TAGS: &[&str] = &[
    "name",
    "ref",
    "bridge",
    "tunnel",
    "layer",
    "width",
    "oneway",
    "addr:housenumber",
    "addr:street",
    "junction",
    "maxspeed",
    "surface",
    "tracktype",
    "admin_level",
    "access",
    "access:forward",
    "access:backward",
    "access:foot",
    "access:foot:forward",
    "access:foot:backward",
    "access:bicycle",
    "access:bicycle:forward",
    "access:bicycle:backward",
    "access:motor_vehicle",
    "access:motor_vehicle:forward",
    "access:motor_vehicle:backward",
    "access:motorcar",
    "access:motorcar:forward",
    "access:motorcar:backward",
];

/// Tags known to every registry, used during import only.
const INTERNAL_TAGS: &[&str] = &["area", "natural", "type", "restriction"];

/// Internal types registered right after the sentinel.
const INTERNAL_TYPES: &[(&str, GeometryKind)] = &[
    ("_route", GeometryKind::Way),
    ("_tile_land", GeometryKind::Area),
    ("_tile_sea", GeometryKind::Area),
    ("_tile_coast", GeometryKind::Area),
    ("_tile_unknown", GeometryKind::Area),
    ("_tile_coastline", GeometryKind::Way),
];

/// Ids of the internal tile types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileTypes {
    pub land: TypeId,
    pub sea: TypeId,
    pub coast: TypeId,
    pub unknown: TypeId,
    pub coastline: TypeId,
}

/// Registry of tags, features and types.
#[derive(Debug, Clone)]
pub struct TypeConfig {
    tags: TagTable,

    name_tags: HashMap<TagId, u32>,
    name_alt_tags: HashMap<TagId, u32>,
    surface_grades: HashMap<String, u8>,

    /// One definition per kind, in catalog order
    features: Vec<FeatureDefinition>,

    /// Registration order; index 0 is the sentinel
    types: Vec<TypeInfoRef>,
    types_by_name: HashMap<String, usize>,
    types_by_id: HashMap<TypeId, usize>,
    next_type_id: u32,

    tag_type: TagId,
    tag_admin_level: TagId,
    tile_types: TileTypes,
}

impl TypeConfig {
    /// Creates a registry with the sentinel tag and type, the well-known
    /// tags, the full feature catalog and the internal types.
    #[must_use]
    pub fn new() -> Self {
        let mut tags = TagTable::new();

        for name in EXTERNAL_TAGS {
            tags.register_external(name);
        }
        for name in INTERNAL_TAGS {
            tags.register_internal(name);
        }

        let features = FeatureKind::ALL
            .into_iter()
            .map(|kind| {
                let mut definition = FeatureDefinition::new(kind);
                definition.initialize(&mut tags);
                definition
            })
            .collect();

        let mut sentinel = TypeInfo::new("");
        sentinel.assign_id(TypeId::IGNORE);

        let mut config = Self {
            tag_type: tags.lookup("type"),
            tag_admin_level: tags.lookup("admin_level"),
            tags,
            name_tags: HashMap::new(),
            name_alt_tags: HashMap::new(),
            surface_grades: HashMap::new(),
            features,
            types: Vec::new(),
            types_by_name: HashMap::new(),
            types_by_id: HashMap::new(),
            next_type_id: 0,
            tile_types: TileTypes::default(),
        };

        config.insert_type(sentinel);

        for (name, kind) in INTERNAL_TYPES {
            let mut info = TypeInfo::new(*name);
            match kind {
                GeometryKind::Way => info.set_can_be_way(true),
                _ => info.set_can_be_area(true),
            };
            config.register_type(info);
        }

        config.tile_types = TileTypes {
            land: config.type_id("_tile_land"),
            sea: config.type_id("_tile_sea"),
            coast: config.type_id("_tile_coast"),
            unknown: config.type_id("_tile_unknown"),
            coastline: config.type_id("_tile_coastline"),
        };

        config
    }

    // ----- tags -----

    /// Registers a tag for internal use. See [`TagTable::register_internal`].
    pub fn register_tag_for_internal_use(&mut self, name: &str) -> TagId {
        self.tags.register_internal(name)
    }

    /// Registers a tag for external use. See [`TagTable::register_external`].
    pub fn register_tag_for_external_use(&mut self, name: &str) -> TagId {
        self.tags.register_external(name)
    }

    /// Id of `name`, or [`TagId::IGNORE`].
    pub fn tag_id(&self, name: &str) -> TagId {
        self.tags.lookup(name)
    }

    /// # Panics
    ///
    /// Panics if `id` is not registered.
    pub fn tag_info(&self, id: TagId) -> &TagInfo {
        self.tags.info(id)
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// Id of the `type` tag, used to detect multipolygon relations.
    pub fn tag_type(&self) -> TagId {
        self.tag_type
    }

    pub fn tag_admin_level(&self) -> TagId {
        self.tag_admin_level
    }

    /// Returns the externally visible `(key, value)` pairs of `tags`.
    pub fn resolve_tags<'a>(&'a self, tags: &'a TagMap) -> Vec<(&'a str, &'a str)> {
        tags.iter()
            .filter_map(|(&id, value)| {
                let info = self.tags.get(id)?;
                (!info.is_internal_only()).then_some((info.name(), value.as_str()))
            })
            .collect()
    }

    // ----- name and surface tables -----

    /// Registers `name` as a name candidate with `priority`.
    ///
    /// The tag becomes external. An existing priority is kept.
    pub fn register_name_tag(&mut self, name: &str, priority: u32) -> TagId {
        let id = self.tags.register_external(name);
        self.name_tags.entry(id).or_insert(priority);
        id
    }

    /// Registers `name` as an alternative name candidate with `priority`.
    pub fn register_name_alt_tag(&mut self, name: &str, priority: u32) -> TagId {
        let id = self.tags.register_external(name);
        self.name_alt_tags.entry(id).or_insert(priority);
        id
    }

    /// Priority of `tag` if it is a name candidate.
    pub fn name_tag_priority(&self, tag: TagId) -> Option<u32> {
        self.name_tags.get(&tag).copied()
    }

    pub fn name_alt_tag_priority(&self, tag: TagId) -> Option<u32> {
        self.name_alt_tags.get(&tag).copied()
    }

    /// Maps a `surface` value to a grade, replacing an earlier mapping.
    pub fn register_surface_grade(&mut self, surface: &str, grade: u8) {
        self.surface_grades.insert(surface.to_owned(), grade);
    }

    pub fn grade_for_surface(&self, surface: &str) -> Option<u8> {
        self.surface_grades.get(surface).copied()
    }

    // ----- features -----

    pub fn feature(&self, kind: FeatureKind) -> &FeatureDefinition {
        &self.features[kind.index()]
    }

    /// Mutable access for adding labels or descriptions while configuring.
    pub fn feature_mut(&mut self, kind: FeatureKind) -> &mut FeatureDefinition {
        &mut self.features[kind.index()]
    }

    pub fn feature_by_name(&self, name: &str) -> Option<&FeatureDefinition> {
        FeatureKind::from_name(name).map(|kind| self.feature(kind))
    }

    pub fn features(&self) -> &[FeatureDefinition] {
        &self.features
    }

    // ----- types -----

    fn insert_type(&mut self, info: TypeInfo) -> TypeInfoRef {
        let id = info.id();
        let index = self.types.len();
        let info = Arc::new(info);

        self.next_type_id = self.next_type_id.max(id.as_u32() + 1);
        self.types_by_name.insert(info.name().to_owned(), index);
        self.types_by_id.insert(id, index);
        self.types.push(Arc::clone(&info));

        geoclass_log::trace!("registered type {} '{}'", id, info.name());

        info
    }

    /// Registers a type whose id is known to be unassigned.
    fn register_type(&mut self, mut info: TypeInfo) -> TypeInfoRef {
        info.add_implicit_address();
        info.assign_id(TypeId::new(self.next_type_id));
        self.insert_type(info)
    }

    /// Registers `info` and returns the shared type.
    ///
    /// If a type with the same name exists, it is returned unchanged and
    /// `info` is dropped. Node and area capable types get the Address
    /// feature appended if they lack it. A type without id gets the next
    /// free id; a requested id is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeIdOutOfOrder`] if the requested id is below the
    /// next free id.
    pub fn add_type(&mut self, mut info: TypeInfo) -> Result<TypeInfoRef> {
        if let Some(existing) = self.type_by_name(info.name()) {
            return Ok(Arc::clone(existing));
        }

        let requested = info.id();

        if requested.is_ignore() {
            return Ok(self.register_type(info));
        }

        if requested.as_u32() < self.next_type_id {
            return Err(Error::TypeIdOutOfOrder {
                name: info.name().to_owned(),
                requested: requested.as_u32(),
                next: self.next_type_id,
            });
        }

        info.add_implicit_address();
        Ok(self.insert_type(info))
    }

    /// All types in registration order, the sentinel first.
    pub fn types(&self) -> &[TypeInfoRef] {
        &self.types
    }

    /// Highest id handed out so far.
    pub fn max_type_id(&self) -> TypeId {
        TypeId::new(self.next_type_id.saturating_sub(1))
    }

    /// The sentinel type with id 0.
    pub fn ignore_type(&self) -> &TypeInfoRef {
        &self.types[0]
    }

    pub fn type_info(&self, id: TypeId) -> Option<&TypeInfoRef> {
        self.types_by_id.get(&id).map(|&index| &self.types[index])
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeInfoRef> {
        self.types_by_name.get(name).map(|&index| &self.types[index])
    }

    /// Id of the type called `name`, or [`TypeId::IGNORE`].
    pub fn type_id(&self, name: &str) -> TypeId {
        self.type_by_name(name)
            .map_or(TypeId::IGNORE, |info| info.id())
    }

    /// Like [`type_id`](Self::type_id), but only if the type can be `kind`.
    pub fn type_id_for(&self, name: &str, kind: GeometryKind) -> TypeId {
        match self.type_by_name(name) {
            Some(info) if info.can_be_kind(kind) => info.id(),
            _ => TypeId::IGNORE,
        }
    }

    pub fn tile_types(&self) -> TileTypes {
        self.tile_types
    }

    fn type_ids_where(&self, predicate: impl Fn(&TypeInfo) -> bool) -> Vec<TypeId> {
        self.types
            .iter()
            .map(|info| &**info)
            .filter(|&info| !info.id().is_ignore() && predicate(info))
            .map(TypeInfo::id)
            .collect()
    }

    /// Area capable types not flagged as ignored.
    pub fn area_types(&self) -> Vec<TypeId> {
        self.type_ids_where(|info| info.can_be_area() && !info.ignore())
    }

    /// Way capable types not flagged as ignored.
    pub fn way_types(&self) -> Vec<TypeId> {
        self.type_ids_where(|info| info.can_be_way() && !info.ignore())
    }

    pub fn routable_types(&self) -> Vec<TypeId> {
        self.type_ids_where(TypeInfo::can_route)
    }

    pub fn index_as_location_types(&self) -> Vec<TypeId> {
        self.type_ids_where(TypeInfo::index_as_location)
    }

    pub fn index_as_region_types(&self) -> Vec<TypeId> {
        self.type_ids_where(TypeInfo::index_as_region)
    }

    pub fn index_as_poi_types(&self) -> Vec<TypeId> {
        self.type_ids_where(TypeInfo::index_as_poi)
    }

    // ----- classification -----

    fn first_match(&self, tags: &TagMap, kind: GeometryKind) -> &TypeInfoRef {
        if tags.is_empty() {
            return self.ignore_type();
        }

        self.types
            .iter()
            .filter(|info| info.has_conditions() && info.can_be_kind(kind))
            .find(|info| info.matches(tags, kind))
            .unwrap_or_else(|| self.ignore_type())
    }

    /// Returns the first registered type of `kind` whose conditions match,
    /// or the sentinel type.
    pub fn classify(&self, tags: &TagMap, kind: GeometryKind) -> &TypeInfoRef {
        self.first_match(tags, kind)
    }

    pub fn node_type(&self, tags: &TagMap) -> &TypeInfoRef {
        self.first_match(tags, GeometryKind::Node)
    }

    /// Classifies a closed way as both way and area in one scan.
    ///
    /// Returns `(way_type, area_type)`; either may be the sentinel.
    pub fn way_area_type(&self, tags: &TagMap) -> (&TypeInfoRef, &TypeInfoRef) {
        let ignore = self.ignore_type();
        let mut way: Option<&TypeInfoRef> = None;
        let mut area: Option<&TypeInfoRef> = None;

        if tags.is_empty() {
            return (ignore, ignore);
        }

        for info in &self.types {
            if !info.has_conditions() || !(info.can_be_way() || info.can_be_area()) {
                continue;
            }

            for cond in info.conditions() {
                let for_way = way.is_none() && cond.applies_to(GeometryKind::Way);
                let for_area = area.is_none() && cond.applies_to(GeometryKind::Area);

                if !(for_way || for_area) || !cond.condition.evaluate(tags) {
                    continue;
                }

                if for_way {
                    way = Some(info);
                }
                if for_area {
                    area = Some(info);
                }
            }

            if way.is_some() && area.is_some() {
                break;
            }
        }

        (way.unwrap_or(ignore), area.unwrap_or(ignore))
    }

    /// Classifies a relation. `type=multipolygon` relations are matched
    /// against area conditions, everything else against relation ones.
    pub fn relation_type(&self, tags: &TagMap) -> &TypeInfoRef {
        let multipolygon = tags
            .get(&self.tag_type)
            .is_some_and(|value| value == "multipolygon");

        if multipolygon {
            self.first_match(tags, GeometryKind::Area)
        } else {
            self.first_match(tags, GeometryKind::Relation)
        }
    }
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, Operator};

    fn record(config: &TypeConfig, pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(key, value)| (config.tag_id(key), value.to_string()))
            .collect()
    }

    #[test]
    fn test_new_registers_sentinels() {
        let config = TypeConfig::new();

        assert_eq!(config.tag_id(""), TagId::IGNORE);
        assert_eq!(config.ignore_type().id(), TypeId::IGNORE);
        assert_eq!(config.ignore_type().name(), "");
        assert!(!config.ignore_type().has_features());
    }

    #[test]
    fn test_new_registers_well_known_tags() {
        let config = TypeConfig::new();

        assert_eq!(config.tag_id("name").as_u32(), 1);
        assert!(!config.tag_info(config.tag_id("access:motorcar:forward")).is_internal_only());
        assert!(config.tag_info(config.tag_type()).is_internal_only());
        assert_eq!(config.tags().len(), 1 + EXTERNAL_TAGS.len() + INTERNAL_TAGS.len());
    }

    #[test]
    fn test_internal_types() {
        let config = TypeConfig::new();
        let names: Vec<_> = config.types().iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec!["", "_route", "_tile_land", "_tile_sea", "_tile_coast", "_tile_unknown", "_tile_coastline"]
        );

        assert_eq!(config.tile_types().land.as_u32(), 2);
        assert_eq!(config.tile_types().coastline.as_u32(), 6);
        assert_eq!(config.max_type_id().as_u32(), 6);

        // areas get the implicit address feature, ways do not
        assert!(config.type_by_name("_tile_sea").unwrap().has_feature(FeatureKind::Address));
        assert!(!config.type_by_name("_route").unwrap().has_features());
    }

    #[test]
    fn test_add_type_is_idempotent_by_name() {
        let mut config = TypeConfig::new();

        let first = config.add_type(TypeInfo::new("amenity")).unwrap();
        let mut again = TypeInfo::new("amenity");
        again.set_can_be_node(true);
        let second = config.add_type(again).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!second.can_be_node());
    }

    #[test]
    fn test_add_type_assigns_sequential_ids() {
        let mut config = TypeConfig::new();
        let next = config.max_type_id().as_u32() + 1;

        let a = config.add_type(TypeInfo::new("a")).unwrap();
        let b = config.add_type(TypeInfo::new("b")).unwrap();

        assert_eq!(a.id().as_u32(), next);
        assert_eq!(b.id().as_u32(), next + 1);
        assert_eq!(config.type_info(b.id()).unwrap().name(), "b");
    }

    #[test]
    fn test_requested_id() {
        let mut config = TypeConfig::new();

        let mut info = TypeInfo::new("late");
        info.set_id(TypeId::new(100));
        assert_eq!(config.add_type(info).unwrap().id().as_u32(), 100);
        assert_eq!(config.add_type(TypeInfo::new("after")).unwrap().id().as_u32(), 101);

        let mut early = TypeInfo::new("early");
        early.set_id(TypeId::new(50));
        assert_eq!(
            config.add_type(early),
            Err(Error::TypeIdOutOfOrder {
                name: "early".into(),
                requested: 50,
                next: 102
            })
        );
    }

    #[test]
    fn test_implicit_address_not_duplicated() {
        let mut config = TypeConfig::new();

        let mut info = TypeInfo::new("shop");
        info.set_can_be_node(true);
        info.add_feature(FeatureKind::Address).unwrap();
        info.add_feature(FeatureKind::Name).unwrap();

        let shop = config.add_type(info).unwrap();
        assert_eq!(shop.feature_count(), 2);
        assert_eq!(shop.feature_index(FeatureKind::Address), Some(0));
    }

    #[test]
    fn test_implicit_address_with_requested_id() {
        let mut config = TypeConfig::new();

        let mut info = TypeInfo::new("kiosk");
        info.set_id(TypeId::new(60)).set_can_be_area(true);
        info.add_feature(FeatureKind::Name).unwrap();
        let kiosk = config.add_type(info).unwrap();
        assert_eq!(kiosk.feature_index(FeatureKind::Address), Some(1));

        let mut info = TypeInfo::new("path");
        info.set_id(TypeId::new(61)).set_can_be_way(true);
        let path = config.add_type(info).unwrap();
        assert!(!path.has_feature(FeatureKind::Address));
    }

    #[test]
    fn test_name_priorities_keep_first_registration() {
        let mut config = TypeConfig::new();

        let id = config.register_name_tag("name:en", 2);
        config.register_name_tag("name:en", 9);

        assert_eq!(config.name_tag_priority(id), Some(2));
        assert!(!config.tag_info(id).is_internal_only());
        assert_eq!(config.name_alt_tag_priority(id), None);
    }

    #[test]
    fn test_surface_grades() {
        let mut config = TypeConfig::new();
        config.register_surface_grade("asphalt", 1);
        config.register_surface_grade("gravel", 3);

        assert_eq!(config.grade_for_surface("gravel"), Some(3));
        assert_eq!(config.grade_for_surface("lava"), None);
    }

    #[test]
    fn test_feature_lookup() {
        let mut config = TypeConfig::new();

        assert_eq!(config.feature_by_name("MaxSpeed").unwrap().kind(), FeatureKind::MaxSpeed);
        assert!(config.feature_by_name("Speed").is_none());

        config.feature_mut(FeatureKind::Width).add_description("de", "Breite");
        assert_eq!(config.feature(FeatureKind::Width).description("de"), Some("Breite"));
    }

    #[test]
    fn test_type_sets() {
        let mut config = TypeConfig::new();

        let mut forest = TypeInfo::new("forest");
        forest.set_can_be_area(true).set_index_as_region(true);
        config.add_type(forest).unwrap();

        let mut hidden = TypeInfo::new("hidden");
        hidden.set_can_be_area(true).set_ignore(true);
        config.add_type(hidden).unwrap();

        let mut road = TypeInfo::new("road");
        road.set_can_be_way(true).set_can_route_car(true).set_index_as_poi(true);
        config.add_type(road).unwrap();

        let areas = config.area_types();
        assert!(areas.contains(&config.type_id("forest")));
        assert!(!areas.contains(&config.type_id("hidden")));
        assert!(!areas.contains(&TypeId::IGNORE));

        assert!(config.way_types().contains(&config.type_id("road")));
        assert_eq!(config.routable_types(), vec![config.type_id("road")]);
        assert_eq!(config.index_as_region_types(), vec![config.type_id("forest")]);
        assert_eq!(config.index_as_poi_types(), vec![config.type_id("road")]);
        assert!(config.index_as_location_types().is_empty());

        assert_eq!(config.type_id_for("road", GeometryKind::Way), config.type_id("road"));
        assert_eq!(config.type_id_for("road", GeometryKind::Node), TypeId::IGNORE);
    }

    #[test]
    fn test_resolve_tags_skips_internal() {
        let mut config = TypeConfig::new();
        config.register_tag_for_internal_use("source");

        let tags = record(&config, &[("name", "Elm"), ("source", "survey"), ("area", "yes")]);
        assert_eq!(config.resolve_tags(&tags), vec![("name", "Elm")]);
    }

    #[test]
    fn test_classify_first_match_wins() {
        let mut config = TypeConfig::new();
        let highway = config.register_tag_for_external_use("highway");

        let mut primary = TypeInfo::new("primary");
        primary.add_condition(
            GeometryKinds::WAY,
            Condition::compare(highway, Operator::Eq, "primary"),
        );
        config.add_type(primary).unwrap();

        let mut any = TypeInfo::new("any_highway");
        any.add_condition(GeometryKinds::WAY, Condition::exists(highway));
        config.add_type(any).unwrap();

        let tags = record(&config, &[("highway", "primary")]);
        assert_eq!(config.classify(&tags, GeometryKind::Way).name(), "primary");

        let tags = record(&config, &[("highway", "track")]);
        assert_eq!(config.classify(&tags, GeometryKind::Way).name(), "any_highway");
        assert!(config.node_type(&tags).id().is_ignore());
        assert!(config.classify(&TagMap::new(), GeometryKind::Way).id().is_ignore());
    }

    #[test]
    fn test_way_area_tracked_independently() {
        let mut config = TypeConfig::new();
        let highway = config.register_tag_for_external_use("highway");
        let area = config.tag_id("area");

        let mut square = TypeInfo::new("pedestrian_area");
        square.add_condition(
            GeometryKinds::AREA,
            Condition::and(vec![
                Condition::compare(highway, Operator::Eq, "pedestrian"),
                Condition::compare(area, Operator::Eq, "yes"),
            ]),
        );
        config.add_type(square).unwrap();

        let mut street = TypeInfo::new("pedestrian");
        street.add_condition(
            GeometryKinds::WAY | GeometryKinds::AREA,
            Condition::compare(highway, Operator::Eq, "pedestrian"),
        );
        config.add_type(street).unwrap();

        let tags = record(&config, &[("highway", "pedestrian"), ("area", "yes")]);
        let (way, area_type) = config.way_area_type(&tags);
        assert_eq!(way.name(), "pedestrian");
        assert_eq!(area_type.name(), "pedestrian_area");

        let tags = record(&config, &[("highway", "pedestrian")]);
        let (way, area_type) = config.way_area_type(&tags);
        assert_eq!(way.name(), "pedestrian");
        assert_eq!(area_type.name(), "pedestrian");

        let (way, area_type) = config.way_area_type(&TagMap::new());
        assert!(way.id().is_ignore() && area_type.id().is_ignore());
    }

    #[test]
    fn test_relation_multipolygon_uses_area_types() {
        let mut config = TypeConfig::new();
        let landuse = config.register_tag_for_external_use("landuse");
        let route = config.register_tag_for_external_use("route");

        let mut forest = TypeInfo::new("landuse_forest");
        forest.add_condition(GeometryKinds::AREA, Condition::exists(landuse));
        config.add_type(forest).unwrap();

        let mut bus = TypeInfo::new("route_bus");
        bus.add_condition(GeometryKinds::RELATION, Condition::exists(route));
        config.add_type(bus).unwrap();

        let tags = record(&config, &[("type", "multipolygon"), ("landuse", "forest")]);
        assert_eq!(config.relation_type(&tags).name(), "landuse_forest");

        let tags = record(&config, &[("type", "route"), ("landuse", "forest")]);
        assert!(config.relation_type(&tags).id().is_ignore());

        let tags = record(&config, &[("type", "route"), ("route", "bus")]);
        assert_eq!(config.relation_type(&tags).name(), "route_bus");
    }
}
