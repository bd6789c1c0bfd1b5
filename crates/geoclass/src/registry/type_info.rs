//! Type definitions: capabilities, conditions and bound features.
//!
//! A [`TypeInfo`] is built by the caller and handed to
//! [`TypeConfig::add_type`](super::TypeConfig::add_type), which assigns its
//! id and freezes it behind an [`Arc`].
//!
//! # Examples
//!
//! ```
//! use geoclass::condition::{Condition, Operator};
//! use geoclass::feature::FeatureKind;
//! use geoclass::registry::{GeometryKinds, TypeConfig, TypeInfo};
//!
//! let mut config = TypeConfig::new();
//! let highway = config.register_tag_for_external_use("highway");
//!
//! let mut primary = TypeInfo::new("highway_primary");
//! primary
//!     .add_condition(
//!         GeometryKinds::WAY,
//!         Condition::compare(highway, Operator::Eq, "primary"),
//!     )
//!     .set_can_route_car(true);
//! primary.add_feature(FeatureKind::Name).unwrap();
//! primary.add_feature(FeatureKind::MaxSpeed).unwrap();
//!
//! let primary = config.add_type(primary).unwrap();
//! assert!(primary.can_be_way());
//! assert!(!primary.id().is_ignore());
//! ```

use crate::condition::Condition;
use crate::error::{Error, Result};
use crate::feature::{FeatureInstance, FeatureKind, align_offset};
use crate::registry::TagMap;
use bitflags::bitflags;
use std::fmt;
use std::sync::Arc;

/// Id of a registered type.
///
/// Id 0 is reserved for the sentinel type that matches nothing. On a type
/// that is not registered yet, 0 means "assign the next free id".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TypeId(u32);

impl TypeId {
    /// The reserved sentinel id.
    pub const IGNORE: TypeId = TypeId(0);

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

    #[must_use]
    pub const fn is_ignore(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometry of an object being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Node,
    Way,
    Area,
    Relation,
}

impl GeometryKind {
    /// The single-bit mask of this kind.
    pub const fn mask(self) -> GeometryKinds {
        match self {
            GeometryKind::Node => GeometryKinds::NODE,
            GeometryKind::Way => GeometryKinds::WAY,
            GeometryKind::Area => GeometryKinds::AREA,
            GeometryKind::Relation => GeometryKinds::RELATION,
        }
    }
}

bitflags! {
    /// Geometry kinds a type (or one of its conditions) applies to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeometryKinds: u8 {
        const NODE = 1 << 0;
        const WAY = 1 << 1;
        const AREA = 1 << 2;
        const RELATION = 1 << 3;
    }
}

bitflags! {
    /// Travel modes a type can be routed for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RouteModes: u8 {
        const FOOT = 1 << 0;
        const BICYCLE = 1 << 1;
        const CAR = 1 << 2;
    }
}

bitflags! {
    /// Search indexes a type is added to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IndexKinds: u8 {
        const LOCATION = 1 << 0;
        const REGION = 1 << 1;
        const POI = 1 << 2;
    }
}

bitflags! {
    /// Processing hints for downstream stages.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeBehavior: u8 {
        const OPTIMIZE_LOW_ZOOM = 1 << 0;
        const MULTIPOLYGON = 1 << 1;
        const PIN_WAY = 1 << 2;
        const IGNORE_SEA_LAND = 1 << 3;
        const IGNORE = 1 << 4;
    }
}

/// A condition together with the geometry kinds it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCondition {
    pub kinds: GeometryKinds,
    pub condition: Condition,
}

impl TypeCondition {
    pub fn applies_to(&self, kind: GeometryKind) -> bool {
        self.kinds.contains(kind.mask())
    }
}

/// Shared, frozen type.
pub type TypeInfoRef = Arc<TypeInfo>;

/// A classification bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    id: TypeId,
    name: String,

    can_be: GeometryKinds,
    route_modes: RouteModes,
    index_as: IndexKinds,
    behavior: TypeBehavior,

    conditions: Vec<TypeCondition>,
    features: Vec<FeatureInstance>,

    /// Presence bits including the reserved extra bits of every feature
    feature_bits: usize,
    value_size: usize,
}

macro_rules! flag_accessors {
    ($field:ident: $flags:ident { $($getter:ident, $setter:ident => $flag:ident;)* }) => {
        $(
            pub fn $getter(&self) -> bool {
                self.$field.contains($flags::$flag)
            }

            pub fn $setter(&mut self, value: bool) -> &mut Self {
                self.$field.set($flags::$flag, value);
                self
            }
        )*
    };
}

impl TypeInfo {
    /// Creates an unregistered type without capabilities or features.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TypeId::IGNORE,
            name: name.into(),
            can_be: GeometryKinds::empty(),
            route_modes: RouteModes::empty(),
            index_as: IndexKinds::empty(),
            behavior: TypeBehavior::empty(),
            conditions: Vec::new(),
            features: Vec::new(),
            feature_bits: 0,
            value_size: 0,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Requests a specific id. It must not be below the registry's next free id.
    pub fn set_id(&mut self, id: TypeId) -> &mut Self {
        self.id = id;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    flag_accessors!(can_be: GeometryKinds {
        can_be_node, set_can_be_node => NODE;
        can_be_way, set_can_be_way => WAY;
        can_be_area, set_can_be_area => AREA;
        can_be_relation, set_can_be_relation => RELATION;
    });

    flag_accessors!(route_modes: RouteModes {
        can_route_foot, set_can_route_foot => FOOT;
        can_route_bicycle, set_can_route_bicycle => BICYCLE;
        can_route_car, set_can_route_car => CAR;
    });

    flag_accessors!(index_as: IndexKinds {
        index_as_location, set_index_as_location => LOCATION;
        index_as_region, set_index_as_region => REGION;
        index_as_poi, set_index_as_poi => POI;
    });

    flag_accessors!(behavior: TypeBehavior {
        optimize_low_zoom, set_optimize_low_zoom => OPTIMIZE_LOW_ZOOM;
        multipolygon, set_multipolygon => MULTIPOLYGON;
        pin_way, set_pin_way => PIN_WAY;
        ignore_sea_land, set_ignore_sea_land => IGNORE_SEA_LAND;
        ignore, set_ignore => IGNORE;
    });

    pub fn can_be(&self) -> GeometryKinds {
        self.can_be
    }

    pub fn can_be_kind(&self, kind: GeometryKind) -> bool {
        self.can_be.contains(kind.mask())
    }

    pub fn route_modes(&self) -> RouteModes {
        self.route_modes
    }

    /// Routable for at least one travel mode.
    pub fn can_route(&self) -> bool {
        !self.route_modes.is_empty()
    }

    pub fn index_kinds(&self) -> IndexKinds {
        self.index_as
    }

    pub fn behavior(&self) -> TypeBehavior {
        self.behavior
    }

    /// Adds a condition for `kinds`; the type becomes capable of those kinds.
    pub fn add_condition(&mut self, kinds: GeometryKinds, condition: Condition) -> &mut Self {
        self.can_be |= kinds;
        self.conditions.push(TypeCondition { kinds, condition });
        self
    }

    pub fn conditions(&self) -> &[TypeCondition] {
        &self.conditions
    }

    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Returns true if any condition for `kind` matches `tags`.
    pub fn matches(&self, tags: &TagMap, kind: GeometryKind) -> bool {
        self.conditions
            .iter()
            .any(|c| c.applies_to(kind) && c.condition.evaluate(tags))
    }

    /// Appends `kind` to the feature list and assigns its bit and offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFeature`] if the type already has the feature.
    pub fn add_feature(&mut self, kind: FeatureKind) -> Result<()> {
        if self.has_feature(kind) {
            return Err(Error::DuplicateFeature {
                type_name: self.name.clone(),
                feature: kind.name(),
            });
        }

        self.push_feature(kind);
        Ok(())
    }

    /// Appends Address to node and area capable types that lack it.
    pub(crate) fn add_implicit_address(&mut self) {
        if (self.can_be_node() || self.can_be_area()) && !self.has_feature(FeatureKind::Address) {
            self.push_feature(FeatureKind::Address);
        }
    }

    fn push_feature(&mut self, kind: FeatureKind) {
        let offset = match self.features.last() {
            Some(last) => align_offset(last.offset() + last.feature().value_size()),
            None => 0,
        };

        self.features.push(FeatureInstance::new(
            kind,
            self.feature_bits,
            self.features.len(),
            offset,
        ));

        self.feature_bits += 1 + kind.feature_bit_count();
        self.value_size = offset + kind.value_size();
    }

    pub fn has_feature(&self, kind: FeatureKind) -> bool {
        self.feature_index(kind).is_some()
    }

    /// Position of `kind` in the feature list.
    pub fn feature_index(&self, kind: FeatureKind) -> Option<usize> {
        self.features.iter().position(|f| f.feature() == kind)
    }

    pub fn features(&self) -> &[FeatureInstance] {
        &self.features
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn has_features(&self) -> bool {
        !self.features.is_empty()
    }

    /// Number of presence bits.
    pub fn feature_bit_count(&self) -> usize {
        self.feature_bits
    }

    /// Size in bytes of the presence bitset.
    pub fn feature_mask_bytes(&self) -> usize {
        self.feature_bits.div_ceil(8)
    }

    /// Total size of the value area: end of the last feature's value.
    pub fn value_buffer_size(&self) -> usize {
        self.value_size
    }

    pub(crate) fn assign_id(&mut self, id: TypeId) {
        self.id = id;
    }
}
