//! Feature catalog: attribute extractors bound to types.
//!
//! A feature turns the raw tags of an object into one typed attribute
//! value (a name, an access mask, a speed limit, ...). The catalog is
//! closed: [`FeatureKind`] names the twelve built-in features and
//! [`Feature`] holds one definition per kind, each carrying the tag ids it
//! registered in [`Feature::initialize`].
//!
//! Types reference features through [`FeatureInstance`] entries, which
//! record where the feature's presence bit and value slot live inside a
//! [`FeatureValueBuffer`](crate::FeatureValueBuffer).
//!
//! # Value layout
//!
//! Each feature declares a value size (the in-memory size of its typed
//! value, 0 for presence-only features). Offsets are assigned when the
//! feature is appended to a type:
//!
//! ```text
//! offset(0) = 0
//! offset(n) = round_up(offset(n - 1) + value_size(n - 1), ALIGNMENT)
//! ```

mod access;
mod address;
mod flags;
mod grade;
mod name;
mod numeric;
mod value;

pub use access::{Access, AccessFeature};
pub use address::AddressFeature;
pub use flags::{BridgeFeature, RoundaboutFeature, TunnelFeature};
pub use grade::GradeFeature;
pub use name::{NameAltFeature, NameFeature, RefFeature};
pub use numeric::{LayerFeature, MaxSpeedFeature, WidthFeature};
pub use value::FeatureValue;

use crate::diagnostic::{DiagnosticSink, ObjectRef};
use crate::registry::{TagTable, TagMap, TypeConfig, TypeInfo};
use std::collections::BTreeMap;
use std::fmt;
use std::mem::size_of;

/// Alignment of every feature value offset: the larger of the platform
/// word and pointer sizes.
pub const ALIGNMENT: usize = if size_of::<usize>() > size_of::<*const ()>() {
    size_of::<usize>()
} else {
    size_of::<*const ()>()
};

/// Rounds `offset` up to the next multiple of [`ALIGNMENT`].
#[must_use]
pub const fn align_offset(offset: usize) -> usize {
    offset.div_ceil(ALIGNMENT) * ALIGNMENT
}

/// Handle of a built-in feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureKind {
    Name,
    NameAlt,
    Ref,
    Address,
    Access,
    Layer,
    Width,
    MaxSpeed,
    Grade,
    Bridge,
    Tunnel,
    Roundabout,
}

impl FeatureKind {
    /// Every kind, in catalog order.
    pub const ALL: [FeatureKind; 12] = [
        FeatureKind::Name,
        FeatureKind::NameAlt,
        FeatureKind::Ref,
        FeatureKind::Address,
        FeatureKind::Access,
        FeatureKind::Layer,
        FeatureKind::Width,
        FeatureKind::MaxSpeed,
        FeatureKind::Grade,
        FeatureKind::Bridge,
        FeatureKind::Tunnel,
        FeatureKind::Roundabout,
    ];

    /// Position of this kind in [`FeatureKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The registry-wide unique feature name.
    pub const fn name(self) -> &'static str {
        match self {
            FeatureKind::Name => "Name",
            FeatureKind::NameAlt => "NameAlt",
            FeatureKind::Ref => "Ref",
            FeatureKind::Address => "Address",
            FeatureKind::Access => "Access",
            FeatureKind::Layer => "Layer",
            FeatureKind::Width => "Width",
            FeatureKind::MaxSpeed => "MaxSpeed",
            FeatureKind::Grade => "Grade",
            FeatureKind::Bridge => "Bridge",
            FeatureKind::Tunnel => "Tunnel",
            FeatureKind::Roundabout => "Roundabout",
        }
    }

    /// Looks up a kind by its feature name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// In-memory size of the feature's value, 0 for presence-only kinds.
    pub const fn value_size(self) -> usize {
        match self {
            FeatureKind::Name | FeatureKind::NameAlt | FeatureKind::Ref => size_of::<String>(),
            FeatureKind::Address => 2 * size_of::<String>(),
            FeatureKind::Access => size_of::<Access>(),
            FeatureKind::Layer => size_of::<i8>(),
            FeatureKind::Width | FeatureKind::MaxSpeed | FeatureKind::Grade => size_of::<u8>(),
            FeatureKind::Bridge | FeatureKind::Tunnel | FeatureKind::Roundabout => 0,
        }
    }

    /// Returns true if the feature stores a value next to its presence bit.
    pub const fn has_value(self) -> bool {
        self.value_size() > 0
    }

    /// Extra bits the feature reserves after its presence bit.
    pub const fn feature_bit_count(self) -> usize {
        0
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A feature bound to one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInstance {
    feature: FeatureKind,
    feature_bit: usize,
    index: usize,
    offset: usize,
}

impl FeatureInstance {
    pub(crate) fn new(feature: FeatureKind, feature_bit: usize, index: usize, offset: usize) -> Self {
        Self {
            feature,
            feature_bit,
            index,
            offset,
        }
    }

    pub fn feature(&self) -> FeatureKind {
        self.feature
    }

    /// Index of the presence bit.
    pub fn feature_bit(&self) -> usize {
        self.feature_bit
    }

    /// Position in the type's feature list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset of the value inside the type's value area.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Everything a feature may look at while parsing one object.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub config: &'a TypeConfig,
    pub type_info: &'a TypeInfo,
    pub object: ObjectRef,
    pub sink: &'a dyn DiagnosticSink,
}

impl ParseContext<'_> {
    pub(crate) fn warn(&self, message: &str) {
        self.sink.warn(&self.object, message);
    }
}

/// The definition of one built-in feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    Name(NameFeature),
    NameAlt(NameAltFeature),
    Ref(RefFeature),
    Address(AddressFeature),
    Access(AccessFeature),
    Layer(LayerFeature),
    Width(WidthFeature),
    MaxSpeed(MaxSpeedFeature),
    Grade(GradeFeature),
    Bridge(BridgeFeature),
    Tunnel(TunnelFeature),
    Roundabout(RoundaboutFeature),
}

impl Feature {
    /// Creates an uninitialized definition of `kind`.
    #[must_use]
    pub fn new(kind: FeatureKind) -> Self {
        match kind {
            FeatureKind::Name => Feature::Name(NameFeature),
            FeatureKind::NameAlt => Feature::NameAlt(NameAltFeature),
            FeatureKind::Ref => Feature::Ref(RefFeature::default()),
            FeatureKind::Address => Feature::Address(AddressFeature::default()),
            FeatureKind::Access => Feature::Access(AccessFeature::default()),
            FeatureKind::Layer => Feature::Layer(LayerFeature::default()),
            FeatureKind::Width => Feature::Width(WidthFeature::default()),
            FeatureKind::MaxSpeed => Feature::MaxSpeed(MaxSpeedFeature::default()),
            FeatureKind::Grade => Feature::Grade(GradeFeature::default()),
            FeatureKind::Bridge => Feature::Bridge(BridgeFeature::default()),
            FeatureKind::Tunnel => Feature::Tunnel(TunnelFeature::default()),
            FeatureKind::Roundabout => Feature::Roundabout(RoundaboutFeature::default()),
        }
    }

    pub fn kind(&self) -> FeatureKind {
        match self {
            Feature::Name(_) => FeatureKind::Name,
            Feature::NameAlt(_) => FeatureKind::NameAlt,
            Feature::Ref(_) => FeatureKind::Ref,
            Feature::Address(_) => FeatureKind::Address,
            Feature::Access(_) => FeatureKind::Access,
            Feature::Layer(_) => FeatureKind::Layer,
            Feature::Width(_) => FeatureKind::Width,
            Feature::MaxSpeed(_) => FeatureKind::MaxSpeed,
            Feature::Grade(_) => FeatureKind::Grade,
            Feature::Bridge(_) => FeatureKind::Bridge,
            Feature::Tunnel(_) => FeatureKind::Tunnel,
            Feature::Roundabout(_) => FeatureKind::Roundabout,
        }
    }

    /// Registers the tags this feature reads. Safe to call repeatedly.
    pub fn initialize(&mut self, tags: &mut TagTable) {
        match self {
            Feature::Name(_) | Feature::NameAlt(_) => {}
            Feature::Ref(f) => f.initialize(tags),
            Feature::Address(f) => f.initialize(tags),
            Feature::Access(f) => f.initialize(tags),
            Feature::Layer(f) => f.initialize(tags),
            Feature::Width(f) => f.initialize(tags),
            Feature::MaxSpeed(f) => f.initialize(tags),
            Feature::Grade(f) => f.initialize(tags),
            Feature::Bridge(f) => f.initialize(tags),
            Feature::Tunnel(f) => f.initialize(tags),
            Feature::Roundabout(f) => f.initialize(tags),
        }
    }

    /// Extracts the feature from `tags`.
    ///
    /// Returns `None` if the object does not carry the feature. Malformed
    /// values are reported through the context's sink.
    pub fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        match self {
            Feature::Name(f) => f.parse(tags, ctx),
            Feature::NameAlt(f) => f.parse(tags, ctx),
            Feature::Ref(f) => f.parse(tags),
            Feature::Address(f) => f.parse(tags),
            Feature::Access(f) => f.parse(tags, ctx),
            Feature::Layer(f) => f.parse(tags, ctx),
            Feature::Width(f) => f.parse(tags, ctx),
            Feature::MaxSpeed(f) => f.parse(tags, ctx),
            Feature::Grade(f) => f.parse(tags, ctx),
            Feature::Bridge(f) => f.parse(tags),
            Feature::Tunnel(f) => f.parse(tags),
            Feature::Roundabout(f) => f.parse(tags),
        }
    }
}

/// A feature together with its label table and descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDefinition {
    feature: Feature,
    labels: Vec<String>,
    descriptions: BTreeMap<String, String>,
}

impl FeatureDefinition {
    /// Creates the built-in definition of `kind` with its default labels
    /// and English description.
    #[must_use]
    pub fn new(kind: FeatureKind) -> Self {
        let mut definition = Self {
            feature: Feature::new(kind),
            labels: Vec::new(),
            descriptions: BTreeMap::new(),
        };

        match kind {
            FeatureKind::Name | FeatureKind::NameAlt | FeatureKind::Ref => {
                definition.add_label("name");
            }
            FeatureKind::Address => {
                definition.add_label("name");
                definition.add_label("location");
            }
            _ => {}
        }

        definition.add_description("en", default_description(kind));
        definition
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn kind(&self) -> FeatureKind {
        self.feature.kind()
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn value_size(&self) -> usize {
        self.kind().value_size()
    }

    pub fn has_value(&self) -> bool {
        self.kind().has_value()
    }

    pub fn feature_bit_count(&self) -> usize {
        self.kind().feature_bit_count()
    }

    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.feature.initialize(tags);
    }

    pub fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        self.feature.parse(tags, ctx)
    }

    /// Registers a label, returning its index. Existing labels keep theirs.
    pub fn add_label(&mut self, name: &str) -> usize {
        if let Some(index) = self.label_index(name) {
            return index;
        }

        self.labels.push(name.to_owned());
        self.labels.len() - 1
    }

    pub fn label_index(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label == name)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Sets the description for `lang`, replacing an earlier one.
    pub fn add_description(&mut self, lang: &str, text: &str) {
        self.descriptions.insert(lang.to_owned(), text.to_owned());
    }

    pub fn description(&self, lang: &str) -> Option<&str> {
        self.descriptions.get(lang).map(String::as_str)
    }
}

fn default_description(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::Name => "Name",
        FeatureKind::NameAlt => "Alternative name",
        FeatureKind::Ref => "Reference code",
        FeatureKind::Address => "Street and house number",
        FeatureKind::Access => "Access restrictions per travel mode and direction",
        FeatureKind::Layer => "Vertical layer",
        FeatureKind::Width => "Width in meters",
        FeatureKind::MaxSpeed => "Maximum speed in km/h",
        FeatureKind::Grade => "Surface grade from 1 (paved) to 5",
        FeatureKind::Bridge => "Is a bridge",
        FeatureKind::Tunnel => "Is a tunnel",
        FeatureKind::Roundabout => "Is a roundabout",
    }
}

/// Returns true unless `value` is one of the usual negations.
pub(crate) fn is_truthy(value: &str) -> bool {
    !matches!(value, "no" | "false" | "0")
}
