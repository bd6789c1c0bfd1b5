//! Per-object feature values.
//!
//! A [`FeatureValueBuffer`] is bound to one type and holds the values its
//! features extracted for a single object: a presence bitset with one bit
//! per feature instance, and a slot arena holding the typed values of the
//! value-bearing features.
//!
//! # Architecture
//!
//! The arena mirrors the type's value layout. Each value-bearing feature
//! owns the slot at `offset / ALIGNMENT`, where `offset` is the aligned
//! byte offset assigned when the feature was appended to the type, so two
//! value-bearing features never share a slot. Presence-only features
//! (bridge, tunnel, roundabout) have no slot; their bit is the value.
//!
//! # States
//!
//! ```text
//! Unbound --set_type--> Bound/Empty --allocate/parse/read--> Bound/Populated
//!    ^                      ^                                    |
//!    |                      +----------- set_type/clear ---------+
//! ```
//!
//! # Wire layout
//!
//! ```text
//! presence bytes (feature_mask_bytes, bit i = feature bit i, LSB first)
//! value of each present value-bearing feature, in declaration order
//! ```
//!
//! # Examples
//!
//! ```
//! use geoclass::condition::Condition;
//! use geoclass::feature::{FeatureKind, FeatureValue};
//! use geoclass::registry::{GeometryKinds, TagMap, TypeConfig, TypeInfo};
//! use geoclass::{FeatureValueBuffer, NullSink, ObjectRef};
//!
//! let mut config = TypeConfig::new();
//! let highway = config.register_tag_for_external_use("highway");
//! let name = config.register_name_tag("name", 1);
//!
//! let mut info = TypeInfo::new("highway_residential");
//! info.add_condition(GeometryKinds::WAY, Condition::exists(highway));
//! info.add_feature(FeatureKind::Name).unwrap();
//! let info = config.add_type(info).unwrap();
//!
//! let mut tags = TagMap::new();
//! tags.insert(highway, "residential".to_string());
//! tags.insert(name, "Elm Road".to_string());
//!
//! let mut buffer = FeatureValueBuffer::new();
//! buffer.set_type(info);
//! buffer.parse(&config, &tags, ObjectRef::way(7), &NullSink);
//!
//! assert_eq!(
//!     buffer.find_value(FeatureKind::Name),
//!     Some(&FeatureValue::Name("Elm Road".into()))
//! );
//! ```

use crate::diagnostic::{DiagnosticSink, ObjectRef};
use crate::feature::{ALIGNMENT, FeatureInstance, FeatureKind, FeatureValue, ParseContext};
use crate::registry::{TagMap, TypeConfig, TypeInfo, TypeInfoRef};
use geoclass_io::{Error, Result, Scanner, Writer};
use std::io::{Read, Write};
use std::sync::Arc;

static BRIDGE: FeatureValue = FeatureValue::Bridge;
static TUNNEL: FeatureValue = FeatureValue::Tunnel;
static ROUNDABOUT: FeatureValue = FeatureValue::Roundabout;

/// The feature values of one classified object.
#[derive(Debug, Clone, Default)]
pub struct FeatureValueBuffer {
    type_info: Option<TypeInfoRef>,
    /// Presence bits, LSB first
    feature_bits: Vec<u8>,
    slots: Vec<Option<FeatureValue>>,
}

impl FeatureValueBuffer {
    /// Creates an unbound buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer bound to `type_info`.
    #[must_use]
    pub fn with_type(type_info: TypeInfoRef) -> Self {
        let mut buffer = Self::new();
        buffer.set_type(type_info);
        buffer
    }

    /// Binds the buffer to `type_info`, dropping all values held for the
    /// previous type.
    pub fn set_type(&mut self, type_info: TypeInfoRef) {
        self.feature_bits.clear();
        self.feature_bits.resize(type_info.feature_mask_bytes(), 0);

        self.slots.clear();
        self.slots
            .resize(type_info.value_buffer_size().div_ceil(ALIGNMENT), None);

        self.type_info = Some(type_info);
    }

    /// The bound type, if any.
    pub fn type_info(&self) -> Option<&TypeInfoRef> {
        self.type_info.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.type_info.is_some()
    }

    fn bound_ref(&self) -> &TypeInfoRef {
        match &self.type_info {
            Some(info) => info,
            None => panic!("feature value buffer is not bound to a type"),
        }
    }

    fn bound(&self) -> &TypeInfo {
        self.bound_ref()
    }

    fn instance(&self, index: usize) -> FeatureInstance {
        let info = self.bound();

        assert!(
            index < info.feature_count(),
            "feature index {index} out of range for type '{}' with {} features",
            info.name(),
            info.feature_count()
        );

        info.features()[index]
    }

    /// Number of features of the bound type.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is unbound.
    pub fn feature_count(&self) -> usize {
        self.bound().feature_count()
    }

    /// Returns true if feature `index` is present.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is unbound or `index` is out of range.
    pub fn has_value(&self, index: usize) -> bool {
        let bit = self.instance(index).feature_bit();
        self.feature_bits[bit / 8] & (1 << (bit % 8)) != 0
    }

    /// Marks feature `index` present and stores its default value.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is unbound, `index` is out of range, or the
    /// feature is already present.
    pub fn allocate_value(&mut self, index: usize) -> Option<&mut FeatureValue> {
        assert!(
            !self.has_value(index),
            "feature {index} of type '{}' is already allocated",
            self.bound().name()
        );

        let instance = self.instance(index);
        let bit = instance.feature_bit();
        self.feature_bits[bit / 8] |= 1 << (bit % 8);

        let kind = instance.feature();
        if !kind.has_value() {
            return None;
        }

        let slot = &mut self.slots[instance.offset() / ALIGNMENT];
        Some(slot.insert(FeatureValue::default_for(kind)))
    }

    /// Drops the value of feature `index` and clears its presence bit.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is unbound, `index` is out of range, or the
    /// feature is not present.
    pub fn free_value(&mut self, index: usize) {
        assert!(
            self.has_value(index),
            "feature {index} of type '{}' is not allocated",
            self.bound().name()
        );

        let instance = self.instance(index);
        if instance.feature().has_value() {
            self.slots[instance.offset() / ALIGNMENT] = None;
        }

        let bit = instance.feature_bit();
        self.feature_bits[bit / 8] &= !(1 << (bit % 8));
    }

    /// The value of feature `index`.
    ///
    /// Presence-only features report their unit value while present.
    pub fn value(&self, index: usize) -> Option<&FeatureValue> {
        if !self.has_value(index) {
            return None;
        }

        let instance = self.instance(index);
        match instance.feature() {
            FeatureKind::Bridge => Some(&BRIDGE),
            FeatureKind::Tunnel => Some(&TUNNEL),
            FeatureKind::Roundabout => Some(&ROUNDABOUT),
            _ => self.slots[instance.offset() / ALIGNMENT].as_ref(),
        }
    }

    /// Mutable access to the value of a present value-bearing feature.
    pub fn value_mut(&mut self, index: usize) -> Option<&mut FeatureValue> {
        if !self.has_value(index) {
            return None;
        }

        let instance = self.instance(index);
        if !instance.feature().has_value() {
            return None;
        }

        self.slots[instance.offset() / ALIGNMENT].as_mut()
    }

    /// Stores `value` for feature `index`, allocating it if absent.
    ///
    /// # Panics
    ///
    /// Panics if the value's kind differs from the feature at `index`.
    pub fn set_value(&mut self, index: usize, value: FeatureValue) {
        let instance = self.instance(index);

        assert_eq!(
            instance.feature(),
            value.kind(),
            "feature {index} of type '{}' cannot hold a {} value",
            self.bound().name(),
            value.kind()
        );

        if !self.has_value(index) {
            self.allocate_value(index);
        }

        if instance.feature().has_value() {
            self.slots[instance.offset() / ALIGNMENT] = Some(value);
        }
    }

    /// The value of the bound type's feature of `kind`, if present.
    pub fn find_value(&self, kind: FeatureKind) -> Option<&FeatureValue> {
        let index = self.type_info.as_ref()?.feature_index(kind)?;
        self.value(index)
    }

    /// Drops every value, keeping the binding.
    pub fn clear(&mut self) {
        self.feature_bits.fill(0);
        self.slots.fill(None);
    }

    /// Number of present features.
    pub fn value_count(&self) -> usize {
        self.feature_bits
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Runs every feature of the bound type over `tags` and stores what
    /// they extract. Malformed values are reported to `sink` for `object`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is unbound.
    pub fn parse(
        &mut self,
        config: &TypeConfig,
        tags: &TagMap,
        object: ObjectRef,
        sink: &dyn DiagnosticSink,
    ) {
        let info = Arc::clone(self.bound_ref());
        let ctx = ParseContext {
            config,
            type_info: &info,
            object,
            sink,
        };

        for instance in info.features() {
            let kind = instance.feature();

            if let Some(value) = config.feature(kind).parse(tags, &ctx) {
                self.set_value(instance.index(), value);
            }
        }
    }

    /// Replaces the buffer's values with those decoded from `scanner`.
    ///
    /// Presence bits past the type's last feature are rejected. On error
    /// the buffer is left bound and empty.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is unbound.
    pub fn read<R: Read>(&mut self, scanner: &mut Scanner<R>) -> Result<()> {
        self.clear();

        let result = self.read_values(scanner);
        if result.is_err() {
            self.clear();
        }

        result
    }

    fn read_values<R: Read>(&mut self, scanner: &mut Scanner<R>) -> Result<()> {
        for byte in &mut self.feature_bits {
            *byte = scanner.read_u8()?;
        }

        let info = Arc::clone(self.bound_ref());

        let padding = (info.feature_bit_count()..self.feature_bits.len() * 8)
            .any(|bit| self.feature_bits[bit / 8] & (1 << (bit % 8)) != 0);
        if padding {
            return Err(Error::Corrupt("presence bit set past the last feature"));
        }

        for instance in info.features() {
            let kind = instance.feature();
            if !kind.has_value() || !self.has_value(instance.index()) {
                continue;
            }

            let value = FeatureValue::read(kind, scanner)?;
            self.slots[instance.offset() / ALIGNMENT] = Some(value);
        }

        Ok(())
    }

    /// Encodes the presence bits and present values.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is unbound.
    pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let info = self.bound();

        for &byte in &self.feature_bits {
            writer.write_u8(byte)?;
        }

        for instance in info.features() {
            if !instance.feature().has_value() || !self.has_value(instance.index()) {
                continue;
            }

            if let Some(value) = &self.slots[instance.offset() / ALIGNMENT] {
                value.write(writer)?;
            }
        }

        Ok(())
    }
}

impl PartialEq for FeatureValueBuffer {
    fn eq(&self, other: &Self) -> bool {
        let same_type = match (&self.type_info, &other.type_info) {
            (Some(a), Some(b)) => a.id() == b.id() && a.name() == b.name(),
            (None, None) => true,
            _ => false,
        };

        same_type && self.feature_bits == other.feature_bits && self.slots == other.slots
    }
}

impl Eq for FeatureValueBuffer {}
