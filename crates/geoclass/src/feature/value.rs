//! Typed feature values and their wire layout.

use super::{Access, FeatureKind};
use geoclass_io::{Result, Scanner, Writer};
use std::io::{Read, Write};

/// The value a feature extracted for one object.
///
/// Presence-only kinds (bridge, tunnel, roundabout) have unit cases; their
/// presence bit alone carries the information, so they are never stored in
/// a value slot and never written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    Name(String),
    NameAlt(String),
    Ref(String),
    Address {
        /// Street name.
        location: String,
        /// House number.
        address: String,
    },
    Access(Access),
    Layer(i8),
    /// Width in whole meters.
    Width(u8),
    /// Speed limit in km/h.
    MaxSpeed(u8),
    /// Surface grade, 1 (best) to 5.
    Grade(u8),
    Bridge,
    Tunnel,
    Roundabout,
}

impl FeatureValue {
    /// The default-constructed value of `kind`.
    #[must_use]
    pub fn default_for(kind: FeatureKind) -> Self {
        match kind {
            FeatureKind::Name => FeatureValue::Name(String::new()),
            FeatureKind::NameAlt => FeatureValue::NameAlt(String::new()),
            FeatureKind::Ref => FeatureValue::Ref(String::new()),
            FeatureKind::Address => FeatureValue::Address {
                location: String::new(),
                address: String::new(),
            },
            FeatureKind::Access => FeatureValue::Access(Access::empty()),
            FeatureKind::Layer => FeatureValue::Layer(0),
            FeatureKind::Width => FeatureValue::Width(0),
            FeatureKind::MaxSpeed => FeatureValue::MaxSpeed(0),
            FeatureKind::Grade => FeatureValue::Grade(0),
            FeatureKind::Bridge => FeatureValue::Bridge,
            FeatureKind::Tunnel => FeatureValue::Tunnel,
            FeatureKind::Roundabout => FeatureValue::Roundabout,
        }
    }

    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureValue::Name(_) => FeatureKind::Name,
            FeatureValue::NameAlt(_) => FeatureKind::NameAlt,
            FeatureValue::Ref(_) => FeatureKind::Ref,
            FeatureValue::Address { .. } => FeatureKind::Address,
            FeatureValue::Access(_) => FeatureKind::Access,
            FeatureValue::Layer(_) => FeatureKind::Layer,
            FeatureValue::Width(_) => FeatureKind::Width,
            FeatureValue::MaxSpeed(_) => FeatureKind::MaxSpeed,
            FeatureValue::Grade(_) => FeatureKind::Grade,
            FeatureValue::Bridge => FeatureKind::Bridge,
            FeatureValue::Tunnel => FeatureKind::Tunnel,
            FeatureValue::Roundabout => FeatureKind::Roundabout,
        }
    }

    /// Text of the label at `index`, as registered on the feature definition.
    pub fn label(&self, index: usize) -> Option<&str> {
        match (self, index) {
            (
                FeatureValue::Name(text) | FeatureValue::NameAlt(text) | FeatureValue::Ref(text),
                0,
            ) => Some(text.as_str()),
            (FeatureValue::Address { address, .. }, 0) => Some(address.as_str()),
            (FeatureValue::Address { location, .. }, 1) => Some(location.as_str()),
            _ => None,
        }
    }

    /// Reads a value of `kind` in its wire layout.
    pub fn read<R: Read>(kind: FeatureKind, scanner: &mut Scanner<R>) -> Result<Self> {
        let value = match kind {
            FeatureKind::Name => FeatureValue::Name(scanner.read_string()?),
            FeatureKind::NameAlt => FeatureValue::NameAlt(scanner.read_string()?),
            FeatureKind::Ref => FeatureValue::Ref(scanner.read_string()?),
            FeatureKind::Address => {
                let location = scanner.read_string()?;
                let address = scanner.read_string()?;
                FeatureValue::Address { location, address }
            }
            FeatureKind::Access => {
                FeatureValue::Access(Access::from_bits_retain(scanner.read_u8()?))
            }
            FeatureKind::Layer => FeatureValue::Layer(scanner.read_i8()?),
            FeatureKind::Width => FeatureValue::Width(scanner.read_u8()?),
            FeatureKind::MaxSpeed => FeatureValue::MaxSpeed(scanner.read_u8()?),
            FeatureKind::Grade => FeatureValue::Grade(scanner.read_u8()?),
            FeatureKind::Bridge | FeatureKind::Tunnel | FeatureKind::Roundabout => {
                FeatureValue::default_for(kind)
            }
        };

        Ok(value)
    }

    /// Writes the value in its wire layout.
    pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            FeatureValue::Name(text) | FeatureValue::NameAlt(text) | FeatureValue::Ref(text) => {
                writer.write_string(text)
            }
            FeatureValue::Address { location, address } => {
                writer.write_string(location)?;
                writer.write_string(address)
            }
            FeatureValue::Access(access) => writer.write_u8(access.bits()),
            FeatureValue::Layer(layer) => writer.write_i8(*layer),
            FeatureValue::Width(v) | FeatureValue::MaxSpeed(v) | FeatureValue::Grade(v) => {
                writer.write_u8(*v)
            }
            FeatureValue::Bridge | FeatureValue::Tunnel | FeatureValue::Roundabout => Ok(()),
        }
    }
}
