//! Layer, width and speed limit.

use super::{FeatureValue, ParseContext};
use crate::registry::{TagId, TagMap, TagTable};
use std::num::IntErrorKind;

/// Vertical layer from `layer`. Layer 0 is the default and not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerFeature {
    tag_layer: TagId,
}

impl LayerFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_layer = tags.register_internal("layer");
    }

    pub(crate) fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        let raw = tags.get(&self.tag_layer)?;

        match raw.trim().parse::<i8>() {
            Ok(0) => None,
            Ok(layer) => Some(FeatureValue::Layer(layer)),
            Err(_) => {
                ctx.warn(&format!("Layer tag value '{raw}' is not numeric"));
                None
            }
        }
    }
}

/// Width in meters from `width`, rounded to whole meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidthFeature {
    tag_width: TagId,
}

/// Result of [`parse_width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Width {
    Meters(u8),
    NotANumber,
    OutOfRange,
}

/// Normalizes and parses a `width` value.
///
/// A single comma is taken as decimal separator, a trailing `m` unit after
/// a digit or blank is dropped, and the result is rounded half up.
pub(crate) fn parse_width(raw: &str) -> Width {
    let mut text = if raw.matches(',').count() == 1 {
        raw.replacen(',', ".", 1)
    } else {
        raw.to_owned()
    };

    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let unit = bytes[bytes.len() - 1];
        let before = bytes[bytes.len() - 2];

        if unit == b'm' && (before.is_ascii_digit() || before <= b' ') {
            text.pop();
        }

        let trimmed = text.trim_end_matches(' ').len();
        text.truncate(trimmed);
    }

    let Ok(width) = text.trim_start().parse::<f64>() else {
        return Width::NotANumber;
    };

    if !width.is_finite() {
        return Width::NotANumber;
    }

    if !(0.0..255.5).contains(&width) {
        return Width::OutOfRange;
    }

    // range check above keeps the rounded value within u8
    Width::Meters((width + 0.5).floor() as u8)
}

impl WidthFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_width = tags.register_internal("width");
    }

    pub(crate) fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        let raw = tags.get(&self.tag_width)?;

        match parse_width(raw) {
            Width::Meters(width) => Some(FeatureValue::Width(width)),
            Width::NotANumber => {
                ctx.warn(&format!("Width tag value '{raw}' is not a number"));
                None
            }
            Width::OutOfRange => {
                ctx.warn(&format!("Width tag value '{raw}' is too small or too big"));
                None
            }
        }
    }
}

/// Speed limit in km/h from `maxspeed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaxSpeedFeature {
    tag_max_speed: TagId,
}

/// Result of [`parse_max_speed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MaxSpeed {
    Kmh(u8),
    Unlimited,
    NotANumber,
}

const MPH_TO_KMH: f64 = 1.609;

/// Walking pace assumed for `maxspeed=walk`.
const WALK_SPEED: u8 = 10;

/// Parses a `maxspeed` value, converting mph and saturating at 255 km/h.
pub(crate) fn parse_max_speed(raw: &str) -> MaxSpeed {
    match raw {
        "signals" | "none" => return MaxSpeed::Unlimited,
        "walk" => return MaxSpeed::Kmh(WALK_SPEED),
        _ => {}
    }

    let (number, mph) = match raw.rfind("mph") {
        Some(pos) => (&raw[..pos], true),
        None => (raw, false),
    };

    let speed = match number.trim_end_matches(' ').parse::<u64>() {
        Ok(speed) => speed,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => return MaxSpeed::NotANumber,
    };

    let kmh = if mph {
        if speed as f64 > f64::from(u8::MAX) / MPH_TO_KMH + 0.5 {
            u8::MAX
        } else {
            (speed as f64 * MPH_TO_KMH + 0.5) as u8
        }
    } else {
        u8::try_from(speed).unwrap_or(u8::MAX)
    };

    MaxSpeed::Kmh(kmh)
}

impl MaxSpeedFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_max_speed = tags.register_internal("maxspeed");
    }

    pub(crate) fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        let raw = tags.get(&self.tag_max_speed)?;

        match parse_max_speed(raw) {
            MaxSpeed::Kmh(speed) => Some(FeatureValue::MaxSpeed(speed)),
            MaxSpeed::Unlimited => None,
            MaxSpeed::NotANumber => {
                ctx.warn(&format!("Max speed tag value '{raw}' is not numeric"));
                None
            }
        }
    }
}
