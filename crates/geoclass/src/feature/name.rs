//! Name, alternative name and reference code.

use super::{FeatureValue, ParseContext};
use crate::registry::{TagId, TagMap, TagTable};

/// Picks the value of the highest priority candidate tag.
///
/// Ties keep the candidate seen first in tag id order. Empty values never
/// win.
fn best_candidate<'a>(tags: &'a TagMap, priority: impl Fn(TagId) -> Option<u32>) -> Option<&'a str> {
    let mut best: Option<(&str, u32)> = None;

    for (&id, value) in tags {
        let Some(prio) = priority(id) else {
            continue;
        };

        if value.is_empty() {
            continue;
        }

        match best {
            Some((_, best_prio)) if prio <= best_prio => {}
            _ => best = Some((value.as_str(), prio)),
        }
    }

    best.map(|(value, _)| value)
}

/// Primary name, chosen among the registered name tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameFeature;

impl NameFeature {
    pub(crate) fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        best_candidate(tags, |id| ctx.config.name_tag_priority(id))
            .map(|name| FeatureValue::Name(name.to_owned()))
    }
}

/// Alternative name, chosen among the registered alt-name tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameAltFeature;

impl NameAltFeature {
    pub(crate) fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        best_candidate(tags, |id| ctx.config.name_alt_tag_priority(id))
            .map(|name| FeatureValue::NameAlt(name.to_owned()))
    }
}

/// Reference code from `ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefFeature {
    tag_ref: TagId,
}

impl RefFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_ref = tags.register_internal("ref");
    }

    pub(crate) fn parse(&self, tags: &TagMap) -> Option<FeatureValue> {
        tags.get(&self.tag_ref)
            .filter(|value| !value.is_empty())
            .map(|value| FeatureValue::Ref(value.clone()))
    }
}
