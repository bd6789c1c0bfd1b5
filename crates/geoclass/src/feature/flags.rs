//! Presence-only features: bridge, tunnel and roundabout.

use super::{FeatureValue, is_truthy};
use crate::registry::{TagId, TagMap, TagTable};

/// Set when `bridge` is present and not negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeFeature {
    tag_bridge: TagId,
}

impl BridgeFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_bridge = tags.register_internal("bridge");
    }

    pub(crate) fn parse(&self, tags: &TagMap) -> Option<FeatureValue> {
        tags.get(&self.tag_bridge)
            .filter(|value| is_truthy(value))
            .map(|_| FeatureValue::Bridge)
    }
}

/// Set when `tunnel` is present and not negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TunnelFeature {
    tag_tunnel: TagId,
}

impl TunnelFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_tunnel = tags.register_internal("tunnel");
    }

    pub(crate) fn parse(&self, tags: &TagMap) -> Option<FeatureValue> {
        tags.get(&self.tag_tunnel)
            .filter(|value| is_truthy(value))
            .map(|_| FeatureValue::Tunnel)
    }
}

/// Set for `junction=roundabout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundaboutFeature {
    tag_junction: TagId,
}

impl RoundaboutFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_junction = tags.register_internal("junction");
    }

    pub(crate) fn parse(&self, tags: &TagMap) -> Option<FeatureValue> {
        tags.get(&self.tag_junction)
            .filter(|value| value.as_str() == "roundabout")
            .map(|_| FeatureValue::Roundabout)
    }
}
