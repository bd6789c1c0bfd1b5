//! Access permissions per travel mode and direction.
//!
//! The access mask starts from the routing capabilities of the candidate
//! type and is then rewritten by the access tags, in this order:
//!
//! 1. `access`
//! 2. `access:forward`, `access:backward`
//! 3. `access:foot`, `access:bicycle`, `access:motor_vehicle`, `access:motorcar`
//! 4. `access:<mode>:forward`, `access:<mode>:backward`
//! 5. `oneway`, or `junction=roundabout` if there is no `oneway` tag
//!
//! Each layer only touches the bits its tag addresses. The value is stored
//! only if the result differs from the type's default.

use super::{FeatureValue, ParseContext, is_truthy};
use crate::registry::{RouteModes, TagId, TagMap, TagTable};
use bitflags::bitflags;

bitflags! {
    /// Access mask, one byte on the wire.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Access: u8 {
        const FOOT_FORWARD = 1 << 0;
        const FOOT_BACKWARD = 1 << 1;
        const BICYCLE_FORWARD = 1 << 2;
        const BICYCLE_BACKWARD = 1 << 3;
        const CAR_FORWARD = 1 << 4;
        const CAR_BACKWARD = 1 << 5;
        const ONEWAY_FORWARD = 1 << 6;
        const ONEWAY_BACKWARD = 1 << 7;

        const FOOT = Self::FOOT_FORWARD.bits() | Self::FOOT_BACKWARD.bits();
        const BICYCLE = Self::BICYCLE_FORWARD.bits() | Self::BICYCLE_BACKWARD.bits();
        const CAR = Self::CAR_FORWARD.bits() | Self::CAR_BACKWARD.bits();
        const FORWARD = Self::FOOT_FORWARD.bits() | Self::BICYCLE_FORWARD.bits() | Self::CAR_FORWARD.bits();
        const BACKWARD = Self::FOOT_BACKWARD.bits() | Self::BICYCLE_BACKWARD.bits() | Self::CAR_BACKWARD.bits();
        const ALL_MODES = Self::FORWARD.bits() | Self::BACKWARD.bits();
    }
}

impl Access {
    /// Both directions of every mode the type can be routed for.
    pub fn from_route_modes(modes: RouteModes) -> Self {
        let mut access = Access::empty();

        if modes.contains(RouteModes::FOOT) {
            access |= Access::FOOT;
        }
        if modes.contains(RouteModes::BICYCLE) {
            access |= Access::BICYCLE;
        }
        if modes.contains(RouteModes::CAR) {
            access |= Access::CAR;
        }

        access
    }

    pub fn is_oneway(self) -> bool {
        self.intersects(Access::ONEWAY_FORWARD | Access::ONEWAY_BACKWARD)
    }

    pub fn can_route_foot(self) -> bool {
        self.intersects(Access::FOOT)
    }

    pub fn can_route_bicycle(self) -> bool {
        self.intersects(Access::BICYCLE)
    }

    pub fn can_route_car(self) -> bool {
        self.intersects(Access::CAR)
    }

    /// Clears `bits`, then sets them again unless `value` is `no`.
    fn apply(&mut self, bits: Access, value: &str) {
        self.remove(bits);
        if value != "no" {
            self.insert(bits);
        }
    }
}

/// Tags of one travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ModeTags {
    both: TagId,
    forward: TagId,
    backward: TagId,
}

/// Mode tag suffixes with the bits they address, in precedence order.
const MODES: [(&str, Access, Access); 4] = [
    ("foot", Access::FOOT_FORWARD, Access::FOOT_BACKWARD),
    ("bicycle", Access::BICYCLE_FORWARD, Access::BICYCLE_BACKWARD),
    ("motor_vehicle", Access::CAR_FORWARD, Access::CAR_BACKWARD),
    ("motorcar", Access::CAR_FORWARD, Access::CAR_BACKWARD),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessFeature {
    tag_oneway: TagId,
    tag_junction: TagId,
    tag_access: TagId,
    tag_access_forward: TagId,
    tag_access_backward: TagId,
    modes: [ModeTags; 4],
}

impl AccessFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_oneway = tags.register_internal("oneway");
        self.tag_junction = tags.register_internal("junction");

        self.tag_access = tags.register_internal("access");
        self.tag_access_forward = tags.register_internal("access:forward");
        self.tag_access_backward = tags.register_internal("access:backward");

        for (slot, (mode, _, _)) in self.modes.iter_mut().zip(MODES) {
            slot.both = tags.register_internal(&format!("access:{mode}"));
            slot.forward = tags.register_internal(&format!("access:{mode}:forward"));
            slot.backward = tags.register_internal(&format!("access:{mode}:backward"));
        }
    }

    /// Computes the access mask for `tags` on top of `default`.
    pub fn evaluate(&self, tags: &TagMap, default: Access) -> Access {
        let mut access = default;

        if let Some(value) = tags.get(&self.tag_access) {
            access.apply(Access::ALL_MODES, value);
        }

        if let Some(value) = tags.get(&self.tag_access_forward) {
            access.apply(Access::FORWARD, value);
        }
        if let Some(value) = tags.get(&self.tag_access_backward) {
            access.apply(Access::BACKWARD, value);
        }

        for (mode, (_, forward, backward)) in self.modes.iter().zip(MODES) {
            if let Some(value) = tags.get(&mode.both) {
                access.apply(forward | backward, value);
            }
        }

        for (mode, (_, forward, backward)) in self.modes.iter().zip(MODES) {
            if let Some(value) = tags.get(&mode.forward) {
                access.apply(forward, value);
            }
            if let Some(value) = tags.get(&mode.backward) {
                access.apply(backward, value);
            }
        }

        match tags.get(&self.tag_oneway) {
            Some(value) if value == "-1" => {
                access.remove(Access::BICYCLE_FORWARD | Access::CAR_FORWARD | Access::ONEWAY_FORWARD);
                access.insert(Access::ONEWAY_BACKWARD);
            }
            Some(value) if is_truthy(value) => {
                access.remove(Access::BICYCLE_BACKWARD | Access::CAR_BACKWARD | Access::ONEWAY_BACKWARD);
                access.insert(Access::ONEWAY_FORWARD);
            }
            Some(_) => {}
            None => {
                if tags.get(&self.tag_junction).is_some_and(|v| v == "roundabout") {
                    access.remove(Access::BICYCLE_BACKWARD | Access::CAR_BACKWARD | Access::ONEWAY_BACKWARD);
                    access.insert(Access::BICYCLE_FORWARD | Access::CAR_FORWARD | Access::ONEWAY_FORWARD);
                }
            }
        }

        access
    }

    pub(crate) fn parse(&self, tags: &TagMap, ctx: &ParseContext<'_>) -> Option<FeatureValue> {
        let default = Access::from_route_modes(ctx.type_info.route_modes());
        let access = self.evaluate(tags, default);

        (access != default).then_some(FeatureValue::Access(access))
    }
}
