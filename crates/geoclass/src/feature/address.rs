//! Street address from `addr:street` and `addr:housenumber`.

use super::FeatureValue;
use crate::registry::{TagId, TagMap, TagTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddressFeature {
    tag_house_number: TagId,
    tag_street: TagId,
}

impl AddressFeature {
    pub(crate) fn initialize(&mut self, tags: &mut TagTable) {
        self.tag_house_number = tags.register_internal("addr:housenumber");
        self.tag_street = tags.register_internal("addr:street");
    }

    /// Both parts must be present and non-empty.
    pub(crate) fn parse(&self, tags: &TagMap) -> Option<FeatureValue> {
        let street = tags.get(&self.tag_street).filter(|v| !v.is_empty())?;
        let house_number = tags.get(&self.tag_house_number).filter(|v| !v.is_empty())?;

        Some(FeatureValue::Address {
            location: street.clone(),
            address: house_number.clone(),
        })
    }
}
