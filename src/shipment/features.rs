use crate::constants::{FEATURE_COUNT, FEATURE_NAMES};
use crate::shipment::category::Category;
use crate::shipment::record::ShipmentRecord;

/// Model input in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pairs each value with the feature name it is fitted against.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<&ShipmentRecord> for FeatureVector {
    fn from(r: &ShipmentRecord) -> Self {
        // Order here is the contract with the artifacts; see FEATURE_NAMES
        FeatureVector([
            f64::from(r.warehouse_block.code()),
            f64::from(r.mode_of_shipment.code()),
            r.customer_care_calls as f64,
            r.customer_rating as f64,
            r.cost_of_the_product as f64,
            r.prior_purchases as f64,
            f64::from(r.product_importance.code()),
            f64::from(r.gender.code()),
            r.discount_offered as f64,
            r.weight_in_gms as f64,
        ])
    }
}
