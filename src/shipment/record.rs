use crate::constants::{
    COST_OF_THE_PRODUCT, CUSTOMER_CARE_CALLS, CUSTOMER_RATING, DISCOUNT_OFFERED, GENDER,
    MODE_OF_SHIPMENT, PRIOR_PURCHASES, PRODUCT_IMPORTANCE, WAREHOUSE_BLOCK, WEIGHT_IN_GMS,
};
use crate::error::PredictError;
use crate::shipment::category::{Category, Gender, ProductImportance, ShipmentMode, WarehouseBlock};

/// One submitted shipment. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentRecord {
    pub warehouse_block: WarehouseBlock,
    pub mode_of_shipment: ShipmentMode,
    pub customer_care_calls: i64,
    pub customer_rating: i64,
    pub cost_of_the_product: i64,
    pub prior_purchases: i64,
    pub product_importance: ProductImportance,
    pub gender: Gender,
    pub discount_offered: i64,
    pub weight_in_gms: i64,
}

impl ShipmentRecord {
    /// Build a record from raw form values looked up by field name.
    ///
    /// Fields are read in feature order and the first failure is returned.
    pub fn from_fields<'a, F>(lookup: F) -> Result<Self, PredictError>
    where
        F: Fn(&'static str) -> Option<&'a str>,
    {
        let required = |field: &'static str| lookup(field).ok_or(PredictError::MissingField(field));
        let integer = |field: &'static str| required(field).and_then(|v| parse_integer(field, v));

        Ok(Self {
            warehouse_block: WarehouseBlock::parse_field(required(WAREHOUSE_BLOCK)?)?,
            mode_of_shipment: ShipmentMode::parse_field(required(MODE_OF_SHIPMENT)?)?,
            customer_care_calls: integer(CUSTOMER_CARE_CALLS)?,
            customer_rating: integer(CUSTOMER_RATING)?,
            cost_of_the_product: integer(COST_OF_THE_PRODUCT)?,
            prior_purchases: integer(PRIOR_PURCHASES)?,
            product_importance: ProductImportance::parse_field(required(PRODUCT_IMPORTANCE)?)?,
            gender: Gender::parse_field(required(GENDER)?)?,
            discount_offered: integer(DISCOUNT_OFFERED)?,
            weight_in_gms: integer(WEIGHT_IN_GMS)?,
        })
    }
}

/// Integer parse that tolerates surrounding whitespace and an explicit sign.
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64, PredictError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| PredictError::MalformedNumeric {
            field,
            value: raw.to_string(),
        })
}
