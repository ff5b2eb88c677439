//! Closed category sets for the four categorical form fields.
//!
//! Each enum owns its wire label and its integer code through an exhaustive
//! `match`, so adding a variant without a code does not compile.

use crate::constants::{GENDER, MODE_OF_SHIPMENT, PRODUCT_IMPORTANCE, WAREHOUSE_BLOCK};
use crate::error::PredictError;

/// Shared surface of the categorical fields.
pub trait Category: Copy + Sized + 'static {
    /// Form field this category is posted under.
    const FIELD: &'static str;
    /// Every accepted value, in code order.
    const ALL: &'static [Self];

    fn code(self) -> u8;
    fn label(self) -> &'static str;
    fn from_label(value: &str) -> Option<Self>;

    /// Parse a posted value, failing with `UnrecognizedCategory`.
    fn parse_field(value: &str) -> Result<Self, PredictError> {
        Self::from_label(value).ok_or_else(|| PredictError::UnrecognizedCategory {
            field: Self::FIELD,
            value: value.to_string(),
        })
    }

    /// Labels in code order, for rendering select boxes.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, { $($variant:ident => ($label:literal, $code:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn from_label(value: &str) -> Option<Self> {
                match value {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

category_enum!(
    /// Warehouse block the product is stored in. There is no block E.
    WarehouseBlock, WAREHOUSE_BLOCK, {
        A => ("A", 0),
        B => ("B", 1),
        C => ("C", 2),
        D => ("D", 3),
        F => ("F", 4),
    }
);

category_enum!(
    ShipmentMode, MODE_OF_SHIPMENT, {
        Flight => ("Flight", 0),
        Ship => ("Ship", 1),
        Road => ("Road", 2),
    }
);

category_enum!(
    ProductImportance, PRODUCT_IMPORTANCE, {
        Low => ("low", 0),
        Medium => ("medium", 1),
        High => ("high", 2),
    }
);

category_enum!(
    Gender, GENDER, {
        Female => ("F", 0),
        Male => ("M", 1),
    }
);
