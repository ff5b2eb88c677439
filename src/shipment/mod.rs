pub mod category;
pub mod features;
pub mod record;

pub use category::{Category, Gender, ProductImportance, ShipmentMode, WarehouseBlock};
pub use features::FeatureVector;
pub use record::ShipmentRecord;
