pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;

// Request-side domain: form parsing, category codes, feature layout
pub mod shipment;

// Loaded artifacts and the inference seam the web layer depends on
pub mod model;

pub mod web;
