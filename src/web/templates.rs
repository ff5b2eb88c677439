use askama::Template;

use crate::shipment::{Category, Gender, ProductImportance, ShipmentMode, WarehouseBlock};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub warehouse_blocks: Vec<&'static str>,
    pub shipment_modes: Vec<&'static str>,
    pub importances: Vec<&'static str>,
    pub genders: Vec<&'static str>,
}

impl IndexTemplate {
    /// Select options come straight from the category enums, so the form
    /// can only offer values the encoder accepts.
    pub fn new() -> Self {
        Self {
            warehouse_blocks: WarehouseBlock::labels(),
            shipment_modes: ShipmentMode::labels(),
            importances: ProductImportance::labels(),
            genders: Gender::labels(),
        }
    }
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub result: String,
    pub reach_prob: String,
    pub no_reach_prob: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_offers_every_category() {
        let html = IndexTemplate::new().render().unwrap();
        for value in ["A", "B", "C", "D", "F", "Flight", "Ship", "Road", "low", "medium", "high"] {
            assert!(html.contains(&format!("value=\"{value}\"")), "missing option {value}");
        }
        assert!(html.contains("name=\"Weight_in_gms\""));
        assert!(html.contains("action=\"/predict\""));
    }

    #[test]
    fn result_escapes_label() {
        let html = ResultTemplate {
            result: "<b>on time</b>".to_string(),
            reach_prob: "64.00".to_string(),
            no_reach_prob: "36.00".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("&lt;b&gt;on time&lt;"));
        assert!(!html.contains("<b>on time"));
        assert!(html.contains("64.00%"));
        assert!(html.contains("36.00%"));
    }
}
