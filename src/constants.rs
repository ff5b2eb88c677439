/// Form field names, as posted by the input form.
/// These are also the feature names recorded inside the model artifacts.
pub const WAREHOUSE_BLOCK: &str = "Warehouse_block";
pub const MODE_OF_SHIPMENT: &str = "Mode_of_Shipment";
pub const CUSTOMER_CARE_CALLS: &str = "Customer_care_calls";
pub const CUSTOMER_RATING: &str = "Customer_rating";
pub const COST_OF_THE_PRODUCT: &str = "Cost_of_the_Product";
pub const PRIOR_PURCHASES: &str = "Prior_purchases";
pub const PRODUCT_IMPORTANCE: &str = "Product_importance";
pub const GENDER: &str = "Gender";
pub const DISCOUNT_OFFERED: &str = "Discount_offered";
pub const WEIGHT_IN_GMS: &str = "Weight_in_gms";

/// Number of features consumed by the normalizer and the classifier.
pub const FEATURE_COUNT: usize = 10;

/// Column order the artifacts were fitted on. Both artifacts carry their own
/// copy of this list and are rejected at startup if it differs.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    WAREHOUSE_BLOCK,
    MODE_OF_SHIPMENT,
    CUSTOMER_CARE_CALLS,
    CUSTOMER_RATING,
    COST_OF_THE_PRODUCT,
    PRIOR_PURCHASES,
    PRODUCT_IMPORTANCE,
    GENDER,
    DISCOUNT_OFFERED,
    WEIGHT_IN_GMS,
];

// Result page wording
pub const ON_TIME_LABEL: &str = "Order will reach on time";
pub const LATE_LABEL: &str = "Order will not reach on time";

// Plain-text bodies for rejected requests
pub const INVALID_FORM_MESSAGE: &str =
    "Invalid form data received. Please check your inputs and try again.";
pub const INVALID_TYPE_MESSAGE: &str =
    "Invalid data type received. Please enter valid numeric values.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const INVALID_RESULT_MESSAGE: &str = "Invalid result parameters.";

pub const SERVICE_NAME: &str = "shipment-eta";
