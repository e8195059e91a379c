// Stable error codes attached to API error responses

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const UNKNOWN_REFERENCE: &str = "VALIDATION_1002";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RESOURCE_2001";
}

pub mod database {
    pub const QUERY_FAILED: &str = "DB_4002";
}

pub mod assistant {
    pub const GENERATION_FAILED: &str = "ASSIST_5001";
}
