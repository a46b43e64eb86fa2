pub mod error;
pub mod esg_record;
pub mod api_config;
