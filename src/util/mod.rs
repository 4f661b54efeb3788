// Utility modules

pub mod data_url;
pub mod serde_utils;
