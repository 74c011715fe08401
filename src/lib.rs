pub mod audit;
pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod logging;
pub mod pipeline;
pub mod query;
pub mod rates;
pub mod transform;
pub mod types;
