pub mod bridge;
pub mod chunks;
pub mod config;
pub mod errors;
pub mod http;
pub mod marketplaces;
