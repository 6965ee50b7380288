pub mod mapping;
pub mod order_status;
pub mod prices;
pub mod stocks;
