pub mod u601_sync_marketplace;
