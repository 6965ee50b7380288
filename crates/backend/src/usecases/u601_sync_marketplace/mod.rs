pub mod executor;

pub use executor::SyncExecutor;
