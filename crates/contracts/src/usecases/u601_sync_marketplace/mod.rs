pub mod events;
pub mod request;
pub mod response;

pub use events::SyncEvent;
pub use request::{SyncRequest, SyncTarget};
pub use response::SyncResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct SyncMarketplace;

impl UseCaseMetadata for SyncMarketplace {
    fn usecase_index() -> &'static str {
        "u601"
    }

    fn usecase_name() -> &'static str {
        "sync_marketplace"
    }

    fn display_name() -> &'static str {
        "Выгрузка остатков, цен и статусов на маркетплейс"
    }

    fn description() -> &'static str {
        "Сопоставление товаров через bridge и запись остатков, цен и статусов заданий через API маркетплейса"
    }
}
