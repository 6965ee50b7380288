use serde::{Deserialize, Serialize};

/// Типы маркетплейсов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MarketplaceType {
    #[default]
    Wildberries,
    Ozon,
}

impl MarketplaceType {
    /// Получить код маркетплейса
    pub fn code(&self) -> &'static str {
        match self {
            MarketplaceType::Wildberries => "mp-wb",
            MarketplaceType::Ozon => "mp-ozon",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            MarketplaceType::Wildberries => "Wildberries",
            MarketplaceType::Ozon => "Ozon",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "mp-wb" => Some(MarketplaceType::Wildberries),
            "mp-ozon" => Some(MarketplaceType::Ozon),
            _ => None,
        }
    }
}

impl std::fmt::Display for MarketplaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
