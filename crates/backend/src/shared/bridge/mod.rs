//! Клиенты сервисов bridge: выдача токенов продавца и сопоставление товаров

pub mod mapping;
pub mod token_service;

pub use mapping::MappingClient;
pub use token_service::{BridgeTokenService, CredentialProvider, Credentials};
