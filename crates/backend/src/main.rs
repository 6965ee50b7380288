use anyhow::Context;
use clap::Parser;
use contracts::enums::marketplace_type::MarketplaceType;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u601_sync_marketplace::{SyncMarketplace, SyncRequest};
use marketplace_handler::shared::marketplaces::{self, get_marketplace_type};
use marketplace_handler::shared::config;
use marketplace_handler::system;
use marketplace_handler::usecases::u601_sync_marketplace::SyncExecutor;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "marketplace-handler")]
#[command(about = "Выгрузка остатков, цен и статусов заданий на маркетплейс", long_about = None)]
struct Args {
    /// JSON-файл запроса: `{"marketplace": "Wildberries", "target": "prices", "ids": [...], "values": [...]}`
    request: PathBuf,

    /// Маркетплейс вместо указанного в запросе ("wb", "mp-wb", "Wildberries", "ozon")
    #[arg(long, value_parser = parse_marketplace)]
    marketplace: Option<MarketplaceType>,
}

fn parse_marketplace(value: &str) -> Result<MarketplaceType, String> {
    get_marketplace_type(value).ok_or_else(|| format!("unknown marketplace: {}", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    system::tracing::initialize()?;

    let contents = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request file {}", args.request.display()))?;
    let mut request: SyncRequest = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid request file {}", args.request.display()))?;
    if let Some(marketplace) = args.marketplace {
        request.marketplace = marketplace;
    }

    let config = config::load_config()?;
    tracing::info!(
        "{} ({}): {} {} items",
        SyncMarketplace::full_name(),
        SyncMarketplace::display_name(),
        request.target.name(),
        request.target.len()
    );

    let marketplace = marketplaces::connect(request.marketplace, &config).await?;
    let response = SyncExecutor::new(marketplace).execute(request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.report.is_complete() {
        tracing::warn!("Mapping not found for: {:?}", response.report.missing);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_request_only() {
        let args = Args::try_parse_from(["marketplace-handler", "request.json"]).unwrap();
        assert_eq!(args.request, PathBuf::from("request.json"));
        assert_eq!(args.marketplace, None);
    }

    #[test]
    fn test_args_marketplace_aliases() {
        for alias in ["wb", "mp-wb", "Wildberries"] {
            let args =
                Args::try_parse_from(["marketplace-handler", "r.json", "--marketplace", alias]).unwrap();
            assert_eq!(args.marketplace, Some(MarketplaceType::Wildberries));
        }
        let args = Args::try_parse_from(["marketplace-handler", "r.json", "--marketplace", "ozon"]).unwrap();
        assert_eq!(args.marketplace, Some(MarketplaceType::Ozon));
    }

    #[test]
    fn test_args_rejects_unknown_marketplace_and_missing_request() {
        assert!(Args::try_parse_from(["marketplace-handler", "r.json", "--marketplace", "kuper"]).is_err());
        assert!(Args::try_parse_from(["marketplace-handler"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_request_path() {
        let err = Args::try_parse_from(["marketplace-handler", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
