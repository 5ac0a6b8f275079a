//! `fetch` command: scrape one storefront, optionally its competitors, and
//! print the result.

use serde::Serialize;
use shopintel_core::{AppConfig, BrandContext};
use shopintel_scraper::{
    brand_name_from_url, BrandAssembler, CompetitorDiscoverer, StorefrontClient,
};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FetchOptions {
    pub competitors: bool,
    pub persist: bool,
}

/// Printed shape of a fetch. Competitors are omitted unless requested.
#[derive(Debug, Serialize)]
pub(crate) struct FetchOutput {
    pub brand: BrandContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitors: Option<Vec<BrandContext>>,
}

/// # Errors
///
/// Returns an error if selectors cannot be loaded, the storefront cannot be
/// assembled, or (with `persist`) the primary brand cannot be stored.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    url: &str,
    options: FetchOptions,
) -> anyhow::Result<()> {
    let selectors = config.selector_config()?;
    let client = StorefrontClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )?;
    let assembler = BrandAssembler::new(client, &selectors)?;

    let brand = assembler.assemble(url).await?;

    let competitors = if options.competitors {
        let discoverer =
            CompetitorDiscoverer::new(selectors.discovery.clone(), config.competitor_delay());
        match brand_name_from_url(&brand.store_url) {
            Some(name) => Some(discoverer.discover(&name, &assembler).await),
            None => {
                tracing::warn!(
                    store_url = %brand.store_url,
                    "no brand name derivable; skipping competitors"
                );
                Some(Vec::new())
            }
        }
    } else {
        None
    };

    let output = FetchOutput { brand, competitors };

    if options.persist {
        persist(config, &output).await?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn persist(config: &AppConfig, output: &FetchOutput) -> anyhow::Result<()> {
    let pool = crate::connect(config).await?;
    let brand_id = shopintel_db::insert_brand_context(&pool, &output.brand, None).await?;
    tracing::info!(brand_id, store_url = %output.brand.store_url, "brand stored");

    for competitor in output.competitors.iter().flatten() {
        match shopintel_db::insert_brand_context(&pool, competitor, Some(brand_id)).await {
            Ok(id) => tracing::info!(
                competitor_id = id,
                store_url = %competitor.store_url,
                "competitor stored"
            ),
            Err(e) => tracing::warn!(
                store_url = %competitor.store_url,
                error = %e,
                "failed to store competitor"
            ),
        }
    }
    Ok(())
}
