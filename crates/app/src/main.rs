use anyhow::Context;

use storefront_core::Pagination;
use storefront_infra::{seed, AppConfig, AppServices};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    storefront_observability::init(config.log_format);

    let services = AppServices::from_config(&config);

    let products_file = config.products_file();
    let report = seed::seed_from_file(&services.stock, &products_file)
        .with_context(|| format!("failed to seed stock from {}", products_file.display()))?;

    tracing::info!(
        service = %config.name,
        placement = config.placement.as_str(),
        loaded = report.loaded,
        skipped = report.skipped,
        "stock seeded"
    );

    for record in services.stock.list_products(Pagination::default())? {
        tracing::info!(
            product_id = %record.id,
            name = %record.product.name,
            category = %record.product.category,
            current_quantity = record.current_quantity,
            "in stock"
        );
    }

    Ok(())
}
