//! Stacks application library
//!
//! The library catalog, the text front desk over it, and the HTTP modules
//! that expose it through the kernel's module lifecycle.

pub mod catalog;
pub mod desk;
pub mod modules;

use anyhow::Context;
use stacks_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use catalog::{Book, Catalog, CatalogError, SharedCatalog, User};
pub use desk::Desk;

/// Build the startup catalog, seeded unless disabled in settings.
pub fn build_catalog(settings: &Settings) -> Catalog {
    let catalog = if settings.catalog.seed_books {
        Catalog::seeded()
    } else {
        Catalog::new()
    };
    tracing::info!(books = catalog.len(), "catalog ready");
    catalog
}

/// Registry with every catalog module mounted on `catalog`.
pub fn build_registry(catalog: &SharedCatalog) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, catalog);
    registry
}

/// Run the HTTP service until Ctrl-C, driving the module lifecycle around it.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let catalog = build_catalog(settings).into_shared();
    let registry = build_registry(&catalog);
    let ctx = InitCtx { settings };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = stacks_http::start_server(&registry, settings, shutdown_signal()).await;

    registry
        .stop_modules()
        .await
        .with_context(|| "failed to stop modules cleanly")?;

    served
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
