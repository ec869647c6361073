//! Bookshelf application library
//!
//! Assembles the application modules on top of the kernel and serves them
//! over HTTP.

pub mod modules;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Registry holding every application module
pub fn build_registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry).context("failed to register modules")?;
    Ok(registry)
}

/// Initialize and start every module, serve until Ctrl-C, then stop them.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry()?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!(
        env = ?settings.environment,
        modules = registry.module_count(),
        "bookshelf bootstrap complete"
    );

    let served =
        bookshelf_http::start_server(&registry, &settings, bookshelf_http::shutdown_signal()).await;

    registry.stop_modules().await?;
    served
}
