pub mod catalog;
pub mod error;
pub mod models;
pub mod openapi;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use tokio::sync::RwLock;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use models::{Book, BookId, BookRequest};

/// The catalog as shared between request handlers
pub type SharedCatalog = Arc<RwLock<Catalog>>;

/// Books module: an in-memory catalog served under `/api/books`
pub struct BooksModule {
    catalog: SharedCatalog,
}

impl BooksModule {
    /// A module over an empty catalog; `init` loads the seed records
    pub fn new() -> Self {
        Self::with_catalog(Catalog::new())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    pub fn catalog(&self) -> SharedCatalog {
        self.catalog.clone()
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.catalog.seed {
            *self.catalog.write().await = Catalog::seeded();
        }

        let books = self.catalog.read().await.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.catalog())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::document())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.catalog.read().await.len();
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped; catalog discarded"
        );
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}
