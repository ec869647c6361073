//! HTTP handlers for the books module.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use bookshelf_http::error::AppError;
use serde::Deserialize;

use super::models::{Book, BookId, BookRequest};
use super::SharedCatalog;

/// Query string accepted by the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

/// Routes relative to the module mount point
pub fn router(catalog: SharedCatalog) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route("/title/{title}", get(get_book_by_title))
        .route("/id/{id}", get(get_book_by_id))
        .route("/{id}", put(update_book).delete(delete_book))
        .with_state(catalog)
}

/// Health check endpoint
async fn health_check(State(catalog): State<SharedCatalog>) -> String {
    let count = catalog.read().await.len();
    format!("books module is healthy: {} books", count)
}

async fn list_books(
    State(catalog): State<SharedCatalog>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(params) = params?;
    let catalog = catalog.read().await;

    let books = catalog
        .list(params.category.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(books))
}

/// Serves `null` with 200 when nothing matches
async fn get_book_by_title(
    State(catalog): State<SharedCatalog>,
    title: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<Book>>, AppError> {
    let Path(title) = title?;
    let book = catalog.read().await.get_by_title(&title).cloned();

    if book.is_none() {
        tracing::debug!(%title, "no book with that title");
    }

    Ok(Json(book))
}

async fn get_book_by_id(
    State(catalog): State<SharedCatalog>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    let book = catalog.read().await.get_by_id(id)?.clone();
    Ok(Json(book))
}

async fn create_book(
    State(catalog): State<SharedCatalog>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    let book = catalog.write().await.create(request)?;

    tracing::info!(book_id = book.id, title = %book.title, "book created");
    Ok(StatusCode::CREATED)
}

async fn update_book(
    State(catalog): State<SharedCatalog>,
    id: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let book = catalog.write().await.update(id, request)?;

    tracing::info!(book_id = book.id, "book updated");
    Ok(Json(book))
}

async fn delete_book(
    State(catalog): State<SharedCatalog>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    catalog.write().await.delete(id)?;

    tracing::info!(book_id = id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
