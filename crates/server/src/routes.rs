use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use common::types::Health;
use models::{Account, Book};
use service::StoreService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<StoreService>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Debug, Deserialize)]
pub struct AddBookInput {
    pub title: String,
    pub price: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountInput {
    pub username: String,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBalanceInput {
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct CartInput {
    pub book_id: Uuid,
}

async fn add_book(
    State(state): State<ServerState>,
    Json(input): Json<AddBookInput>,
) -> Result<Json<Book>, ApiError> {
    Ok(Json(state.service.add_book(&input.title, input.price).await?))
}

async fn get_books(State(state): State<ServerState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.service.get_books().await?))
}

/// Absence is an empty result (`null` body), not an error.
async fn get_book(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<Book>>, ApiError> {
    Ok(Json(state.service.get_book(&id).await?))
}

async fn create_account(
    State(state): State<ServerState>,
    Json(input): Json<CreateAccountInput>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(
        state
            .service
            .create_account(&input.username, input.balance)
            .await?,
    ))
}

async fn get_accounts(State(state): State<ServerState>) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(state.service.get_accounts().await?))
}

/// Absence is an empty result (`null` body), not an error.
async fn get_account(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<Account>>, ApiError> {
    Ok(Json(state.service.get_account(&id).await?))
}

async fn remove_account(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.service.remove_account(&id).await?))
}

async fn update_balance(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBalanceInput>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.service.update_balance(&id, input.balance).await?))
}

async fn add_to_cart(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CartInput>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.service.add_to_cart(&id, &input.book_id).await?))
}

async fn get_cart(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.service.get_cart(&id).await?))
}

async fn remove_from_cart(
    State(state): State<ServerState>,
    Path((id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.service.remove_from_cart(&id, &book_id).await?))
}

async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.service.checkout(&id).await?))
}

/// Build the full application router.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/books", post(add_book).get(get_books))
        .route("/books/:id", get(get_book))
        .route("/accounts", post(create_account).get(get_accounts))
        .route("/accounts/:id", get(get_account).delete(remove_account))
        .route("/accounts/:id/balance", put(update_balance))
        .route("/accounts/:id/cart", post(add_to_cart).get(get_cart))
        .route("/accounts/:id/cart/:book_id", delete(remove_from_cart))
        .route("/accounts/:id/checkout", post(checkout));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
