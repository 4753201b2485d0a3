//! Client endpoint handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::field::Empty;
use tracing::{instrument, Span};
use uuid::Uuid;

use super::error::ApiError;
use super::query::{GetQuery, ListQuery};
use super::AppState;
use crate::domain::{ClientDraft, PublicClientView};

/// `POST /client/`: dual-write a new client and return its relational view.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<ClientDraft>, JsonRejection>,
) -> Result<Json<PublicClientView>, ApiError> {
    let Json(draft) = payload?;
    let view = state.service.create(draft).await?;
    Ok(Json(view))
}

/// `GET /client/clients`: list clients from the selected store.
#[instrument(skip_all, fields(request_id = %Uuid::new_v4(), store = Empty))]
pub async fn list_clients(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<PublicClientView>>, ApiError> {
    let Query(query) = query?;
    let request = query.into_request().map_err(ApiError::InvalidQuery)?;
    Span::current().record("store", request.store().as_str());
    let views = state.service.list(&request).await?;
    Ok(Json(views))
}

/// `GET /client/{client_id}`: fetch one client from the selected store.
#[instrument(
    skip_all,
    fields(request_id = %Uuid::new_v4(), store = Empty, client_id = Empty)
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    query: Result<Query<GetQuery>, QueryRejection>,
) -> Result<Json<PublicClientView>, ApiError> {
    let Query(query) = query?;
    let span = Span::current();
    span.record("store", query.store().as_str());
    span.record("client_id", client_id.as_str());
    let view = state.service.get(&client_id, query.store()).await?;
    Ok(Json(view))
}
