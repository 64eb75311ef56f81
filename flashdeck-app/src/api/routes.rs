use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use flashdeck_core::{Card, CardSelector};

use crate::api::dto::{parse_current_id, resolve_deck, QueryParams};
use crate::api::error::ApiError;

pub struct AppState {
    pub selector: CardSelector,
}

pub async fn random_card(
    State(st): State<Arc<AppState>>,
    Query(q): Query<QueryParams>,
) -> Result<Json<Card>, ApiError> {
    let deck = resolve_deck(q.first("deck"));
    let card = st.selector.random_card(deck).await?;
    Ok(Json(card))
}

pub async fn next_card(
    State(st): State<Arc<AppState>>,
    Query(q): Query<QueryParams>,
) -> Result<Json<Card>, ApiError> {
    // Validate before touching storage.
    let current = parse_current_id(q.first("current_id"))?;
    let deck = resolve_deck(q.first("deck"));
    let card = st.selector.next_card(deck, current).await?;
    Ok(Json(card))
}
