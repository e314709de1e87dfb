//! Add Favorite Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal_app::domain::favorites::FavoritesService;

use crate::{
    extensions::*,
    favorites::{errors::into_status_error, index::FavoriteResponse},
    state::State,
};

/// Add Favorite Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddFavoriteRequest {
    /// The product to favorite
    pub product: Uuid,
}

/// Add Favorite Handler
#[endpoint(
    tags("favorites"),
    summary = "Add Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Favorite added"),
        (status_code = StatusCode::CONFLICT, description = "Already a favorite"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown product"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddFavoriteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<FavoriteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let favorite = state
        .app
        .favorites
        .add_favorite(actor, json.into_inner().product)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(favorite.into()))
}
