//! List Favorites Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal_app::domain::favorites::{FavoritesService, models::Favorite};

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Favorite Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoriteResponse {
    /// The favorited product
    pub product_uuid: Uuid,

    /// When the product was favorited
    pub created_at: String,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            product_uuid: favorite.product_uuid,
            created_at: favorite.created_at.to_string(),
        }
    }
}

/// List Favorites Handler
///
/// Returns the caller's favorites, newest first.
#[endpoint(
    tags("favorites"),
    summary = "List Favorites",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<FavoriteResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let favorites = state
        .app
        .favorites
        .list_favorites(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(favorites.into_iter().map(FavoriteResponse::from).collect()))
}
