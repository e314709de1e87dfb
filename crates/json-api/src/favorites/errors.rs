//! Favorite Errors

use salvo::http::StatusError;
use tracing::error;

use pasal_app::domain::favorites::FavoritesServiceError;

pub(crate) fn into_status_error(error: FavoritesServiceError) -> StatusError {
    match error {
        FavoritesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already in favorites")
        }
        FavoritesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product")
        }
        FavoritesServiceError::Sql(source) => {
            error!("failed to process favorite: {source}");

            StatusError::internal_server_error()
        }
        FavoritesServiceError::NotFound => StatusError::not_found().brief("Favorite not found"),
    }
}
