//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use pasal_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Pricing(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CartsServiceError::Sql(source) => {
            error!("failed to price cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
