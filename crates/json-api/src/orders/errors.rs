//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use pasal_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Caller may not access this order")
        }
        OrdersServiceError::Pricing(source) => StatusError::bad_request().brief(source.to_string()),
        OrdersServiceError::StateConflict(state) => {
            StatusError::conflict().brief(format!("order is {state}"))
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order payload"),
        OrdersServiceError::Sql(source) => {
            error!("failed to process order: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
    }
}
