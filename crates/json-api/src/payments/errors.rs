//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use pasal_app::domain::payments::PaymentsServiceError;

/// Map a payments error to a status error, for the JSON (initiate) side.
///
/// The verify callback never uses this; it resolves every failure to a
/// redirect instead (see [`super::verify`]).
pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        PaymentsServiceError::Forbidden => {
            StatusError::forbidden().brief("Caller may not pay for this order")
        }
        PaymentsServiceError::StateConflict(state) => {
            StatusError::conflict().brief(format!("order is {state}"))
        }
        PaymentsServiceError::NotInitiated => {
            StatusError::conflict().brief("No payment was initiated for this order")
        }
        PaymentsServiceError::AmountOverflow => {
            StatusError::bad_request().brief("Order total cannot be charged")
        }
        PaymentsServiceError::Gateway(source) => {
            error!("payment gateway call failed: {source}");

            StatusError::bad_gateway().brief("Payment gateway unavailable; try again")
        }
        PaymentsServiceError::StatusNotCompleted(_) | PaymentsServiceError::AmountMismatch { .. } => {
            StatusError::conflict().brief("Payment is not in a confirmable state")
        }
        PaymentsServiceError::ProductMissing(_) | PaymentsServiceError::Sql(_) => {
            error!("failed to process payment: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Stable reason slug carried on error redirects from the verify leg.
pub(crate) fn redirect_reason(error: &PaymentsServiceError) -> &'static str {
    match error {
        PaymentsServiceError::OrderNotFound => "order-not-found",
        PaymentsServiceError::Forbidden => "forbidden",
        PaymentsServiceError::StateConflict(_) => "order-not-payable",
        PaymentsServiceError::NotInitiated => "payment-not-initiated",
        PaymentsServiceError::AmountOverflow => "amount-invalid",
        PaymentsServiceError::Gateway(_) => "gateway-unavailable",
        PaymentsServiceError::StatusNotCompleted(_) => "payment-not-completed",
        PaymentsServiceError::AmountMismatch { .. } => "amount-mismatch",
        PaymentsServiceError::ProductMissing(_) | PaymentsServiceError::Sql(_) => "storage-error",
    }
}
