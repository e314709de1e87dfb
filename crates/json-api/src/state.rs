//! State

use pasal_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Client order-status page the payment verify endpoint redirects to.
    pub(crate) client_order_url: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, client_order_url: String) -> Self {
        Self {
            app,
            client_order_url,
        }
    }
}
