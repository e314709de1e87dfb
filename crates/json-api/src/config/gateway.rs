//! Payment Gateway Config

use clap::Args;

/// Khalti payment gateway settings.
#[derive(Debug, Args)]
pub struct GatewayConfig {
    /// Khalti ePayment API base URL
    #[arg(
        long,
        env = "KHALTI_BASE_URL",
        default_value = "https://dev.khalti.com/api/v2"
    )]
    pub khalti_base_url: String,

    /// Khalti merchant secret key
    #[arg(long, env = "KHALTI_SECRET_KEY")]
    pub khalti_secret_key: String,

    /// URL the gateway redirects customers back to after payment
    #[arg(long, env = "PAYMENT_RETURN_URL")]
    pub return_url: String,

    /// Merchant site URL, required by the gateway's initiate endpoint
    #[arg(long, env = "WEBSITE_URL")]
    pub website_url: String,

    /// Client order-status page the verify endpoint redirects to
    #[arg(long, env = "CLIENT_ORDER_URL")]
    pub client_order_url: String,
}
