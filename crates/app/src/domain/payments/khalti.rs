//! Khalti ePayment client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::payments::models::{InitiateRequest, InitiatedPayment, PaymentLookup};

/// Configuration for connecting to the Khalti ePayment API.
#[derive(Debug, Clone)]
pub struct KhaltiConfig {
    /// API base, e.g. `"https://dev.khalti.com/api/v2"`.
    pub base_url: String,

    /// Merchant secret key, sent as the `Authorization: key ...` header.
    pub secret_key: String,

    /// Where the gateway redirects the customer after payment.
    pub return_url: String,

    /// Merchant site URL, required by the initiate endpoint.
    pub website_url: String,
}

/// Errors from the gateway client.
#[derive(Debug, Error)]
pub enum KhaltiError {
    /// Network failure or non-2xx response status.
    #[error("gateway request failed")]
    Http(#[from] reqwest::Error),

    /// A 2xx response whose body was not what the API documents.
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),
}

/// The outbound seam to the payment gateway.
///
/// `initiate` starts a charge; `lookup` is the authoritative re-check the
/// verification workflow relies on instead of callback parameters.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a charge for the given purchase order.
    async fn initiate(&self, request: InitiateRequest) -> Result<InitiatedPayment, KhaltiError>;

    /// Fetch the current, authoritative state of a payment session.
    async fn lookup(&self, pidx: &str) -> Result<PaymentLookup, KhaltiError>;
}

/// HTTP client for the Khalti ePayment API.
#[derive(Debug, Clone)]
pub struct KhaltiClient {
    config: KhaltiConfig,
    http: Client,
}

impl KhaltiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: KhaltiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn auth_header(&self) -> String {
        format!("key {}", self.config.secret_key)
    }
}

#[async_trait]
impl PaymentGateway for KhaltiClient {
    async fn initiate(&self, request: InitiateRequest) -> Result<InitiatedPayment, KhaltiError> {
        let url = format!("{}/epayment/initiate/", self.config.base_url);

        let body = serde_json::json!({
            "return_url": self.config.return_url,
            "website_url": self.config.website_url,
            "amount": request.amount_paisa,
            "purchase_order_id": request.purchase_order_id,
            "purchase_order_name": request.purchase_order_name,
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(KhaltiError::UnexpectedResponse(format!(
                "initiate request failed with status {status}: {text}"
            )));
        }

        let parsed: InitiateResponse = response.json().await?;

        Ok(InitiatedPayment {
            pidx: parsed.pidx,
            payment_url: parsed.payment_url,
        })
    }

    async fn lookup(&self, pidx: &str) -> Result<PaymentLookup, KhaltiError> {
        let url = format!("{}/epayment/lookup/", self.config.base_url);

        let body = serde_json::json!({ "pidx": pidx });

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(KhaltiError::UnexpectedResponse(format!(
                "lookup request failed with status {status}: {text}"
            )));
        }

        let parsed: LookupResponse = response.json().await?;

        Ok(PaymentLookup {
            pidx: parsed.pidx,
            total_paisa: parsed.total_amount,
            status: parsed.status,
            transaction_id: parsed.transaction_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct InitiateResponse {
    pidx: String,
    payment_url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    pidx: String,
    total_amount: i64,
    status: String,
    transaction_id: Option<String>,
}

/// Build the initiate request for an order.
#[must_use]
pub fn initiate_request_for(order: Uuid, amount_paisa: i64) -> InitiateRequest {
    InitiateRequest {
        amount_paisa,
        purchase_order_id: order,
        purchase_order_name: format!("Order {order}"),
    }
}
