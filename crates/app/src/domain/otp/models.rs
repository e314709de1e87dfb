//! OTP Models

use jiff::Timestamp;

/// A freshly issued one-time code.
///
/// The raw code is returned exactly once, for delivery to the user; only
/// its digest is stored.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub code: String,
    pub expires_at: Timestamp,
}

/// Stored OTP Record
#[derive(Debug, Clone)]
pub(crate) struct OtpRecord {
    pub code_hash: String,
    pub expires_at: Timestamp,
}
