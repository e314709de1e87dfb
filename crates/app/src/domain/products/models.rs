//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use pasal::DiscountWindow;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
    pub discount: Option<DiscountWindow>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
    pub discount: Option<DiscountWindow>,
}

/// Product Update Model
///
/// Full replacement of the mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
    pub discount: Option<DiscountWindow>,
}
