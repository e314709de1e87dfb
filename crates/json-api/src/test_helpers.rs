//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use pasal::PriceTotals;
use pasal_app::{
    auth::{Actor, MockAuthService, Role},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        favorites::MockFavoritesService,
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, PaymentMethod, PaymentState},
        },
        otp::MockOtpService,
        payments::MockPaymentsService,
        products::{MockProductsService, models::Product},
    },
};

use crate::state::State;

pub(crate) const TEST_ACTOR: Actor = Actor {
    user: Uuid::nil(),
    role: Role::Customer,
};

pub(crate) const TEST_ADMIN: Actor = Actor {
    user: Uuid::max(),
    role: Role::Admin,
};

/// Mocked services, all strict by default: any call fails the test unless
/// an expectation was set.
#[derive(Default)]
pub(crate) struct MockServices {
    pub auth: MockAuthService,
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub payments: MockPaymentsService,
    pub favorites: MockFavoritesService,
    pub otp: MockOtpService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            auth: Arc::new(self.auth),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            payments: Arc::new(self.payments),
            favorites: Arc::new(self.favorites),
            otp: Arc::new(self.otp),
        };

        Arc::new(State::new(
            app,
            "https://shop.example.com/orders".to_string(),
        ))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

/// A service wrapping `route` with the given state and a pre-authenticated
/// actor, skipping the auth middleware.
pub(crate) fn service_as(state: Arc<State>, actor: Actor, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject(actor))
            .push(route),
    )
}

pub(crate) fn make_product(uuid: Uuid) -> Product {
    Product {
        uuid,
        name: "Lokta notebook".to_string(),
        price: Decimal::new(5000, 2),
        stock: 10,
        discount: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_totals() -> PriceTotals {
    PriceTotals {
        items: Decimal::new(15000, 2),
        shipping: Decimal::new(0, 2),
        tax: Decimal::new(2250, 2),
        total: Decimal::new(17250, 2),
        savings: Decimal::new(0, 2),
    }
}

pub(crate) fn make_order(uuid: Uuid, user: Uuid) -> Order {
    Order {
        uuid,
        user_uuid: user,
        payment_method: PaymentMethod::Khalti,
        payment_state: PaymentState::Pending,
        items: vec![OrderItem {
            uuid: Uuid::nil(),
            product_uuid: Uuid::nil(),
            name: "Lokta notebook".to_string(),
            quantity: 3,
            unit_price: Decimal::new(5000, 2),
            discount_percentage: None,
        }],
        totals: make_totals(),
        is_paid: false,
        paid_at: None,
        is_delivered: false,
        delivered_at: None,
        is_cancelled: false,
        cancelled_at: None,
        cancel_reason: None,
        gateway_pidx: None,
        gateway_transaction_id: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
