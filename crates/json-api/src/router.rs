//! App Router

use salvo::Router;

use crate::{auth, carts, favorites, orders, payments, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        // The gateway's return redirect carries no bearer token, so the
        // verify leg stays outside the authenticated subtree.
        .push(Router::with_path("payments/verify").get(payments::verify::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .get(products::get::handler)
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                )
                .push(Router::with_path("cart/price").post(carts::price::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(Router::with_path("cancel").post(orders::cancel::handler))
                                .push(Router::with_path("deliver").post(orders::deliver::handler)),
                        ),
                )
                .push(Router::with_path("payments/initiate").post(payments::initiate::handler))
                .push(
                    Router::with_path("favorites")
                        .get(favorites::index::handler)
                        .post(favorites::create::handler)
                        .push(Router::with_path("{product}").delete(favorites::delete::handler)),
                ),
        )
}
