//! Remove Favorite Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use pasal_app::domain::favorites::FavoritesService;

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Remove Favorite Handler
#[endpoint(
    tags("favorites"),
    summary = "Remove Favorite",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    state
        .app
        .favorites
        .remove_favorite(actor, product.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use pasal_app::domain::favorites::{FavoritesServiceError, MockFavoritesService};

    use crate::test_helpers::{MockServices, TEST_ACTOR, service_as};

    use super::*;

    fn make_service(favorites: MockFavoritesService) -> Service {
        let state = MockServices {
            favorites,
            ..MockServices::default()
        }
        .into_state();

        service_as(
            state,
            TEST_ACTOR,
            Router::with_path("favorites/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_favorite_returns_204() -> TestResult {
        let product = Uuid::now_v7();

        let mut favorites = MockFavoritesService::new();

        favorites
            .expect_remove_favorite()
            .once()
            .withf(move |actor, p| *actor == TEST_ACTOR && *p == product)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/favorites/{product}"))
            .send(&make_service(favorites))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_returns_404() -> TestResult {
        let product = Uuid::now_v7();

        let mut favorites = MockFavoritesService::new();

        favorites
            .expect_remove_favorite()
            .once()
            .return_once(|_, _| Err(FavoritesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/favorites/{product}"))
            .send(&make_service(favorites))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
