//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use bakehouse_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, form, handlers::ProductResponse},
    state::State,
};

/// Update Product Handler
///
/// Replaces the product's details. The stored image is kept unless a new one is uploaded.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, req, depot),
    fields(product_uuid = tracing::field::Empty, has_image = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let form = form::read(req).await?;
    let product = product.into_inner();

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(product));
    span.record("has_image", form.image.is_some());

    let product = state
        .app
        .products
        .update_product(
            product.into(),
            ProductUpdate {
                details: form.details,
                image: form.image,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bakehouse_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_product_returns_updated_record() -> TestResult {
        let record = make_product("Brownie", "Bakes");
        let uuid = record.uuid;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |product, update| {
                *product == uuid
                    && update.details.sale == Some(dec!(5))
                    && update.image.is_none()
            })
            .return_once(move |_, update| {
                Ok(bakehouse_app::domain::products::records::ProductRecord {
                    sale: update.details.sale,
                    ..record
                })
            });

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .form(&[
                ("title", "Brownie"),
                ("description", "Fudgy"),
                ("category", "Bakes"),
                ("price", "8.50"),
                ("sale", "5"),
            ])
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.sale, Some(dec!(5)));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{}", Uuid::now_v7()))
            .form(&[
                ("title", "Brownie"),
                ("description", "Fudgy"),
                ("category", "Bakes"),
            ])
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
