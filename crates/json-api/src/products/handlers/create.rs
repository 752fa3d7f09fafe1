//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use bakehouse_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, form, handlers::ProductResponse},
    state::State,
};

/// Create Product Handler
///
/// Accepts a multipart form with an optional `image` file.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("session_cookie" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(req, depot, res),
    fields(has_image = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let form = form::read(req).await?;

    tracing::Span::current().record("has_image", form.image.is_some());

    let product = state
        .app
        .products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            details: form.details,
            image: form.image,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bakehouse::products::{VariationCategory, VariationOption};
    use bakehouse_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_from_form_returns_201() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|product| {
                product.details.title == "Layer Cake"
                    && product.details.price.is_none()
                    && product.details.variation_categories
                        == [VariationCategory::new(
                            "Size",
                            [VariationOption::new("Large", dec!(15))],
                        )]
                    && product.image.is_none()
            })
            .return_once(|product| {
                let mut record = make_product("Layer Cake", "Cakes");
                record.uuid = product.uuid;
                Ok(record)
            });

        let mut res = TestClient::post("http://example.com/products")
            .form(&[
                ("title", "Layer Cake"),
                ("description", "Three tiers"),
                ("category", "Cakes"),
                (
                    "variationCategories",
                    r#"[{"name":"Size","options":[{"label":"Large","price":15}]}]"#,
                ),
            ])
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            res.headers().get(LOCATION).map(|value| value.to_str()).transpose()?,
            Some(format!("/products/{}", body.id).as_str())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_missing_fields_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::MissingRequiredData));

        let res = TestClient::post("http://example.com/products")
            .form(&[("title", "Layer Cake")])
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_price_never_reaches_service() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .form(&[
                ("title", "Loaf"),
                ("description", "Crusty"),
                ("category", "Bread"),
                ("price", "eight"),
            ])
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
