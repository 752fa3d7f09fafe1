//! List Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use bakehouse::{
    catalog::{CatalogQuery, arrange, filter},
    products::Product,
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

/// List Products Handler
///
/// Returns the products matching the category and search filters, in display order.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products in display order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products: Vec<Product> = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_status_error)?
        .into_iter()
        .map(Product::from)
        .collect();

    let query = CatalogQuery {
        category: category.into_inner(),
        search: search.into_inner(),
    };

    let matching = filter(&products, &query).into_iter().cloned().collect();

    let products = arrange(matching, query.category())
        .into_iter()
        .flat_map(|group| group.products)
        .map(ProductResponse::from)
        .collect();

    Ok(Json(products))
}
