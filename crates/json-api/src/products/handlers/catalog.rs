//! Catalog Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bakehouse::{
    catalog::{CatalogQuery, CategoryGroup, arrange, categories, category_counts, filter},
    products::Product,
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

/// A heading and its products.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryGroupResponse {
    pub name: String,
    pub products: Vec<ProductResponse>,
}

impl From<CategoryGroup> for CategoryGroupResponse {
    fn from(group: CategoryGroup) -> Self {
        Self {
            name: group.name,
            products: group.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Catalog Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogResponse {
    /// Category tabs, starting with "All Products"
    pub categories: Vec<String>,

    /// Number of products per category across the whole catalog
    pub counts: BTreeMap<String, usize>,

    /// Matching products grouped for display
    pub groups: Vec<CategoryGroupResponse>,
}

/// Catalog Handler
///
/// Returns the category tabs and the matching products grouped by category.
#[endpoint(
    tags("products"),
    summary = "Browse Catalog",
    responses(
        (status_code = StatusCode::OK, description = "Grouped catalog"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CatalogResponse>, StatusError> {
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

    Ok(Json(CatalogResponse {
        categories: categories(&products),
        counts: category_counts(&products),
        groups: arrange(matching, query.category())
            .into_iter()
            .map(Into::into)
            .collect(),
    }))
}
