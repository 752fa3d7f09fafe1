//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::dec;
use salvo::{affix_state::inject, prelude::*};

use bakehouse::orders::{Checkout, DeferredOpener};
use bakehouse_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        promotions::{
            MockPromotionsService,
            records::{PromotionRecord, PromotionUuid},
        },
    },
};

use crate::state::State;

pub(crate) const TEST_WHATSAPP_NUMBER: &str = "60123456789";

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_promotions_mock() -> MockPromotionsService {
    let mut promotions = MockPromotionsService::new();

    promotions.expect_list_promotions().never();
    promotions.expect_list_active().never();
    promotions.expect_create_promotion().never();
    promotions.expect_update_promotion().never();
    promotions.expect_delete_promotion().never();

    promotions
}

fn state_with(
    products: MockProductsService,
    promotions: MockPromotionsService,
    auth: MockAuthService,
) -> Arc<State> {
    let app = AppContext {
        products: Arc::new(products),
        promotions: Arc::new(promotions),
        auth: Arc::new(auth),
    };

    State::shared(app, Checkout::new(TEST_WHATSAPP_NUMBER, DeferredOpener))
}

fn service_with(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_with(
        state_with(products, strict_promotions_mock(), strict_auth_mock()),
        route,
    )
}

pub(crate) fn promotions_service(promotions: MockPromotionsService, route: Router) -> Service {
    service_with(
        state_with(strict_products_mock(), promotions, strict_auth_mock()),
        route,
    )
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    service_with(
        state_with(strict_products_mock(), strict_promotions_mock(), auth),
        route,
    )
}

pub(crate) fn orders_service(route: Router) -> Service {
    service_with(
        state_with(
            strict_products_mock(),
            strict_promotions_mock(),
            strict_auth_mock(),
        ),
        route,
    )
}

/// A fixed-price product record.
pub(crate) fn make_product(title: &str, category: &str) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        title: title.to_string(),
        description: format!("Freshly baked {}", title.to_lowercase()),
        category: category.to_string(),
        price: Some(dec!(8.5)),
        sale: None,
        image: None,
        variation_categories: Vec::new(),
        types: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_promotion(message: &str, active: bool) -> PromotionRecord {
    PromotionRecord {
        uuid: PromotionUuid::new(),
        message: message.to_string(),
        active,
        expires_at: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
