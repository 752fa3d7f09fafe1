//! Bakehouse JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use bakehouse::orders::{Checkout, DeferredOpener};
use bakehouse_app::context::AppContext;

use crate::{
    config::ServerConfig,
    extensions::SESSION_COOKIE,
    observability::{RequestLogging, init_logging},
    state::State,
};

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod promotions;
mod responses;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Bakehouse JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let currency = match config.store.currency() {
        Ok(currency) => currency,
        Err(currency_error) => {
            error!("invalid store configuration: {currency_error}");

            process::exit(1);
        }
    };

    let checkout =
        Checkout::new(config.store.whatsapp_number.clone(), DeferredOpener).with_currency(currency);

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::connect(&config.database.database_url, config.backend.into()).await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(RequestLogging::new(config.logging.slow_request_threshold_ms))
        .hoop(inject(State::shared(app, checkout)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("catalog").get(products::catalog::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("promotions").get(promotions::index::handler))
        .push(Router::with_path("orders/checkout").post(orders::checkout::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler))
                .push(Router::with_path("logout").post(auth::handlers::logout::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("products")
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("promotions")
                        .post(promotions::create::handler)
                        .push(
                            Router::with_path("{promotion}")
                                .put(promotions::update::handler)
                                .delete(promotions::delete::handler),
                        ),
                ),
        );

    let doc = OpenApi::new("Bakehouse API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
