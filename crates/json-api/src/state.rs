//! State

use std::sync::Arc;

use bakehouse::orders::{Checkout, DeferredOpener};
use bakehouse_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) checkout: Arc<Checkout<DeferredOpener>>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, checkout: Checkout<DeferredOpener>) -> Self {
        Self {
            app,
            checkout: Arc::new(checkout),
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, checkout: Checkout<DeferredOpener>) -> Arc<Self> {
        Arc::new(Self::new(app, checkout))
    }
}
