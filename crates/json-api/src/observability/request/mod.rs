//! Request-level logging and request IDs.

mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Request ID assigned to the current request, if the logging middleware ran.
pub(crate) fn request_id(depot: &Depot) -> Option<&str> {
    depot
        .get::<String>(REQUEST_ID_DEPOT_KEY)
        .ok()
        .map(String::as_str)
}

/// Middleware wrapping every request in a span and logging its outcome.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogging {
    slow_request_threshold: Duration,
}

impl RequestLogging {
    pub(crate) fn new(slow_request_threshold_ms: u64) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(slow_request_threshold_ms),
        }
    }
}

#[handler]
impl RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let started = Instant::now();

        let request_id =
            request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

        request_ids::set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let route = spans::route_name(&method, &path);

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            route = %route,
            request_id = %request_id,
            method = %method,
            path = %path,
            remote_addr = %req.remote_addr(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res).instrument(span.clone()).await;

        let duration = started.elapsed();
        let status = request_ids::response_status_or_ok(res.status_code);
        let duration_ms = duration.as_millis();

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(status = status.as_u16(), %route, %request_id, "server error response");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), %route, %request_id, "client error response");
            }

            if duration > self.slow_request_threshold {
                warn!(
                    %route,
                    %request_id,
                    duration_ms,
                    threshold_ms = self.slow_request_threshold.as_millis(),
                    "slow request detected"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn echo_request_id(depot: &mut Depot, res: &mut Response) {
        res.render(request_id(depot).unwrap_or("missing").to_string());
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(RequestLogging::new(1_000))
                .get(echo_request_id),
        )
    }

    #[tokio::test]
    async fn test_generates_request_id_when_absent() -> TestResult {
        let mut res = TestClient::get("http://example.com").send(&make_service()).await;

        let header = res
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = res.take_string().await?;

        assert_eq!(header.as_deref(), Some(body.as_str()));
        assert!(uuid::Uuid::parse_str(&body).is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn test_propagates_incoming_request_id() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header("x-request-id", "order-42", true)
            .send(&make_service())
            .await;

        assert_eq!(res.take_string().await?, "order-42");

        Ok(())
    }
}
