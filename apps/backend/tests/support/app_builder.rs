use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use joli_backend::middleware::rate_limit::JoinRateLimit;
use joli_backend::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use joli_backend::routes;
use joli_backend::state::app_state::AppState;

/// Effectively unlimited, for tests that are not about rate limiting.
pub const GENEROUS_JOIN_LIMIT: u64 = 10_000;

/// Test service wired like `main.rs`: same middleware order, same routes.
pub struct TestAppBuilder {
    state: AppState,
    join_rate_limit_per_minute: u64,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            join_rate_limit_per_minute: GENEROUS_JOIN_LIMIT,
        }
    }

    pub fn with_join_rate_limit(mut self, per_minute: u64) -> Self {
        self.join_rate_limit_per_minute = per_minute;
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let join_limit = JoinRateLimit::new(self.join_rate_limit_per_minute);

        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .wrap(SecurityHeaders)
                .app_data(data)
                .configure(move |cfg| routes::configure(cfg, &join_limit)),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
