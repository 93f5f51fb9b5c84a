use actix_extensible_rate_limit::RateLimiter;
use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;
use crate::middleware::rate_limit::{join_rate_limit_config, JoinRateLimit};

pub mod games;
pub mod health;
pub mod join;

/// Register every route with its scope-level middleware.
///
/// - `/health`: open.
/// - `/api/games/**`: organizer bearer auth.
/// - `/api/join`: anonymous, per-IP rate limited.
///
/// App-wide middleware (tracing, CORS, security headers) is wrapped by the
/// caller.
pub fn configure(cfg: &mut web::ServiceConfig, join_limit: &JoinRateLimit) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/api/games")
            .wrap(JwtExtract)
            .configure(games::configure_routes),
    );

    let limiter = RateLimiter::builder(
        join_limit.backend.clone(),
        join_rate_limit_config(join_limit.per_minute).build(),
    )
    .add_headers()
    .build();
    cfg.service(
        web::scope("/api/join")
            .wrap(limiter)
            .configure(join::configure_routes),
    );
}
