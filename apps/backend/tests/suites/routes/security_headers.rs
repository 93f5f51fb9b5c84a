//! Hardening headers on success and error responses.

use actix_web::test;
use joli_backend::AppError;

use crate::support::{build_test_state, create_test_app};

const EXPECTED: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("cache-control", "no-store"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
];

#[actix_web::test]
async fn health_carries_security_headers() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    for (name, value) in EXPECTED {
        assert_eq!(resp.headers().get(name).unwrap(), value, "{name}");
    }
    assert!(resp.headers().contains_key("strict-transport-security"));
    assert!(resp.headers().contains_key("x-request-id"));
    Ok(())
}

#[actix_web::test]
async fn error_responses_carry_security_headers() -> Result<(), AppError> {
    let app = create_test_app(build_test_state().await?).build().await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/games/1").to_request()).await;
    assert_eq!(resp.status().as_u16(), 401);
    for (name, value) in EXPECTED {
        assert_eq!(resp.headers().get(name).unwrap(), value, "{name}");
    }
    Ok(())
}
