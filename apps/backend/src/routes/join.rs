//! Anonymous participant redemption.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::services::join_codes as join_code_service;
use crate::state::app_state::AppState;

/// `code` is kept loose so a missing, null or non-string value reports
/// `INVALID_JOIN_CODE` rather than a generic body error.
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub code: Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JoinResponse {
    pub game_id: i64,
}

/// POST /api/join
async fn join(
    body: ValidatedJson<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let Value::String(raw) = body.into_inner().code else {
        return Err(AppError::invalid(
            ErrorCode::InvalidJoinCode,
            "A join code is required",
        ));
    };
    let settings = app_state.join_codes;

    let game_id = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(join_code_service::join(txn, settings, &raw).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(JoinResponse { game_id }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(join)));
}
