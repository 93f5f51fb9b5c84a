//! Organizer routes under `/api/games`. All require a bearer token
//! (`JwtExtract` wraps the scope) and operate on the caller's own games.

use actix_web::{web, HttpResponse};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::entities::games::GameStatus;
use crate::error::AppError;
use crate::extractors::{CurrentOrganizer, GameId, ValidatedJson};
use crate::repos::games::Game;
use crate::services::{games as game_service, join_codes as join_code_service};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: GameStatus,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GameResponse {
    pub id: i64,
    pub name: Option<String>,
    pub status: GameStatus,
    pub join_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JoinCodeResponse {
    pub game_id: i64,
    pub join_code: String,
}

fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

impl From<Game> for GameResponse {
    fn from(g: Game) -> Self {
        Self {
            id: g.id,
            name: g.name,
            status: g.status,
            join_code: g.join_code,
            created_at: rfc3339(g.created_at),
            updated_at: rfc3339(g.updated_at),
        }
    }
}

/// POST /api/games
async fn create_game(
    organizer: CurrentOrganizer,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let owner = organizer.sub;
    let name = body.into_inner().name;

    let game = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(game_service::create_game(txn, &owner, name).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameResponse::from(game)))
}

/// GET /api/games/{game_id}
async fn get_game(
    organizer: CurrentOrganizer,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let owner = organizer.sub;
    let id = game_id.0;

    let game = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(game_service::get_game(txn, &owner, id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from(game)))
}

/// PATCH /api/games/{game_id}/status
async fn set_status(
    organizer: CurrentOrganizer,
    game_id: GameId,
    body: ValidatedJson<SetStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let owner = organizer.sub;
    let id = game_id.0;
    let next = body.status;

    let game = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(game_service::set_status(txn, &owner, id, next).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from(game)))
}

/// POST /api/games/{game_id}/join-code
///
/// Issues a fresh code, replacing any current one.
async fn issue_join_code(
    organizer: CurrentOrganizer,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let owner = organizer.sub;
    let id = game_id.0;
    let settings = app_state.join_codes;
    let mut rng = StdRng::from_os_rng();

    let code = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            Ok(join_code_service::issue_code(txn, &mut rng, settings, &owner, id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(JoinCodeResponse {
        game_id: id,
        join_code: code.into_inner(),
    }))
}

/// DELETE /api/games/{game_id}/join-code
async fn revoke_join_code(
    organizer: CurrentOrganizer,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let owner = organizer.sub;
    let id = game_id.0;

    with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(join_code_service::revoke_code(txn, &owner, id).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Routes relative to the `/api/games` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)))
        .service(web::resource("/{game_id}").route(web::get().to(get_game)))
        .service(web::resource("/{game_id}/status").route(web::patch().to(set_status)))
        .service(
            web::resource("/{game_id}/join-code")
                .route(web::post().to(issue_join_code))
                .route(web::delete().to(revoke_join_code)),
        );
}
