//! Organizer game and join code endpoints.

use actix_web::test;
use backend_test_support::unique_helpers::unique_owner_sub;
use joli_backend::config::join_codes::JoinCodeSettings;
use joli_backend::entities::games::GameStatus;
use joli_backend::routes::games::{GameResponse, JoinCodeResponse};
use joli_backend::utils::join_code::{is_valid_format, CODE_ALPHABET};
use joli_backend::AppError;
use serde_json::json;

use crate::common::assert_problem;
use crate::support::auth::bearer_header;
use crate::support::factory::{create_game_in, hold_symbol};
use crate::support::test_state::{build_test_state_with, test_security};
use crate::support::{build_test_state, create_test_app};

fn auth(sub: &str) -> (&'static str, String) {
    ("Authorization", bearer_header(sub, &test_security()))
}

#[actix_web::test]
async fn create_then_fetch_game() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth(&owner))
        .set_json(json!({ "name": "Friday quiz" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: GameResponse = test::read_body_json(resp).await;
    assert_eq!(created.status, GameStatus::Draft);
    assert_eq!(created.name.as_deref(), Some("Friday quiz"));
    assert_eq!(created.join_code, None);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", created.id))
        .insert_header(auth(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let fetched: GameResponse = test::read_body_json(resp).await;
    assert_eq!(fetched, created);
    Ok(())
}

#[actix_web::test]
async fn create_accepts_an_empty_body_object() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth(&owner))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_bad_request() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let app = create_test_app(build_test_state().await?).build().await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(auth(&owner))
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 400, "BAD_REQUEST", Some("Invalid JSON")).await;
    Ok(())
}

#[actix_web::test]
async fn other_organizers_get_403() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let state = build_test_state().await?;
    let game = create_game_in(state.db().unwrap(), &owner, GameStatus::Draft).await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .insert_header(auth(&unique_owner_sub("intruder")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 403, "FORBIDDEN", None).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/join-code", game.id))
        .insert_header(auth(&unique_owner_sub("intruder")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 403, "FORBIDDEN", None).await;
    Ok(())
}

#[actix_web::test]
async fn bad_and_missing_game_ids() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let app = create_test_app(build_test_state().await?).build().await;

    for bad in ["abc", "0", "-4"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/games/{bad}"))
            .insert_header(auth(&owner))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem(resp, 400, "INVALID_GAME_ID", None).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/games/424242")
        .insert_header(auth(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "GAME_NOT_FOUND", None).await;
    Ok(())
}

#[actix_web::test]
async fn status_patch_applies_transitions() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let state = build_test_state().await?;
    let game = create_game_in(state.db().unwrap(), &owner, GameStatus::Draft).await?;
    let app = create_test_app(state).build().await;
    let uri = format!("/api/games/{}/status", game.id);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(auth(&owner))
        .set_json(json!({ "status": "active" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: GameResponse = test::read_body_json(resp).await;
    assert_eq!(body.status, GameStatus::Active);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(auth(&owner))
        .set_json(json!({ "status": "draft" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 400, "INVALID_STATUS_TRANSITION", Some("active")).await;

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(auth(&owner))
        .set_json(json!({ "status": "paused" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 400, "BAD_REQUEST", None).await;
    Ok(())
}

#[actix_web::test]
async fn issue_and_revoke_join_code() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let state = build_test_state().await?;
    let game = create_game_in(state.db().unwrap(), &owner, GameStatus::Active).await?;
    let app = create_test_app(state).build().await;
    let uri = format!("/api/games/{}/join-code", game.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(auth(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let issued: JoinCodeResponse = test::read_body_json(resp).await;
    assert_eq!(issued.game_id, game.id);
    assert!(is_valid_format(&issued.join_code), "{}", issued.join_code);

    let req = crate::routes::join_request(json!({ "code": issued.join_code.to_lowercase() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(auth(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = crate::routes::join_request(json!({ "code": issued.join_code })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 404, "GAME_NOT_FOUND", None).await;

    // Revoking again is fine.
    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(auth(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);
    Ok(())
}

#[actix_web::test]
async fn closed_games_cannot_get_a_code() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let state = build_test_state().await?;
    let game = create_game_in(state.db().unwrap(), &owner, GameStatus::Completed).await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/join-code", game.id))
        .insert_header(auth(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 409, "GAME_CLOSED", None).await;
    Ok(())
}

#[actix_web::test]
async fn full_keyspace_is_409_exhausted() -> Result<(), AppError> {
    let owner = unique_owner_sub("organizer");
    let settings = JoinCodeSettings::new(1, 5)?;
    let state = build_test_state_with(settings).await?;
    let db = state.db().unwrap().clone();
    for (i, &b) in CODE_ALPHABET.iter().enumerate() {
        hold_symbol(&db, &format!("seed-{i}"), b).await?;
    }
    let game = create_game_in(&db, &owner, GameStatus::Draft).await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/join-code", game.id))
        .insert_header(auth(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, 409, "JOIN_CODE_EXHAUSTED", Some("try again")).await;
    Ok(())
}
