//! End-to-end HTTP contract tests through the full router.
//!
//! Run with: cargo test --test api_test

mod common;

use axum::http::{Method, StatusCode};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use estove_api::config::Config;
use estove_api::entity::{commands, stove_data};

#[tokio::test]
async fn root_and_health() {
    let (app, _db) = common::setup_app().await;

    let (status, text) = common::send_text(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "Welcome to eStove API!");

    let (status, body) = common::send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn latest_without_data_reports_message() {
    let (app, _db) = common::setup_app().await;

    let (status, body) =
        common::send_json(&app, Method::GET, "/api/stove-data/latest", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "No data available" }));
}

#[tokio::test]
async fn device_reading_round_trip() {
    let (app, _db) = common::setup_app().await;

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/stove-data",
        Some(json!({
            "temperature": "182.5",
            "relay": true,
            "manualMode": false,
            "cooking": true,
            "timeLeft": 95
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data saved successfully");
    assert_eq!(body["data"]["temperature"], 182.5);
    assert!(body["data"].get("commandId").is_none());

    let (_, latest) = common::send_json(&app, Method::GET, "/api/stove-data/latest", None).await;
    assert_eq!(latest, body["data"]);
}

#[tokio::test]
async fn malformed_reading_is_bad_request() {
    let (app, db) = common::setup_app().await;

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/stove-data",
        Some(json!({ "temperature": "hot", "relay": true, "manualMode": false, "cooking": true, "timeLeft": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("temperature"));

    let (status, _) = common::send_json(
        &app,
        Method::POST,
        "/api/stove-data",
        Some(json!({ "temperature": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(stove_data::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn start_cooking_scenario() {
    let (app, db) = common::setup_app().await;

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/start-cooking",
        Some(json!({ "seconds": 300, "foodType": "rice", "weight": 0.5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cooking started successfully");

    let command = &body["command"];
    assert_eq!(command["command"], "start");
    assert_eq!(command["seconds"], 300);
    assert_eq!(command["processed"], false);

    let data = &body["data"];
    assert_eq!(data["temperature"], 0.0);
    assert_eq!(data["relay"], true);
    assert_eq!(data["manualMode"], false);
    assert_eq!(data["cooking"], true);
    assert_eq!(data["timeLeft"], 300);
    assert_eq!(data["commandId"], command["id"]);

    let (_, latest) = common::send_json(&app, Method::GET, "/api/stove-data/latest", None).await;
    assert_eq!(&latest, data);

    let (_, pending) = common::send_json(&app, Method::GET, "/api/commands/pending", None).await;
    assert_eq!(&pending, command);

    assert_eq!(commands::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(stove_data::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn start_cooking_rejects_invalid_seconds() {
    let (app, db) = common::setup_app().await;

    for body in [json!({}), json!({ "seconds": 0 }), json!({ "seconds": -5 }), json!({ "seconds": "soon" })] {
        let (status, response) =
            common::send_json(&app, Method::POST, "/api/start-cooking", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "Invalid cooking time");
    }

    assert_eq!(commands::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(stove_data::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn stop_cooking_scenario() {
    let (app, _db) = common::setup_app().await;

    common::send_json(
        &app,
        Method::POST,
        "/api/start-cooking",
        Some(json!({ "seconds": 120 })),
    )
    .await;
    let (status, body) = common::send_json(&app, Method::POST, "/api/stop-cooking", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"]["command"], "stop");
    assert_eq!(body["command"]["seconds"], 0);

    let (_, latest) = common::send_json(&app, Method::GET, "/api/stove-data/latest", None).await;
    assert_eq!(latest["relay"], false);
    assert_eq!(latest["cooking"], false);
    assert_eq!(latest["timeLeft"], 0);
}

#[tokio::test]
async fn toggle_manual_sets_optimistic_state() {
    let (app, _db) = common::setup_app().await;

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/toggle-manual",
        Some(json!({ "manualMode": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"]["command"], "manual_on");
    assert_eq!(body["data"]["relay"], true);
    assert_eq!(body["data"]["manualMode"], true);
    assert_eq!(body["data"]["cooking"], true);

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/toggle-manual",
        Some(json!({ "manualMode": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"]["command"], "manual_off");
    assert_eq!(body["data"]["relay"], false);
    assert_eq!(body["data"]["manualMode"], false);

    let (status, _) = common::send_json(
        &app,
        Method::POST,
        "/api/toggle-manual",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_without_flag_queues_nothing() {
    let (app, db) = common::setup_app().await;

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/toggle-manual",
        Some(json!({ "manualMode": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "manualMode must be a boolean");

    assert_eq!(commands::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(stove_data::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn device_polls_and_acknowledges_in_order() {
    let (app, _db) = common::setup_app().await;

    let (_, started) = common::send_json(
        &app,
        Method::POST,
        "/api/start-cooking",
        Some(json!({ "seconds": 60 })),
    )
    .await;
    let (_, stopped) = common::send_json(&app, Method::POST, "/api/stop-cooking", None).await;

    let (_, pending) = common::send_json(&app, Method::GET, "/api/commands/pending", None).await;
    assert_eq!(pending["id"], started["command"]["id"]);

    let (status, ack) = common::send_json(
        &app,
        Method::POST,
        "/api/commands/processed",
        Some(json!({ "commandId": pending["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({ "message": "Command marked as processed" }));

    // Repeating the acknowledgment is harmless
    let (status, _) = common::send_json(
        &app,
        Method::POST,
        "/api/commands/processed",
        Some(json!({ "commandId": pending["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, pending) = common::send_json(&app, Method::GET, "/api/commands/pending", None).await;
    assert_eq!(pending["id"], stopped["command"]["id"]);

    common::send_json(
        &app,
        Method::POST,
        "/api/commands/processed",
        Some(json!({ "commandId": pending["id"].to_string() })),
    )
    .await;

    let (_, pending) = common::send_json(&app, Method::GET, "/api/commands/pending", None).await;
    assert_eq!(pending, json!({ "message": "No pending commands" }));
}

#[tokio::test]
async fn acknowledging_unknown_command_leaves_queue_unchanged() {
    let (app, db) = common::setup_app().await;

    common::send_json(&app, Method::POST, "/api/stop-cooking", None).await;
    let before = commands::Entity::find().all(&db).await.unwrap();

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/commands/processed",
        Some(json!({ "commandId": 4242 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = common::send_json(
        &app,
        Method::POST,
        "/api/commands/processed",
        Some(json!({ "commandId": "not-an-id" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let after = commands::Entity::find().all(&db).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn list_reports_pagination() {
    let (app, _db) = common::setup_app().await;

    for t in 0..5 {
        common::send_json(
            &app,
            Method::POST,
            "/api/stove-data",
            Some(json!({ "temperature": t, "relay": false, "manualMode": false, "cooking": false, "timeLeft": 0 })),
        )
        .await;
    }

    let (status, body) =
        common::send_json(&app, Method::GET, "/api/stove-data?page=2&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["pagination"],
        json!({ "page": 2, "limit": 2, "total": 5, "pages": 3 })
    );

    let (_, body) =
        common::send_json(&app, Method::GET, "/api/stove-data?page=zero&limit=-1", None).await;
    assert_eq!(
        body["pagination"],
        json!({ "page": 1, "limit": 50, "total": 5, "pages": 1 })
    );
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let (app, _db) = common::setup_app().await;

    common::send_json(
        &app,
        Method::POST,
        "/api/stove-data",
        Some(json!({ "temperature": 20, "relay": false, "manualMode": false, "cooking": false, "timeLeft": 0 })),
    )
    .await;

    let (status, body) = common::send_json(
        &app,
        Method::GET,
        "/api/stove-data?page=9223372036854775807&limit=1000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(
        body["pagination"],
        json!({ "page": 9_223_372_036_854_775_807_u64, "limit": 1000, "total": 1, "pages": 1 })
    );
}

#[tokio::test]
async fn range_endpoint_validates_bounds() {
    let (app, _db) = common::setup_app().await;

    common::send_json(
        &app,
        Method::POST,
        "/api/stove-data",
        Some(json!({ "temperature": 30, "relay": false, "manualMode": false, "cooking": false, "timeLeft": 0 })),
    )
    .await;

    let (status, body) = common::send_json(
        &app,
        Method::GET,
        "/api/stove-data/range?start=2000-01-01T00:00:00Z&end=2999-01-01T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = common::send_json(
        &app,
        Method::GET,
        "/api/stove-data/range?start=2000-01-01&end=2000-01-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = common::send_json(
        &app,
        Method::GET,
        "/api/stove-data/range?start=garbage&end=2000-01-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        common::send_json(&app, Method::GET, "/api/stove-data/range?start=2000-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn disabled_queue_writes_state_only() {
    let config = Config {
        command_queue_enabled: false,
        ..Config::default()
    };
    let (app, db) = common::setup_app_with(config).await;

    let (status, body) = common::send_json(
        &app,
        Method::POST,
        "/api/start-cooking",
        Some(json!({ "seconds": 90 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("command").is_none());
    assert_eq!(body["data"]["timeLeft"], 90);

    let (_, pending) = common::send_json(&app, Method::GET, "/api/commands/pending", None).await;
    assert_eq!(pending, json!({ "message": "No pending commands" }));
    assert_eq!(commands::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn slow_request_times_out() {
    let config = Config {
        request_timeout_seconds: 0,
        ..Config::default()
    };
    let (app, _db) = common::setup_app_with(config).await;

    let (status, _) = common::send_text(&app, Method::GET, "/api/stove-data/latest").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}
