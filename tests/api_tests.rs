// tests/api_tests.rs

mod common;

use common::{lazy_pool, spawn_app, test_config};
use quizboard::config::{AccessSettings, GameSettings};

async fn spawn_offline(access: AccessSettings) -> String {
    let config = test_config("postgres://unused", GameSettings::default(), access);
    spawn_app(lazy_pool(), config).await
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_offline(AccessSettings::default()).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn maintenance_mode_blocks_api() {
    let address = spawn_offline(AccessSettings {
        maintenance_mode: true,
        maintenance_message: "Back after exams".to_string(),
        ..AccessSettings::default()
    })
    .await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/leaderboard/ABC1234", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Back after exams");
}

#[tokio::test]
async fn disabled_mobile_api_blocks_submissions() {
    let address = spawn_offline(AccessSettings {
        enable_mobile_api: false,
        ..AccessSettings::default()
    })
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/submit/1", address))
        .json(&serde_json::json!({ "student_id": 1, "answers": {} }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Mobile API is disabled by admin");
}

#[tokio::test]
async fn submit_requires_student_id() {
    let address = spawn_offline(AccessSettings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/submit/1", address))
        .json(&serde_json::json!({ "answers": { "1": "A" } }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submit_rejects_non_positive_student_id() {
    let address = spawn_offline(AccessSettings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/submit/1", address))
        .json(&serde_json::json!({ "student_id": 0, "answers": {} }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submit_rejects_malformed_answers() {
    let address = spawn_offline(AccessSettings::default()).await;
    let client = reqwest::Client::new();

    for answers in [
        serde_json::json!({ "first": "A" }),
        serde_json::json!({ "1": 42 }),
        serde_json::json!({ "1": ["paris", "france"] }),
    ] {
        let response = client
            .post(&format!("{}/api/submit/1", address))
            .json(&serde_json::json!({ "student_id": 7, "answers": answers }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 400, "answers: {}", answers);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("invalid submission"),
            "unexpected body: {}",
            body
        );
    }
}

#[tokio::test]
async fn submit_rejects_wrongly_typed_student_id() {
    let address = spawn_offline(AccessSettings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/submit/1", address))
        .json(&serde_json::json!({ "student_id": "seven", "answers": {} }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}
