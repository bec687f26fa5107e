use reqwest::StatusCode;
use serde_json::{json, Value};
use web_api::routes::v1::query::{CreateQueryBody, UpdateQueryBody, WeatherQuery};

use super::helper::{current_weather_payload, test, TestHelper};

fn create_body(location: &str, start_date: &str, end_date: &str) -> CreateQueryBody {
    CreateQueryBody {
        location: Some(location.into()),
        start_date: Some(start_date.into()),
        end_date: Some(end_date.into()),
    }
}

async fn create(helper: &TestHelper, location: &str) -> WeatherQuery {
    helper.mock_current_weather(location).await;

    let response = helper
        .app
        .create_query(&create_body(location, "2024-01-01", "2024-01-05"))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn all_queries(helper: &TestHelper) -> Vec<WeatherQuery> {
    let response = helper.app.queries().await;
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_create_returns_record_with_frozen_snapshot() {
    test(|helper| async move {
        let created = create(&helper, "London").await;

        assert_eq!(created.id.0, 1);
        assert_eq!(created.location, "London");
        assert_eq!(created.start_date.to_string(), "2024-01-01");
        assert_eq!(created.end_date.to_string(), "2024-01-05");
        assert_eq!(created.result, Some(current_weather_payload("London")));
    })
    .await;
}

#[tokio::test]
async fn test_create_then_get_round_trips_the_record() {
    test(|helper| async move {
        let created = create(&helper, "London").await;

        let response = helper.app.query(created.id.0).await;

        assert_eq!(response.status(), StatusCode::OK);
        let fetched: WeatherQuery = response.json().await.unwrap();
        assert_eq!(fetched, created);
    })
    .await;
}

#[tokio::test]
async fn test_create_with_start_after_end_persists_nothing() {
    test(|helper| async move {
        let response = helper
            .app
            .create_query(&create_body("London", "2024-02-01", "2024-01-01"))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["error"].as_str().unwrap(),
            "start_date 2024-02-01 cannot be after end_date 2024-01-01"
        );

        assert!(all_queries(&helper).await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_create_reports_the_first_missing_field() {
    test(|helper| async move {
        let response = helper
            .app
            .create_query(&CreateQueryBody {
                location: Some("London".into()),
                start_date: None,
                end_date: Some("2024-01-05".into()),
            })
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["error"].as_str().unwrap(),
            "missing required field 'start_date'"
        );

        assert!(all_queries(&helper).await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_create_rejects_malformed_dates() {
    test(|helper| async move {
        let response = helper
            .app
            .create_query(&create_body("London", "01-05-2024", "2024-01-05"))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["error"].as_str().unwrap(),
            "'01-05-2024' is not a valid date, expected the format YYYY-MM-DD"
        );

        assert!(all_queries(&helper).await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_create_with_unknown_location_persists_nothing() {
    test(|helper| async move {
        helper.mock_current_weather_error("Atlantis", 404).await;

        let response = helper
            .app
            .create_query(&create_body("Atlantis", "2024-01-01", "2024-01-05"))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(all_queries(&helper).await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_create_aborts_when_the_provider_is_down() {
    test(|helper| async move {
        helper.mock_current_weather_error("London", 503).await;

        let response = helper
            .app
            .create_query(&create_body("London", "2024-01-01", "2024-01-05"))
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(all_queries(&helper).await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_get_unknown_id_returns_not_found() {
    test(|helper| async move {
        let response = helper.app.query(999).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Query not found."}));
    })
    .await;
}

#[tokio::test]
async fn test_update_of_a_single_field_keeps_the_others() {
    test(|helper| async move {
        let created = create(&helper, "London").await;

        let response = helper
            .app
            .update_query(
                created.id.0,
                &UpdateQueryBody {
                    end_date: Some("2024-01-10".into()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let updated: WeatherQuery = response.json().await.unwrap();

        assert_eq!(updated.end_date.to_string(), "2024-01-10");
        assert_eq!(updated.location, created.location);
        assert_eq!(updated.result, created.result);
        assert_eq!(updated.start_date, created.start_date);
        assert_eq!(updated.created_at, created.created_at);

        let fetched: WeatherQuery = helper.app.query(created.id.0).await.json().await.unwrap();
        assert_eq!(fetched, updated);
    })
    .await;
}

#[tokio::test]
async fn test_update_with_new_location_replaces_the_snapshot() {
    test(|helper| async move {
        let created = create(&helper, "London").await;
        helper.mock_current_weather("Bergen").await;

        let response = helper
            .app
            .update_query(
                created.id.0,
                &UpdateQueryBody {
                    location: Some("Bergen".into()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let updated: WeatherQuery = response.json().await.unwrap();

        assert_eq!(updated.location, "Bergen");
        assert_eq!(updated.result, Some(current_weather_payload("Bergen")));
        assert_eq!(updated.start_date, created.start_date);
        assert_eq!(updated.end_date, created.end_date);
    })
    .await;
}

#[tokio::test]
async fn test_update_applies_nothing_when_the_location_is_rejected() {
    test(|helper| async move {
        let created = create(&helper, "London").await;
        helper.mock_current_weather_error("Atlantis", 404).await;

        // Valid end_date change bundled with a bad location, nothing of the
        // update may stick.
        let response = helper
            .app
            .update_query(
                created.id.0,
                &UpdateQueryBody {
                    location: Some("Atlantis".into()),
                    end_date: Some("2024-01-10".into()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let fetched: WeatherQuery = helper.app.query(created.id.0).await.json().await.unwrap();
        assert_eq!(fetched, created);
    })
    .await;
}

#[tokio::test]
async fn test_update_checks_the_range_against_post_update_values() {
    test(|helper| async move {
        let created = create(&helper, "London").await;

        // start_date alone moves past the stored end_date.
        let response = helper
            .app
            .update_query(
                created.id.0,
                &UpdateQueryBody {
                    start_date: Some("2024-02-01".into()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let fetched: WeatherQuery = helper.app.query(created.id.0).await.json().await.unwrap();
        assert_eq!(fetched, created);
    })
    .await;
}

#[tokio::test]
async fn test_update_rejects_malformed_dates_without_side_effects() {
    test(|helper| async move {
        let created = create(&helper, "London").await;

        let response = helper
            .app
            .update_query(
                created.id.0,
                &UpdateQueryBody {
                    start_date: Some("not-a-date".into()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let fetched: WeatherQuery = helper.app.query(created.id.0).await.json().await.unwrap();
        assert_eq!(fetched, created);
    })
    .await;
}

#[tokio::test]
async fn test_update_of_unknown_id_returns_not_found() {
    test(|helper| async move {
        let response = helper
            .app
            .update_query(
                999,
                &UpdateQueryBody {
                    end_date: Some("2024-01-10".into()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Query not found."}));
    })
    .await;
}

#[tokio::test]
async fn test_delete_removes_the_record_and_reports_repeats_as_missing() {
    test(|helper| async move {
        let created = create(&helper, "London").await;

        let response = helper.app.delete_query(created.id.0).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"message": "Query deleted successfully."}));

        let response = helper.app.query(created.id.0).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = helper.app.delete_query(created.id.0).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert!(all_queries(&helper).await.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_export_matches_the_listing() {
    test(|helper| async move {
        let first = create(&helper, "London").await;
        let second = create(&helper, "Bergen").await;
        assert_eq!(first.id.0, 1);
        assert_eq!(second.id.0, 2);

        let listed = all_queries(&helper).await;

        let response = helper.app.export_queries().await;
        assert_eq!(response.status(), StatusCode::OK);
        let exported: Vec<WeatherQuery> = response.json().await.unwrap();

        assert_eq!(listed, vec![first, second]);
        assert_eq!(exported, listed);
    })
    .await;
}

#[tokio::test]
async fn test_malformed_json_body_returns_a_structured_error() {
    test(|helper| async move {
        let response = reqwest::Client::new()
            .post(format!("{}/queries", helper.app.address()))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("invalid JSON body"));
    })
    .await;
}
