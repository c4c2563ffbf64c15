//! Tests for the authenticated lead list/export endpoints.

mod common;

use axum::http::{header, StatusCode};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use common::{app_with, get, json, post_json};
use server_core::kernel::test_dependencies::{
    lead_at, mock_deps, MockLeadStore, MockReportGenerator, MockSiteFetcher,
};
use server_core::kernel::BaseLeadStore;

const LEADS_URI: &str = "/api/leads";
const SECRET: &str = "s3cret-admin-token";

fn leads_app(store: Arc<MockLeadStore>, secret: Option<&str>) -> axum::Router {
    app_with(
        mock_deps(
            Arc::new(MockSiteFetcher::returning("content")),
            Some(Arc::new(MockReportGenerator::returning("# R"))),
            None,
            vec![store as Arc<dyn BaseLeadStore>],
        ),
        secret,
    )
}

#[tokio::test]
async fn list_requires_bearer_token_before_touching_backends() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = leads_app(store.clone(), Some(SECRET));

    let (status, _, response) = get(&app, LEADS_URI, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json(&response)["error"], "Unauthorized");

    let (status, _, _) = get(&app, LEADS_URI, Some("wrong-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(store.list_call_count(), 0);
}

#[tokio::test]
async fn unset_server_secret_rejects_all_tokens() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = leads_app(store.clone(), None);

    let (status, _, _) = get(&app, LEADS_URI, Some("anything")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.list_call_count(), 0);
}

#[tokio::test]
async fn list_returns_leads_newest_first() {
    let t_old = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
    let t_new = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    let t_mid = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let store = Arc::new(MockLeadStore::accepting("file").with_leads(vec![
        lead_at("old", t_old),
        lead_at("new", t_new),
        lead_at("mid", t_mid),
    ]));
    let app = leads_app(store, Some(SECRET));

    let (status, _, response) = get(&app, LEADS_URI, Some(SECRET)).await;

    assert_eq!(status, StatusCode::OK);
    let value = json(&response);
    assert_eq!(value["count"], 3);
    assert_eq!(value["message"], "Found 3 audit leads");
    let ids: Vec<&str> = value["leads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|lead| lead["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[tokio::test]
async fn empty_list_is_a_200_with_empty_message() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = leads_app(store, Some(SECRET));

    let (status, _, response) = get(&app, LEADS_URI, Some(SECRET)).await;

    assert_eq!(status, StatusCode::OK);
    let value = json(&response);
    assert_eq!(value["count"], 0);
    assert_eq!(value["message"], "No leads found yet");
}

#[tokio::test]
async fn export_requires_bearer_token_before_touching_backends() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = leads_app(store.clone(), Some(SECRET));

    let (status, _, _) = post_json(&app, LEADS_URI, serde_json::json!({"format": "csv"}), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.list_call_count(), 0);
}

#[tokio::test]
async fn export_round_trips_embedded_quotes() {
    let mut lead = lead_at("1", Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap());
    lead.current_challenges = r#"the "daily grind" of data entry"#.to_string();
    let store = Arc::new(MockLeadStore::accepting("file").with_leads(vec![lead]));
    let app = leads_app(store, Some(SECRET));

    let (status, headers, body) =
        post_json(&app, LEADS_URI, serde_json::json!({"format": "csv"}), Some(SECRET)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"audit-leads.csv\""
    );

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers_row = reader.headers().unwrap().clone();
    assert_eq!(&headers_row[0], "ID");
    assert_eq!(&headers_row[4], "Business Type");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][6], r#"the "daily grind" of data entry"#);
}

#[tokio::test]
async fn export_with_zero_leads_is_404() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = leads_app(store, Some(SECRET));

    let (status, _, response) =
        post_json(&app, LEADS_URI, serde_json::json!({"format": "csv"}), Some(SECRET)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&response)["error"], "No leads found");
}

#[tokio::test]
async fn export_rejects_unsupported_formats() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = leads_app(store, Some(SECRET));

    let (status, _, response) =
        post_json(&app, LEADS_URI, serde_json::json!({"format": "xlsx"}), Some(SECRET)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&response)["error"], "Invalid format requested");
}

#[tokio::test]
async fn list_reads_first_answering_backend_not_a_merge() {
    let t = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let postgres = Arc::new(MockLeadStore::failing("postgres"));
    let airtable = Arc::new(MockLeadStore::accepting("airtable").with_leads(vec![lead_at("a", t)]));
    let file = Arc::new(MockLeadStore::accepting("file").with_leads(vec![lead_at("f", t)]));

    let app = app_with(
        mock_deps(
            Arc::new(MockSiteFetcher::returning("content")),
            Some(Arc::new(MockReportGenerator::returning("# R"))),
            None,
            vec![
                postgres.clone() as Arc<dyn BaseLeadStore>,
                airtable.clone() as Arc<dyn BaseLeadStore>,
                file.clone() as Arc<dyn BaseLeadStore>,
            ],
        ),
        Some(SECRET),
    );

    let (status, _, response) = get(&app, LEADS_URI, Some(SECRET)).await;

    assert_eq!(status, StatusCode::OK);
    let value = json(&response);
    assert_eq!(value["count"], 1);
    assert_eq!(value["leads"][0]["id"], "a");
    assert_eq!(file.list_call_count(), 0);
}
