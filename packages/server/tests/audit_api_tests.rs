//! End-to-end tests for POST /api/business-audit with mock infrastructure.

mod common;

use axum::http::StatusCode;
use std::sync::Arc;

use common::{app_with, json, post_json, valid_submission_body};
use server_core::domains::audit::data::FileLeadStore;
use server_core::kernel::test_dependencies::{
    mock_deps, MockLeadStore, MockMailer, MockReportGenerator, MockSiteFetcher,
};
use server_core::kernel::BaseLeadStore;

const AUDIT_URI: &str = "/api/business-audit";
const REPORT: &str = "# Business Automation Audit Report for Acme\n\n## Executive Summary\n\nGood potential.";

#[tokio::test]
async fn missing_field_rejects_without_side_effects() {
    let fetcher = Arc::new(MockSiteFetcher::returning("content"));
    let generator = Arc::new(MockReportGenerator::returning(REPORT));
    let mailer = Arc::new(MockMailer::delivering());
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = app_with(
        mock_deps(
            fetcher.clone(),
            Some(generator.clone()),
            Some(mailer.clone()),
            vec![store.clone() as Arc<dyn BaseLeadStore>],
        ),
        None,
    );

    let mut body = valid_submission_body();
    body.as_object_mut().unwrap().remove("email");

    let (status, _, response) = post_json(&app, AUDIT_URI, body, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&response)["error"], "All fields are required");
    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(generator.call_count(), 0);
    assert_eq!(mailer.call_count(), 0);
    assert_eq!(store.save_call_count(), 0);
}

#[tokio::test]
async fn every_required_field_is_enforced() {
    for field in [
        "name",
        "email",
        "website",
        "businessType",
        "currentChallenges",
        "timeSpentDaily",
    ] {
        let store = Arc::new(MockLeadStore::accepting("file"));
        let app = app_with(
            mock_deps(
                Arc::new(MockSiteFetcher::returning("content")),
                Some(Arc::new(MockReportGenerator::returning(REPORT))),
                None,
                vec![store.clone() as Arc<dyn BaseLeadStore>],
            ),
            None,
        );

        let mut body = valid_submission_body();
        body.as_object_mut().unwrap().remove(field);

        let (status, _, _) = post_json(&app, AUDIT_URI, body, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field: {}", field);
        assert_eq!(store.save_call_count(), 0, "field: {}", field);
    }
}

#[tokio::test]
async fn missing_model_credential_returns_503_before_any_fetch() {
    let fetcher = Arc::new(MockSiteFetcher::returning("content"));
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = app_with(
        mock_deps(
            fetcher.clone(),
            None,
            None,
            vec![store.clone() as Arc<dyn BaseLeadStore>],
        ),
        None,
    );

    let (status, _, response) = post_json(&app, AUDIT_URI, valid_submission_body(), None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json(&response)["error"],
        "Service temporarily unavailable. Please try again later."
    );
    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(store.save_call_count(), 0);
}

#[tokio::test]
async fn unreachable_website_still_completes() {
    let generator = Arc::new(MockReportGenerator::returning(REPORT));
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = app_with(
        mock_deps(
            Arc::new(MockSiteFetcher::failing()),
            Some(generator.clone()),
            None,
            vec![store.clone() as Arc<dyn BaseLeadStore>],
        ),
        None,
    );

    let (status, _, response) = post_json(&app, AUDIT_URI, valid_submission_body(), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&response)["success"], true);
    assert!(generator.prompts()[0].contains("Website content could not be analyzed"));
    assert_eq!(store.save_call_count(), 1);
}

#[tokio::test]
async fn generation_failure_returns_500() {
    let mailer = Arc::new(MockMailer::delivering());
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = app_with(
        mock_deps(
            Arc::new(MockSiteFetcher::returning("content")),
            Some(Arc::new(MockReportGenerator::failing())),
            Some(mailer.clone()),
            vec![store.clone() as Arc<dyn BaseLeadStore>],
        ),
        None,
    );

    let (status, _, response) = post_json(&app, AUDIT_URI, valid_submission_body(), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&response)["error"], "Failed to generate audit report");
    assert_eq!(mailer.call_count(), 0);
    assert_eq!(store.save_call_count(), 0);
}

#[tokio::test]
async fn persistence_fallback_order_is_invisible_to_the_submitter() {
    // Three chains: postgres accepts; postgres fails so airtable accepts;
    // both fail so file accepts. The response must be identical each time.
    let chains: Vec<Vec<Arc<MockLeadStore>>> = vec![
        vec![
            Arc::new(MockLeadStore::accepting("postgres")),
            Arc::new(MockLeadStore::accepting("airtable")),
            Arc::new(MockLeadStore::accepting("file")),
        ],
        vec![
            Arc::new(MockLeadStore::failing("postgres")),
            Arc::new(MockLeadStore::accepting("airtable")),
            Arc::new(MockLeadStore::accepting("file")),
        ],
        vec![
            Arc::new(MockLeadStore::failing("postgres")),
            Arc::new(MockLeadStore::failing("airtable")),
            Arc::new(MockLeadStore::accepting("file")),
        ],
    ];

    let mut responses = Vec::new();

    for (expected_sink, chain) in chains.into_iter().enumerate() {
        let stores: Vec<Arc<dyn BaseLeadStore>> = chain
            .iter()
            .map(|s| s.clone() as Arc<dyn BaseLeadStore>)
            .collect();
        let app = app_with(
            mock_deps(
                Arc::new(MockSiteFetcher::returning("content")),
                Some(Arc::new(MockReportGenerator::returning(REPORT))),
                None,
                stores,
            ),
            None,
        );

        let (status, _, response) =
            post_json(&app, AUDIT_URI, valid_submission_body(), None).await;
        assert_eq!(status, StatusCode::OK);
        responses.push(response);

        // The sink at `expected_sink` accepted; everything after is untouched.
        for (idx, store) in chain.iter().enumerate() {
            let expected = if idx <= expected_sink { 1 } else { 0 };
            assert_eq!(store.save_call_count(), expected, "store {}", store.name());
        }
        assert_eq!(chain[expected_sink].saved().len(), 1);
    }

    assert!(responses.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn mail_auth_failure_downgrades_to_deferred_success() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = app_with(
        mock_deps(
            Arc::new(MockSiteFetcher::returning("content")),
            Some(Arc::new(MockReportGenerator::returning(REPORT))),
            Some(Arc::new(MockMailer::failing_auth())),
            vec![store.clone() as Arc<dyn BaseLeadStore>],
        ),
        None,
    );

    let (status, _, response) = post_json(&app, AUDIT_URI, valid_submission_body(), None).await;

    assert_eq!(status, StatusCode::OK);
    let value = json(&response);
    assert_eq!(value["success"], true);
    assert!(value["message"].as_str().unwrap().contains("24 hours"));
}

#[tokio::test]
async fn mail_send_failure_surfaces_as_500() {
    let store = Arc::new(MockLeadStore::accepting("file"));
    let app = app_with(
        mock_deps(
            Arc::new(MockSiteFetcher::returning("content")),
            Some(Arc::new(MockReportGenerator::returning(REPORT))),
            Some(Arc::new(MockMailer::failing_send())),
            vec![store.clone() as Arc<dyn BaseLeadStore>],
        ),
        None,
    );

    let (status, _, _) = post_json(&app, AUDIT_URI, valid_submission_body(), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // The lead was persisted before the delivery attempt.
    assert_eq!(store.save_call_count(), 1);
}

#[tokio::test]
async fn minimal_deployment_defers_email_and_appends_to_file_store() {
    // Working model key, reachable website, no email/db credentials: the
    // submitter gets a 200 mentioning the 24-hour window and the local file
    // store gains one record with a generated id and timestamp.
    let dir = tempfile::tempdir().unwrap();
    let leads_path = dir.path().join("audit-leads.json");
    let file_store = Arc::new(FileLeadStore::new(leads_path));

    let app = app_with(
        mock_deps(
            Arc::new(MockSiteFetcher::returning("Acme sells handmade goods")),
            Some(Arc::new(MockReportGenerator::returning(REPORT))),
            None,
            vec![file_store.clone() as Arc<dyn BaseLeadStore>],
        ),
        None,
    );

    let (status, _, response) = post_json(&app, AUDIT_URI, valid_submission_body(), None).await;

    assert_eq!(status, StatusCode::OK);
    let value = json(&response);
    assert_eq!(value["success"], true);
    assert!(value["message"].as_str().unwrap().contains("24 hours"));

    let leads = file_store.list().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert!(!leads[0].id.is_empty());
    assert_eq!(leads[0].email, "a@acme.com");
    assert_eq!(leads[0].source.as_deref(), Some("Business Audit Form"));
}
