//! M3O client and repository tests against a mock HTTP server.

mod fixtures;

use fixtures::*;
use hospital_registry::client::{AsyncM3oClient, AsyncM3oClientImpl, M3oClient};
use hospital_registry::domain::{HospitalEntity, VerificationStatus};
use hospital_registry::error::{M3oApiError, RegistrationError};
use hospital_registry::metrics::Metrics;
use hospital_registry::models::HospitalRecord;
use hospital_registry::repositories::M3oUnitOfWorkFactory;
use hospital_registry::services::{HospitalRegistrationService, HospitalRegistrationServiceImpl};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

const TOKEN: &str = "test-token";

fn client_for(server: &mockito::Server) -> M3oClient {
    M3oClient::with_base_url(server.url(), Some(TOKEN.to_string()))
}

fn service_for(server: &mockito::Server, metrics: Metrics) -> HospitalRegistrationServiceImpl {
    let client: Arc<dyn AsyncM3oClient> = Arc::new(AsyncM3oClientImpl::new(client_for(server)));
    HospitalRegistrationServiceImpl::new(Arc::new(M3oUnitOfWorkFactory::new(client, metrics)))
}

#[test]
fn test_read_records_sends_table_and_query() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/db/Read")
        .match_header("authorization", "Bearer test-token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "table": "unclaimed_hospital",
            "query": "name == 'City Hospital'",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"records": [{"id": "abc", "name": "City Hospital"}]}"#)
        .create();

    let client = client_for(&server);
    let records = client
        .read_records("unclaimed_hospital", "name == 'City Hospital'")
        .unwrap();

    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "City Hospital");
    assert_eq!(client.metrics().http_requests_total(), 1);
}

#[test]
fn test_read_records_without_records_field() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/db/Read")
        .with_status(200)
        .with_body("{}")
        .create();

    let records = client_for(&server)
        .read_records("unverified_hospital", "name == 'x'")
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_create_record_returns_id() {
    let hospital =
        HospitalEntity::build_factory(unclaimed_attributes(VerificationStatus::Verified)).unwrap();
    let record = HospitalRecord::from(&hospital);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/db/Create")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({
            "table": "unclaimed_hospital",
            "record": {
                "id": record.id.clone(),
                "name": "A hospital",
                "verified_status": "verified",
            },
        })))
        .with_status(200)
        .with_body(format!(r#"{{"id": "{}"}}"#, record.id))
        .create();

    let id = client_for(&server)
        .create_record("unclaimed_hospital", &record)
        .unwrap();

    mock.assert();
    assert_eq!(id, record.id);
}

#[test]
fn test_unauthorized_status() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/db/Read")
        .with_status(401)
        .with_body(r#"{"detail": "invalid token"}"#)
        .create();

    let client = client_for(&server);
    let result = client.read_records("unclaimed_hospital", "name == 'x'");

    assert!(matches!(result, Err(M3oApiError::Unauthorized)));
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_rate_limited_status() {
    let mut server = mockito::Server::new();
    server.mock("POST", "/db/Read").with_status(429).create();

    let result = client_for(&server).read_records("unclaimed_hospital", "name == 'x'");
    assert!(matches!(result, Err(M3oApiError::RateLimitExceeded)));
}

#[test]
fn test_server_error_keeps_status_and_body() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/db/Read")
        .with_status(500)
        .with_body("database unavailable")
        .create();

    match client_for(&server).read_records("unclaimed_hospital", "name == 'x'") {
        Err(M3oApiError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_registration_reads_then_creates_on_commit() {
    let mut server = mockito::Server::new_async().await;
    let read = server
        .mock("POST", "/db/Read")
        .match_body(Matcher::PartialJson(json!({ "table": "unverified_hospital" })))
        .with_status(200)
        .with_body(r#"{"records": []}"#)
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/db/Create")
        .match_body(Matcher::PartialJson(json!({
            "table": "unverified_hospital",
            "record": {
                "name": "A hospital",
                "ownership_type": "public",
                "contact_number": "+919425411234",
                "key_contact_registrar": { "name": "Radhe Shyam" },
            },
        })))
        .with_status(200)
        .with_body(r#"{"id": "created"}"#)
        .expect(1)
        .create_async()
        .await;

    let metrics = Metrics::new();
    let service = service_for(&server, metrics.clone());
    let hospital = service.register_hospital(registration_entry()).await.unwrap();

    read.assert_async().await;
    create.assert_async().await;
    assert!(matches!(hospital, HospitalEntity::UnverifiedRegistered(_)));
    assert_eq!(metrics.registrations_committed_total(), 1);
    assert_eq!(metrics.records_created_total(), 1);
}

#[tokio::test]
async fn test_registration_of_existing_hospital_creates_nothing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/db/Read")
        .with_status(200)
        .with_body(r#"{"records": [{"id": "existing", "name": "A hospital"}]}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/db/Create")
        .expect(0)
        .create_async()
        .await;

    let metrics = Metrics::new();
    let service = service_for(&server, metrics.clone());
    let result = service.register_hospital(registration_entry()).await;

    match result {
        Err(RegistrationError::RecordAlreadyExists { table, hospital_name }) => {
            assert_eq!(table, "unverified_hospital");
            assert_eq!(hospital_name, "A hospital");
        }
        other => panic!("Expected RecordAlreadyExists, got: {:?}", other),
    }
    create.assert_async().await;
    assert_eq!(metrics.registrations_rolled_back_total(), 1);
    assert_eq!(metrics.registrations_committed_total(), 0);
}

#[tokio::test]
async fn test_failed_create_surfaces_as_storage_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/db/Read")
        .with_status(200)
        .with_body(r#"{"records": []}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/db/Create")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let metrics = Metrics::new();
    let service = service_for(&server, metrics.clone());
    let result = service.register_hospital(registration_entry()).await;

    assert!(matches!(
        result,
        Err(RegistrationError::Storage(M3oApiError::ApiError { status: 503, .. }))
    ));
    assert_eq!(metrics.registrations_rolled_back_total(), 1);
}

#[tokio::test]
async fn test_registration_without_token_never_reaches_the_api() {
    let mut server = mockito::Server::new_async().await;
    let read = server
        .mock("POST", "/db/Read")
        .expect(0)
        .create_async()
        .await;

    let client: Arc<dyn AsyncM3oClient> = Arc::new(AsyncM3oClientImpl::new(
        M3oClient::with_base_url(server.url(), None),
    ));
    let service = HospitalRegistrationServiceImpl::new(Arc::new(M3oUnitOfWorkFactory::new(
        client,
        Metrics::new(),
    )));

    let result = service.register_hospital(registration_entry()).await;
    assert!(matches!(result, Err(RegistrationError::SessionUnavailable(_))));
    read.assert_async().await;
}
