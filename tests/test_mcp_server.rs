//! MCP tool handler tests over in-memory storage.

mod fixtures;

use fixtures::*;
use hospital_registry::repositories::{InMemoryStore, InMemoryUnitOfWorkFactory};
use hospital_registry::services::HospitalRegistrationServiceImpl;
use hospital_registry::{HospitalKind, HospitalRegistryServer, Metrics};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorCode};
use serde_json::Value;
use std::sync::Arc;

fn server() -> (HospitalRegistryServer, InMemoryStore) {
    let store = InMemoryStore::new();
    let factory = InMemoryUnitOfWorkFactory::new(store.clone(), Metrics::new());
    let service = HospitalRegistrationServiceImpl::new(Arc::new(factory));
    (HospitalRegistryServer::new(Arc::new(service)), store)
}

/// Parse the JSON text of the first content block.
fn result_json(result: &CallToolResult) -> Value {
    let serialized = serde_json::to_value(result).unwrap();
    let text = serialized["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_register_hospital_returns_stored_record() {
    let (server, store) = server();

    let result = server
        .register_hospital(Parameters(registration_entry()))
        .await
        .unwrap();
    let response = result_json(&result);

    assert_eq!(response["table"], "unverified_hospital");
    assert_eq!(response["record"]["name"], "A hospital");
    assert_eq!(response["record"]["ownership_type"], "public");
    assert_eq!(response["record"]["contact_number"], "+919425411234");
    assert_eq!(response["record"]["id"].as_str().unwrap().len(), 32);
    assert!(response["record"].get("verified_status").is_none());

    let stored = store.hospitals(HospitalKind::UnverifiedRegistered);
    assert_eq!(stored.len(), 1);
    assert_eq!(
        response["record"]["id"],
        stored[0].entry().hospital_id().simple().to_string()
    );
}

#[tokio::test]
async fn test_register_unclaimed_hospital() {
    let (server, store) = server();
    let mut entry = registration_entry();
    entry.key_contact = None;
    entry.verified_status = Some("verification_pending".to_string());
    entry.added_since = Some("2022-01-01".to_string());

    let result = server.register_hospital(Parameters(entry)).await.unwrap();
    let response = result_json(&result);

    assert_eq!(response["table"], "unclaimed_hospital");
    assert_eq!(response["record"]["verified_status"], "verification_pending");
    assert_eq!(response["record"]["added_since"], "2022-01-01T00:00:00.000+00:00");
    assert_eq!(store.hospitals(HospitalKind::Unclaimed).len(), 1);
}

#[tokio::test]
async fn test_invalid_entry_is_invalid_params() {
    let (server, store) = server();
    let mut entry = registration_entry();
    entry.ownership_type = "municipal".to_string();

    let error = server
        .register_hospital(Parameters(entry))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_both_status_and_key_contact_is_invalid_params() {
    let (server, _) = server();
    let mut entry = registration_entry();
    entry.verified_status = Some("verified".to_string());

    let error = server
        .register_hospital(Parameters(entry))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn test_duplicate_registration_is_invalid_request() {
    let (server, store) = server();

    server
        .register_hospital(Parameters(registration_entry()))
        .await
        .unwrap();
    let error = server
        .register_hospital(Parameters(registration_entry()))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::INVALID_REQUEST);
    assert!(error.message.contains("A hospital"));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_list_registration_options() {
    let (server, _) = server();

    let result = server.list_registration_options().await.unwrap();
    let response = result_json(&result);

    let values = |key: &str| -> Vec<String> {
        response[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["value"].as_str().unwrap().to_string())
            .collect()
    };

    let ownership = values("ownership_type");
    assert_eq!(ownership.len(), 5);
    for expected in ["government", "public", "private", "public_private", "charitable"] {
        assert!(ownership.iter().any(|v| v == expected), "missing {}", expected);
    }

    let statuses = values("verified_status");
    assert_eq!(statuses.len(), 3);
    for expected in ["verified", "unverified", "verification_pending"] {
        assert!(statuses.iter().any(|v| v == expected), "missing {}", expected);
    }
    assert!(response["verified_status"][0]["name"].is_string());
}
