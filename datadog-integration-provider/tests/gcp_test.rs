//! GCP integration resource against a mock Datadog API
//!
//! Live acceptance tests are `#[ignore]`d; run them with:
//! ```bash
//! DD_API_KEY=xxx DD_APP_KEY=xxx \
//!     cargo test -p datadog-integration-provider --test gcp_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{
    GCP_CLIENT_EMAIL, GCP_CLIENT_ID, GCP_PRIVATE_KEY, GCP_PRIVATE_KEY_ID, GCP_PROJECT_ID,
    GCP_TYPE, gcp_config, gcp_listed, mock_provider,
};
use datadog_integration_provider::{ProviderError, ResourceData};
use mockito::{Matcher, Server};
use serde_json::json;

const GCP_PATH: &str = "/api/v1/integration/gcp";

#[tokio::test]
async fn create_then_read_round_trips_fields() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", GCP_PATH)
        .match_body(Matcher::PartialJson(json!({
            "type": "service_account",
            "project_id": GCP_PROJECT_ID,
            "private_key_id": GCP_PRIVATE_KEY_ID,
            "private_key": GCP_PRIVATE_KEY,
            "client_email": GCP_CLIENT_EMAIL,
            "client_id": GCP_CLIENT_ID,
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": "https://accounts.google.com/o/oauth2/token",
            "host_filters": "foo:bar,buzz:lightyear",
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let _list = server
        .mock("GET", GCP_PATH)
        .with_status(200)
        .with_body(
            json!([gcp_listed(GCP_PROJECT_ID, Some("foo:bar,buzz:lightyear"))]).to_string(),
        )
        .create_async()
        .await;

    let provider = mock_provider(&server);
    let state = provider
        .apply(
            GCP_TYPE,
            None,
            Some(gcp_config(GCP_PROJECT_ID, Some("foo:bar,buzz:lightyear"))),
        )
        .await
        .unwrap()
        .unwrap();

    create.assert_async().await;
    assert_eq!(state.id(), GCP_PROJECT_ID);
    assert_eq!(state.get_string("project_id"), GCP_PROJECT_ID);
    assert_eq!(state.get_string("private_key_id"), GCP_PRIVATE_KEY_ID);
    assert_eq!(state.get_string("private_key"), GCP_PRIVATE_KEY);
    assert_eq!(state.get_string("client_email"), GCP_CLIENT_EMAIL);
    assert_eq!(state.get_string("client_id"), GCP_CLIENT_ID);
    assert_eq!(state.get_string("host_filters"), "foo:bar,buzz:lightyear");
}

#[tokio::test]
async fn omitted_host_filters_read_back_empty() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", GCP_PATH)
        .match_body(Matcher::PartialJson(json!({"host_filters": ""})))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let _list = server
        .mock("GET", GCP_PATH)
        .with_status(200)
        .with_body(json!([gcp_listed(GCP_PROJECT_ID, None)]).to_string())
        .create_async()
        .await;

    let provider = mock_provider(&server);
    let state = provider
        .apply(GCP_TYPE, None, Some(gcp_config(GCP_PROJECT_ID, None)))
        .await
        .unwrap()
        .unwrap();

    create.assert_async().await;
    assert_eq!(state.get("host_filters"), Some(&json!("")));
}

#[tokio::test]
async fn host_filters_change_is_an_in_place_update() {
    let mut server = Server::new_async().await;
    let update = server
        .mock("PUT", GCP_PATH)
        .match_body(Matcher::Json(json!({
            "project_id": GCP_PROJECT_ID,
            "client_email": GCP_CLIENT_EMAIL,
            "host_filters": "",
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", GCP_PATH)
        .expect(0)
        .create_async()
        .await;
    let _list = server
        .mock("GET", GCP_PATH)
        .with_status(200)
        .with_body(json!([gcp_listed(GCP_PROJECT_ID, Some(""))]).to_string())
        .create_async()
        .await;

    let mut prior = gcp_config(GCP_PROJECT_ID, Some("foo:bar,buzz:lightyear"));
    prior.set_id(GCP_PROJECT_ID);

    let provider = mock_provider(&server);
    let state = provider
        .apply(GCP_TYPE, Some(prior), Some(gcp_config(GCP_PROJECT_ID, None)))
        .await
        .unwrap()
        .unwrap();

    update.assert_async().await;
    delete.assert_async().await;
    assert_eq!(state.get_string("host_filters"), "");
}

#[tokio::test]
async fn delete_deregisters_project() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", GCP_PATH)
        .match_body(Matcher::Json(json!({
            "project_id": GCP_PROJECT_ID,
            "client_email": GCP_CLIENT_EMAIL,
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let _list = server
        .mock("GET", GCP_PATH)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut prior = gcp_config(GCP_PROJECT_ID, None);
    prior.set_id(GCP_PROJECT_ID);

    let provider = mock_provider(&server);
    assert!(provider.apply(GCP_TYPE, Some(prior), None).await.unwrap().is_none());
    delete.assert_async().await;

    let resource = provider.resource(GCP_TYPE).unwrap();
    let exists = resource
        .exists(&ResourceData::with_id(GCP_PROJECT_ID), provider.meta())
        .await
        .unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn read_of_missing_project_clears_id() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", GCP_PATH)
        .with_status(200)
        .with_body(json!([gcp_listed("another-project", None)]).to_string())
        .create_async()
        .await;

    let provider = mock_provider(&server);
    let resource = provider.resource(GCP_TYPE).unwrap();
    let mut d = gcp_config(GCP_PROJECT_ID, None);
    d.set_id(GCP_PROJECT_ID);

    resource.read(&mut d, provider.meta()).await.unwrap();
    assert!(!d.has_id());
}

#[tokio::test]
async fn import_populates_record_with_imported_id() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", GCP_PATH)
        .with_status(200)
        .with_body(json!([gcp_listed(GCP_PROJECT_ID, Some("env:prod"))]).to_string())
        .create_async()
        .await;

    let provider = mock_provider(&server);
    let imported = provider.import(GCP_TYPE, GCP_PROJECT_ID).await.unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].id(), GCP_PROJECT_ID);
    assert_eq!(imported[0].get_string("project_id"), GCP_PROJECT_ID);
    assert_eq!(imported[0].get_string("client_email"), GCP_CLIENT_EMAIL);
    assert_eq!(imported[0].get_string("host_filters"), "env:prod");
}

#[tokio::test]
async fn import_of_unknown_project_fails() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", GCP_PATH)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let provider = mock_provider(&server);
    let err = provider.import(GCP_TYPE, "ghost-project").await.unwrap_err();
    assert!(matches!(
        &err,
        ProviderError::NotFound { key, .. } if key == "ghost-project"
    ));
}

#[tokio::test]
async fn forbidden_create_surfaces_permission_error() {
    let mut server = Server::new_async().await;
    let _create = server
        .mock("POST", GCP_PATH)
        .with_status(403)
        .with_body(r#"{"errors":["Forbidden"]}"#)
        .create_async()
        .await;

    let provider = mock_provider(&server);
    let err = provider
        .apply(GCP_TYPE, None, Some(gcp_config(GCP_PROJECT_ID, None)))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "error creating GCP integration: [datadog] Permission denied: Forbidden"
    );
    assert!(err.is_expected());
}

// ============ Live acceptance ============

#[tokio::test]
#[ignore]
async fn test_acc_gcp_integration_lifecycle() {
    skip_if_no_credentials!("DD_API_KEY", "DD_APP_KEY");

    let provider = common::live_provider().await.expect("provider should configure");
    let project_id = common::generate_test_project_id();

    let state = provider
        .apply(
            GCP_TYPE,
            None,
            Some(gcp_config(&project_id, Some("foo:bar,buzz:lightyear"))),
        )
        .await
        .expect("create failed")
        .expect("state after create");
    assert_eq!(state.get_string("host_filters"), "foo:bar,buzz:lightyear");

    let state = provider
        .apply(GCP_TYPE, Some(state), Some(gcp_config(&project_id, None)))
        .await
        .expect("update failed")
        .expect("state after update");
    assert_eq!(state.get_string("host_filters"), "");

    provider
        .apply(GCP_TYPE, Some(state), None)
        .await
        .expect("delete failed");

    let refreshed = provider
        .refresh(GCP_TYPE, ResourceData::with_id(project_id.as_str()))
        .await
        .expect("refresh failed");
    assert!(refreshed.is_none(), "integration should be gone");

    println!("✓ gcp integration lifecycle passed");
}
