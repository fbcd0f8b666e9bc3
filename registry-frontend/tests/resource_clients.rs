use registry_core::api::{ApiClientConfig, ApiClientFactory, ErrorCode};
use registry_frontend::api::RegistryApi;
use registry_frontend::models::{ArtifactSlug, Authority, Key, NewApiKey, NewAuthority, NewKey};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer) -> RegistryApi {
    let factory = ApiClientFactory::new(ApiClientConfig {
        registry_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .expect("factory");
    RegistryApi::new(&factory)
}

#[tokio::test]
async fn authorities_decode_into_camel_case_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/authorities/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "a1",
            "name": "acme",
            "policy_url": "https://acme.example.com/policy",
            "is_public": true,
            "keys": [{ "id": "k1", "key_id": "34365D9472D7468F", "ascii_armor": "---", "trust_signature": "" }],
            "api_keys": [{ "id": "ak1", "name": "ci" }]
        }])))
        .mount(&server)
        .await;

    let authorities = api(&server).authorities.get_all().await.into_view().unwrap();

    assert_eq!(authorities.len(), 1);
    assert_eq!(authorities[0].policy_url, "https://acme.example.com/policy");
    assert!(authorities[0].is_public);
    assert_eq!(authorities[0].keys[0].key_id, "34365D9472D7468F");
    assert_eq!(authorities[0].api_keys[0].name, "ci");
}

#[tokio::test]
async fn create_sends_snake_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/api/authorities/"))
        .and(body_json(json!({
            "name": "acme",
            "policy_url": "https://acme.example.com",
            "is_public": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a1", "name": "acme" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = api(&server)
        .authorities
        .create(&NewAuthority {
            name: "acme".into(),
            policy_url: "https://acme.example.com".into(),
            is_public: false,
        })
        .await;

    assert_eq!(created.into_view().unwrap().id, "a1");
}

#[tokio::test]
async fn update_with_empty_id_makes_no_request() {
    let server = MockServer::start().await;
    let api = api(&server);

    let result = api.authorities.update(&Authority::default()).await;
    assert!(result.has_code(ErrorCode::BadRequest));

    let result = api.keys.update("a1", &Key::default()).await;
    assert!(result.has_code(ErrorCode::BadRequest));

    let result = api.authorities.delete("").await;
    assert!(result.has_code(ErrorCode::BadRequest));

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn nested_key_and_api_key_paths() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/api/authorities/a1/keys"))
        .and(body_json(json!({ "key_id": "34365D9472D7468F" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "k1", "key_id": "34365D9472D7468F" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/api/authorities/a1/api-keys/ak1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/api/authorities/a1/api-keys"))
        .and(body_json(json!({ "name": "ci" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ak2", "name": "ci" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);

    let key = api
        .keys
        .create(
            "a1",
            &NewKey {
                key_id: "34365D9472D7468F".into(),
                ascii_armor: None,
                trust_signature: None,
            },
        )
        .await
        .into_view()
        .unwrap();
    assert_eq!(key.id, "k1");

    assert!(api.api_keys.delete("a1", "ak1").await.into_view().unwrap());

    let api_key = api
        .api_keys
        .create("a1", &NewApiKey { name: "ci".into() })
        .await
        .into_view()
        .unwrap();
    assert_eq!(api_key.id, "ak2");
}

#[tokio::test]
async fn artifact_versions_come_back_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/artifacts/hashicorp/vpc/aws/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["1.2.0", "2.0.0", "1.10.0"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/api/artifacts/hashicorp/vpc/aws"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m1",
            "full_name": "hashicorp/vpc/aws",
            "namespace": "hashicorp",
            "name": "vpc",
            "type": "module",
            "provider": "aws",
            "versions": ["0.9.0", "1.0.0"],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let api = api(&server);
    let slug = ArtifactSlug::module("hashicorp", "vpc", "aws");

    let versions = api.artifacts.get_all_versions_for_one(&slug).await.into_view().unwrap();
    assert_eq!(versions, vec!["2.0.0", "1.10.0", "1.2.0"]);

    let artifact = api.artifacts.get_one(&slug).await.into_view().unwrap();
    assert_eq!(artifact.latest_version(), Some("1.0.0"));
    assert_eq!(artifact.kind.provider(), Some("aws"));
}

#[tokio::test]
async fn missing_resources_use_catalogue_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/authorities/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": ["authority not found"] })))
        .mount(&server)
        .await;

    let result = api(&server).authorities.get_one("missing").await;

    assert!(result.has_code(ErrorCode::NotFound));
    match result {
        registry_core::api::ApiResult::Error { errors, .. } => {
            assert_eq!(errors, vec!["authority not found"]);
        }
        other => panic!("expected an error envelope, got {:?}", other),
    }
}

#[tokio::test]
async fn forwarding_carries_the_browser_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/artifacts/"))
        .and(header("cookie", "_terralist_session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server).forwarding(Some("_terralist_session=abc".parse().unwrap()));
    let artifacts = api.artifacts.get_all().await.into_view().unwrap();

    assert!(artifacts.is_empty());
}

#[tokio::test]
async fn unreachable_registry_yields_error_envelope() {
    let factory = ApiClientFactory::new(ApiClientConfig {
        registry_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(2),
    })
    .expect("factory");

    let result = RegistryApi::new(&factory).authorities.get_all().await;
    assert!(result.is_error());
}
