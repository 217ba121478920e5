// End-to-end tests for the Website binding against a mock engine.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitelift_core::{
    Context, CoreError, DeploymentState, EngineConfig, ResourceOptions, Urn, Website, WebsiteArgs,
};

// ── Helpers ─────────────────────────────────────────────────────────

const DEPLOYMENT_ID: &str = "7b1c5a9e-3e52-4d2a-9a10-92b7a4c90d11";

fn config_for(server: &MockServer) -> EngineConfig {
    EngineConfig {
        url: server.uri().parse().expect("mock server URI is valid"),
        project: "marketing-site".into(),
        stack: "prod".into(),
        ..EngineConfig::default()
    }
}

/// Mount the info/open/complete lifecycle endpoints.
async fn mount_lifecycle(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": "1.4.2",
            "protocolVersion": 1
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": DEPLOYMENT_ID,
            "project": "marketing-site",
            "stack": "prod",
            "createdAt": "2025-03-04T10:00:00Z"
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{DEPLOYMENT_ID}/complete")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": DEPLOYMENT_ID,
            "resourceCount": 1,
            "status": "SUCCEEDED"
        })))
        .mount(server)
        .await;
}

fn site_urn() -> String {
    "urn:sitelift:prod::marketing-site::azure-static-website:index:Website::site".to_owned()
}

// ── Delegation ──────────────────────────────────────────────────────

#[tokio::test]
async fn valid_args_register_exactly_once_and_populate_the_handle() {
    let server = MockServer::start().await;
    mount_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{DEPLOYMENT_ID}/resources")))
        .and(body_partial_json(json!({
            "type": "azure-static-website:index:Website",
            "name": "site",
            "remote": true,
            "inputs": {
                "sitePath": "./www",
                "indexDocument": "index.html",
                "errorDocument": "404.html",
                "withCDN": true
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urn": site_urn(),
            "id": null,
            "outputs": {
                "originURL": "https://account.z13.web.core.windows.net/",
                "cdnURL": "https://endpoint-abc.azureedge.net",
                "resourceGroupName": "resource-group-7f3a"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let website = Context::run(config_for(&server), |ctx| async move {
        Website::new(
            &ctx,
            "site",
            WebsiteArgs {
                site_path: Some("./www".into()),
                index_document: Some("index.html".into()),
                error_document: Some("404.html".into()),
                with_cdn: Some(true.into()),
                ..WebsiteArgs::default()
            },
            ResourceOptions::default(),
        )
        .await
    })
    .await
    .expect("deployment should succeed");

    assert_eq!(website.urn().as_str(), site_urn());
    assert_eq!(
        website.origin_url.get().await.expect("origin resolves"),
        "https://account.z13.web.core.windows.net/"
    );
    assert_eq!(
        website.cdn_url.get().await.expect("cdn resolves").as_deref(),
        Some("https://endpoint-abc.azureedge.net")
    );
    assert_eq!(
        website
            .custom_domain_url
            .get()
            .await
            .expect("domain resolves"),
        None
    );
}

#[tokio::test]
async fn caller_options_reach_the_wire() {
    let server = MockServer::start().await;
    mount_lifecycle(&server).await;

    let zone_urn = "urn:sitelift:prod::marketing-site::dns:index:Zone::zone";

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{DEPLOYMENT_ID}/resources")))
        .and(body_partial_json(json!({
            "options": {
                "dependsOn": [zone_urn],
                "protect": true
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urn": site_urn(),
            "id": null,
            "outputs": {
                "originURL": "https://account.z13.web.core.windows.net/",
                "resourceGroupName": "resource-group-7f3a"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Context::run(config_for(&server), |ctx| async move {
        Website::new(
            &ctx,
            "site",
            WebsiteArgs {
                site_path: Some("./www".into()),
                ..WebsiteArgs::default()
            },
            ResourceOptions {
                depends_on: vec![Urn::new(zone_urn)],
                protect: true,
                ..ResourceOptions::default()
            },
        )
        .await
    })
    .await
    .expect("deployment should succeed");
}

// ── Error passthrough ───────────────────────────────────────────────

#[tokio::test]
async fn engine_errors_propagate_unchanged() {
    let server = MockServer::start().await;
    mount_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{DEPLOYMENT_ID}/resources")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "resource 'site' already registered in this deployment",
            "code": "DUPLICATE_NAME"
        })))
        .mount(&server)
        .await;

    let err = Context::run(config_for(&server), |ctx| async move {
        Website::new(
            &ctx,
            "site",
            WebsiteArgs {
                site_path: Some("./www".into()),
                ..WebsiteArgs::default()
            },
            ResourceOptions::default(),
        )
        .await
    })
    .await
    .expect_err("duplicate registration should fail");

    match err {
        CoreError::Api {
            ref message,
            ref code,
            status,
        } => {
            assert!(message.contains("already registered"));
            assert_eq!(code.as_deref(), Some("DUPLICATE_NAME"));
            assert_eq!(status, Some(409));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Validation happens before any remote call ───────────────────────

#[tokio::test]
async fn invalid_args_never_reach_the_engine() {
    let server = MockServer::start().await;
    mount_lifecycle(&server).await;

    // Any registration request trips the expect(0) assertion on drop.
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{DEPLOYMENT_ID}/resources")))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = Context::new(config_for(&server));
    ctx.connect().await.expect("session opens");

    let missing = Website::new(
        &ctx,
        "site",
        WebsiteArgs::default(),
        ResourceOptions::default(),
    )
    .await
    .expect_err("unset site_path should fail");
    assert!(matches!(missing, CoreError::MissingArgument { .. }));

    let blank = Website::new(
        &ctx,
        "site",
        WebsiteArgs {
            site_path: Some("".into()),
            ..WebsiteArgs::default()
        },
        ResourceOptions::default(),
    )
    .await
    .expect_err("blank site_path should fail");
    assert!(matches!(blank, CoreError::InvalidArgument { .. }));
}

// ── State observation ───────────────────────────────────────────────

#[tokio::test]
async fn deployment_state_is_observable() {
    let server = MockServer::start().await;
    mount_lifecycle(&server).await;

    let ctx = Context::new(config_for(&server));
    let state = ctx.deployment_state();
    assert_eq!(*state.borrow(), DeploymentState::Idle);

    ctx.connect().await.expect("session opens");
    assert_eq!(*state.borrow(), DeploymentState::Open);

    ctx.complete().await.expect("session completes");
    assert_eq!(*state.borrow(), DeploymentState::Completed);
}

#[tokio::test]
async fn failed_connection_marks_state_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/info"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let ctx = Context::new(config_for(&server));
    let state = ctx.deployment_state();

    ctx.connect().await.expect_err("engine is unavailable");
    assert_eq!(*state.borrow(), DeploymentState::Failed);
}

// ── Stack outputs ───────────────────────────────────────────────────

#[tokio::test]
async fn website_outputs_can_be_published() {
    let server = MockServer::start().await;
    mount_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{DEPLOYMENT_ID}/resources")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urn": site_urn(),
            "id": null,
            "outputs": {
                "originURL": "https://account.z13.web.core.windows.net/",
                "resourceGroupName": "resource-group-7f3a"
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{DEPLOYMENT_ID}/outputs")))
        .and(body_partial_json(json!({
            "urn": site_urn(),
            "outputs": {
                "originURL": "https://account.z13.web.core.windows.net/",
                "resourceGroupName": "resource-group-7f3a"
            }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Context::run(config_for(&server), |ctx| async move {
        let website = Website::new(
            &ctx,
            "site",
            WebsiteArgs {
                site_path: Some("./www".into()),
                ..WebsiteArgs::default()
            },
            ResourceOptions::default(),
        )
        .await?;

        let outputs = website.outputs().await?;
        ctx.register_outputs(website.urn(), outputs).await?;
        Ok(())
    })
    .await
    .expect("deployment should succeed");

    let _ = Uuid::parse_str(DEPLOYMENT_ID).expect("fixture deployment id is a UUID");
}
