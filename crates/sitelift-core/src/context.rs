// ── Deployment context ──
//
// Lifecycle management for one deployment session against the engine.
// The context opens the session, forwards resource registrations, and
// closes the session. It owns no scheduling: ordering, parallelism, and
// retries across the resource graph are the engine's responsibility.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info};
use uuid::Uuid;

use sitelift_api::engine_types::{
    DeploymentCreateRequest, RegisterOutputsRequest, RegisterResourceOptions,
    RegisterResourceRequest,
};
use sitelift_api::transport::{TlsMode, TransportConfig};
use sitelift_api::{EngineClient, engine_types::PropertyMap};

use crate::config::{EngineConfig, EngineCredentials, TlsVerification};
use crate::convert::{DeploymentSummary, EngineInfo};
use crate::error::CoreError;
use crate::resource::{RegisteredComponent, ResourceOptions, Urn};

// ── DeploymentState ──────────────────────────────────────────────

/// Deployment session state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentState {
    Idle,
    Connecting,
    Open,
    Completed,
    Failed,
}

// ── Context ──────────────────────────────────────────────────────

struct Session {
    client: EngineClient,
    deployment_id: Uuid,
}

/// The main entry point for programs registering resources.
///
/// Cheaply cloneable via `Arc<ContextInner>`. Opens a deployment session
/// on [`connect()`](Self::connect), forwards registrations while the
/// session is open, and closes it on [`complete()`](Self::complete).
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    config: EngineConfig,
    state: watch::Sender<DeploymentState>,
    session: Mutex<Option<Session>>,
}

impl Context {
    /// Create a new Context from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to open a deployment session.
    pub fn new(config: EngineConfig) -> Self {
        let (state, _) = watch::channel(DeploymentState::Idle);

        Self {
            inner: Arc::new(ContextInner {
                config,
                state,
                session: Mutex::new(None),
            }),
        }
    }

    /// Access the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    // ── Session lifecycle ────────────────────────────────────────

    /// Connect to the engine and open a deployment session.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self.inner.state.send(DeploymentState::Connecting);

        let result = self.open_session().await;
        if result.is_err() {
            let _ = self.inner.state.send(DeploymentState::Failed);
        }
        result
    }

    async fn open_session(&self) -> Result<(), CoreError> {
        let config = &self.inner.config;
        let client = build_client(config)?;

        let engine = client.get_info().await?;
        debug!(version = %engine.version, "connected to engine");

        let deployment = client
            .create_deployment(&DeploymentCreateRequest {
                project: config.project.clone(),
                stack: config.stack.clone(),
            })
            .await?;

        *self.inner.session.lock().await = Some(Session {
            client,
            deployment_id: deployment.id,
        });

        let _ = self.inner.state.send(DeploymentState::Open);
        info!(
            deployment = %deployment.id,
            project = %config.project,
            stack = %config.stack,
            "deployment opened"
        );
        Ok(())
    }

    /// Close the deployment session and return the engine's summary.
    pub async fn complete(&self) -> Result<DeploymentSummary, CoreError> {
        let session_guard = self.inner.session.lock().await;
        let session = session_guard.as_ref().ok_or(CoreError::DeploymentNotOpen)?;

        let summary = session
            .client
            .complete_deployment(&session.deployment_id)
            .await?;

        let _ = self.inner.state.send(DeploymentState::Completed);
        info!(
            resources = summary.resource_count,
            status = %summary.status,
            "deployment complete"
        );
        Ok(summary.into())
    }

    /// Mark the deployment as failed. Does not contact the engine --
    /// an abandoned session times out engine-side.
    pub fn fail(&self) {
        let _ = self.inner.state.send(DeploymentState::Failed);
    }

    // ── Resource registration ────────────────────────────────────

    /// Register a remote component resource with the engine.
    ///
    /// Issues exactly one registration request and returns the engine's
    /// result or error unchanged. No retries here: the engine and the
    /// provider plugin own all provisioning behavior.
    pub async fn register_remote_component(
        &self,
        type_token: &str,
        name: &str,
        inputs: PropertyMap,
        options: &ResourceOptions,
    ) -> Result<RegisteredComponent, CoreError> {
        if *self.inner.state.borrow() != DeploymentState::Open {
            return Err(CoreError::DeploymentNotOpen);
        }

        let session_guard = self.inner.session.lock().await;
        let session = session_guard.as_ref().ok_or(CoreError::DeploymentNotOpen)?;

        let request = RegisterResourceRequest {
            type_token: type_token.to_owned(),
            name: name.to_owned(),
            remote: true,
            inputs,
            options: wire_options(options),
        };

        debug!(type_token, name, "registering remote component");
        let response = session
            .client
            .register_resource(&session.deployment_id, &request)
            .await?;

        Ok(RegisteredComponent {
            urn: Urn::new(response.urn),
            id: response.id,
            outputs: response.outputs,
        })
    }

    /// Publish component outputs onto the deployment record.
    pub async fn register_outputs(
        &self,
        urn: &Urn,
        outputs: PropertyMap,
    ) -> Result<(), CoreError> {
        let session_guard = self.inner.session.lock().await;
        let session = session_guard.as_ref().ok_or(CoreError::DeploymentNotOpen)?;

        session
            .client
            .register_outputs(
                &session.deployment_id,
                &RegisterOutputsRequest {
                    urn: urn.to_string(),
                    outputs,
                },
            )
            .await?;
        Ok(())
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, complete.
    ///
    /// On closure error the session is marked failed and left for the
    /// engine to reap; the error is returned unchanged.
    pub async fn run<F, Fut, T>(config: EngineConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Context) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let ctx = Context::new(config);
        ctx.connect().await?;

        match f(ctx.clone()).await {
            Ok(value) => {
                ctx.complete().await?;
                Ok(value)
            }
            Err(err) => {
                ctx.fail();
                Err(err)
            }
        }
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to deployment state changes.
    pub fn deployment_state(&self) -> watch::Receiver<DeploymentState> {
        self.inner.state.subscribe()
    }
}

// ── Engine queries outside a deployment ──────────────────────────

/// Query engine build/protocol info without opening a deployment.
pub async fn engine_info(config: &EngineConfig) -> Result<EngineInfo, CoreError> {
    let client = build_client(config)?;
    let info = client.get_info().await?;
    Ok(info.into())
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build an [`EngineClient`] from the engine configuration.
fn build_client(config: &EngineConfig) -> Result<EngineClient, CoreError> {
    let transport = TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    };

    let client = match &config.auth {
        EngineCredentials::Token(token) => {
            EngineClient::from_token(config.url.as_str(), token, &transport)?
        }
        EngineCredentials::Anonymous => EngineClient::anonymous(config.url.as_str(), &transport)?,
    };
    Ok(client)
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

/// Translate caller options into the wire shape. `depends_on` is
/// deduplicated; `protect: false` is omitted from the payload.
fn wire_options(options: &ResourceOptions) -> RegisterResourceOptions {
    let mut depends_on: Vec<String> = Vec::new();
    for urn in &options.depends_on {
        let raw = urn.to_string();
        if !depends_on.contains(&raw) {
            depends_on.push(raw);
        }
    }

    RegisterResourceOptions {
        parent: options.parent.as_ref().map(Urn::to_string),
        depends_on,
        protect: options.protect.then_some(true),
        provider: options.provider.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_options_dedupes_and_omits_defaults() {
        let a: Urn = "urn:sitelift:dev::main::t::a".into();
        let options = ResourceOptions {
            parent: None,
            depends_on: vec![a.clone(), a.clone()],
            protect: false,
            provider: None,
        };

        let wire = wire_options(&options);
        assert_eq!(wire.depends_on.len(), 1);
        assert_eq!(wire.protect, None);
        assert_eq!(wire.parent, None);
    }

    #[tokio::test]
    async fn register_before_connect_is_rejected() {
        let ctx = Context::new(EngineConfig::default());
        let err = ctx
            .register_remote_component("t:index:T", "r", PropertyMap::new(), &ResourceOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DeploymentNotOpen));
    }
}
