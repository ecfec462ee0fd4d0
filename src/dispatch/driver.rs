//! The per-request dispatch driver.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::app::AppCallback;
use crate::config::{validation, ConfigError, ListenConfig};
use crate::dispatch::domain::AppDomain;
use crate::engine::{ParsedRequest, RequestSink, UpgradeClass};
use crate::env::{self, EnvTemplates};
use crate::observability::metrics;
use crate::response::{
    self, BodyValue, PendingBody, ResolvedBody,
};
use crate::upgrade;

/// The single terminal network action chosen for one request.
#[derive(Debug)]
enum Action {
    SendBody(u16, Bytes),
    SendFile(u16, PathBuf),
    Empty(u16),
    Error(u16),
    Upgraded(u16),
}

/// The gateway: per-request entry point the network engine drives.
///
/// Holds the application callback, the environment templates built at bind
/// time and the global serialization domain. One instance serves all
/// workers; it is immutable after [`Gateway::bind`].
pub struct Gateway {
    app: Option<Arc<dyn AppCallback>>,
    templates: EnvTemplates,
    domain: Arc<AppDomain>,
    log_requests: bool,
    sendfile_enabled: bool,
}

impl Gateway {
    /// Validate the configuration and build the gateway.
    ///
    /// Fails when neither an application callback nor a static-file root
    /// is configured; out-of-range timeout values are normalized with a
    /// warning. Errors here are fatal to this bind only.
    pub fn bind(
        mut config: ListenConfig,
        app: Option<Arc<dyn AppCallback>>,
    ) -> Result<Self, ConfigError> {
        validation::normalize(&mut config);
        validation::validate(&config, app.is_some()).map_err(ConfigError::Validation)?;

        let sendfile_enabled = config.public_root.is_some();
        tracing::info!(
            port = %config.port,
            address = config.address.as_deref().unwrap_or("*"),
            static_root = ?config.public_root,
            log_requests = config.log_requests,
            "gateway bound"
        );
        if app.is_none() {
            tracing::info!(port = %config.port, "no application callback, serving static files only");
        }

        Ok(Self {
            app,
            templates: EnvTemplates::build(sendfile_enabled),
            domain: Arc::new(AppDomain::new()),
            log_requests: config.log_requests,
            sendfile_enabled,
        })
    }

    /// The serialization domain guarding all application code.
    pub fn domain(&self) -> Arc<AppDomain> {
        self.domain.clone()
    }

    /// Entry point for an ordinary parsed request.
    pub async fn on_request(&self, request: ParsedRequest, sink: &mut dyn RequestSink) {
        self.handle(request, UpgradeClass::None, sink).await;
    }

    /// Entry point for a request whose handshake negotiated a protocol
    /// upgrade; `protocol` is the engine's short token.
    pub async fn on_upgrade(
        &self,
        request: ParsedRequest,
        protocol: &str,
        sink: &mut dyn RequestSink,
    ) {
        self.handle(request, UpgradeClass::from_token(protocol), sink)
            .await;
    }

    async fn handle(
        &self,
        request: ParsedRequest,
        class: UpgradeClass,
        sink: &mut dyn RequestSink,
    ) {
        let request_id = Uuid::new_v4();
        let method = request.method.to_string();
        let path = request.path.clone();

        let action = {
            let sink = &mut *sink;
            self.domain
                .enter(move || self.run_callback(request, class, sink))
                .await
        };

        self.perform(action, sink, request_id, &method, &path);
    }

    /// Everything that touches application code; runs inside the domain.
    fn run_callback(
        &self,
        request: ParsedRequest,
        class: UpgradeClass,
        sink: &mut dyn RequestSink,
    ) -> Action {
        let Some(app) = self.app.as_ref() else {
            tracing::warn!(path = %request.path, "request without application callback");
            return Action::Error(404);
        };

        let mut environment = env::build(&request, class, &self.templates);
        let value = app.call(&mut environment);

        let descriptor = match response::interpret(value, self.sendfile_enabled) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::warn!(error = %err, "malformed application response");
                return Action::Error(err.status());
            }
        };

        sink.set_status(descriptor.status);
        for (name, value) in &descriptor.headers {
            sink.set_header(name, value);
        }

        match descriptor.body {
            PendingBody::File(path) => Action::SendFile(descriptor.status, path),
            PendingBody::Value(body) => {
                if upgrade::review(&mut environment, descriptor.status, sink, &self.domain) {
                    // Upgraded responses still release body resources.
                    if let BodyValue::Stream(mut stream) = body {
                        stream.close();
                    }
                    return Action::Upgraded(descriptor.status);
                }
                match response::resolve_body(descriptor.status, body) {
                    Ok(ResolvedBody::Buffer(buf)) => Action::SendBody(descriptor.status, buf),
                    Ok(ResolvedBody::Empty) => Action::Empty(descriptor.status),
                    Err(err) => {
                        tracing::warn!(error = %err, "malformed response body");
                        Action::Error(err.status())
                    }
                }
            }
        }
    }

    /// The terminal network action; runs after the domain is released.
    fn perform(
        &self,
        action: Action,
        sink: &mut dyn RequestSink,
        request_id: Uuid,
        method: &str,
        path: &str,
    ) {
        let (label, status) = match action {
            Action::SendBody(status, body) => {
                sink.send_body(body);
                ("send_body", status)
            }
            Action::SendFile(status, file) => match sink.send_file(&file) {
                Ok(()) => ("send_file", status),
                Err(err) => {
                    tracing::warn!(path = %file.display(), error = %err, "sendfile failed");
                    sink.send_error(404);
                    ("send_file_error", 404)
                }
            },
            Action::Empty(status) => {
                sink.finish();
                ("empty", status)
            }
            Action::Error(status) => {
                sink.send_error(status);
                ("error", status)
            }
            Action::Upgraded(status) => ("upgraded", status),
        };

        metrics::record_request(label, status);
        if self.log_requests {
            tracing::info!(
                request_id = %request_id,
                method,
                path,
                status,
                action = label,
                "request complete"
            );
        } else {
            tracing::debug!(
                request_id = %request_id,
                method,
                path,
                status,
                action = label,
                "request complete"
            );
        }
    }
}
