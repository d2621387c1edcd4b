use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::net::{self, NetError};
use crate::sniff;

/// Path segment used when hosting an in-memory buffer.
const AUDIO_SEGMENT: &str = "audio";

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to bind media listener: {0}")]
    Bind(std::io::Error),
    #[error("failed to read media file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Net(#[from] NetError),
}

/// What the responder hands out, fixed at creation and never mutated.
enum Resource {
    Bytes(Bytes),
    File(PathBuf),
}

struct Served {
    resource: Resource,
    mime_type: &'static str,
}

/// Handle to a running media responder.
///
/// The responder keeps serving until the process exits; dropping the handle
/// does not stop it. [`MediaHost::shutdown`] stops it explicitly for
/// longer-lived embeddings.
pub struct MediaHost {
    url: String,
    mime_type: &'static str,
    port: u16,
    cancel: CancellationToken,
}

impl MediaHost {
    /// Externally reachable URL of the hosted resource.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// MIME type sniffed from the resource content.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// OS-assigned port the responder is bound to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop the responder task. Requests in flight finish first.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Serve an in-memory payload over HTTP on an ephemeral port. Returns as soon
/// as the listener is bound; the responder answers every request with the
/// full payload.
pub async fn host_bytes(payload: Vec<u8>) -> Result<MediaHost, HostError> {
    let mime_type = sniff::detect(&payload);
    serve(Resource::Bytes(payload.into()), mime_type, AUDIO_SEGMENT.to_string()).await
}

/// Serve a file over HTTP on an ephemeral port, under its base name. The MIME
/// type is sniffed from the file's leading bytes, not its extension.
pub async fn host_file(path: impl AsRef<Path>) -> Result<MediaHost, HostError> {
    let path = path.as_ref();

    let mut head = [0u8; 512];
    let mut file = tokio::fs::File::open(path).await?;
    let n = file.read(&mut head).await?;
    let mime_type = sniff::detect(&head[..n]);

    let segment = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| AUDIO_SEGMENT.to_string());

    serve(Resource::File(path.to_path_buf()), mime_type, segment).await
}

async fn serve(
    resource: Resource,
    mime_type: &'static str,
    segment: String,
) -> Result<MediaHost, HostError> {
    let listener = TcpListener::bind("0.0.0.0:0").await.map_err(HostError::Bind)?;
    let port = listener.local_addr().map_err(HostError::Bind)?.port();
    let ip = net::outbound_ipv4()?;

    let state = Arc::new(Served {
        resource,
        mime_type,
    });

    // Every method and path reaches the same handler: no routing, no access
    // control, exactly one logical resource per invocation.
    let app = Router::new()
        .fallback(serve_resource)
        .with_state(state);

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(token.cancelled_owned())
            .await
        {
            warn!(error = %e, "media responder exited with error");
        }
    });

    let url = format!("http://{ip}:{port}/{segment}");
    info!(%url, mime_type, "hosting media");

    Ok(MediaHost {
        url,
        mime_type,
        port,
        cancel,
    })
}

async fn serve_resource(State(served): State<Arc<Served>>) -> Response {
    let content_type = [(header::CONTENT_TYPE, served.mime_type)];

    match &served.resource {
        Resource::Bytes(data) => (content_type, data.clone()).into_response(),
        Resource::File(path) => match tokio::fs::File::open(path).await {
            Ok(file) => {
                let body = Body::from_stream(ReaderStream::new(file));
                (content_type, body).into_response()
            }
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        },
    }
}
