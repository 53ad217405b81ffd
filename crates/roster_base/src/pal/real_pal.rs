use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::{ErrorKind, RosterError, RosterResult, ResultExt};

use super::FilePath;
use super::http::{
    HttpBody, HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle,
    HttpService,
};
use super::traits::{Pal, ReadSeek};

/// How long the accept loop waits for a request before re-checking the shutdown flag.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Concrete PAL implementation using the real filesystem and a tiny_http server.
///
/// All file paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to an absolute filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> RosterResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.exists();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> RosterResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(RosterError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self, service), fields(address = %config.address()))]
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> RosterResult<HttpServerHandle> {
        let address = config.address();
        let server = tiny_http::Server::http(&address)
            .map_err(|e| crate::err!("Failed to bind HTTP server to {}: {}", address, e))?;
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .ok_or_else(|| crate::err!("HTTP server on {} is not bound to an IP socket", address))?;

        let handle = HttpServerHandle::new(port);
        let shutdown = handle.shutdown_flag();
        let service: Arc<dyn HttpService> = Arc::from(service);
        let server_name = config.server_name.clone();

        info!(server = %server_name, port, "HTTP server listening");

        thread::Builder::new()
            .name(format!("{}-accept", server_name))
            .spawn(move || {
                while !shutdown.load(Ordering::SeqCst) {
                    match server.recv_timeout(ACCEPT_POLL_INTERVAL) {
                        Ok(Some(request)) => {
                            let service = service.clone();
                            let spawned = thread::Builder::new()
                                .name(format!("{}-request", server_name))
                                .spawn(move || serve_request(service.as_ref(), request));
                            if let Err(e) = spawned {
                                error!(error = %e, "failed to spawn request thread");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(error = %e, "HTTP accept loop failed");
                            break;
                        }
                    }
                }
                info!(server = %server_name, "HTTP server stopped");
            })
            .map_err(|e| {
                Box::new(
                    RosterError::new(ErrorKind::IoError { source: e })
                        .context("Failed to spawn HTTP accept thread"),
                )
            })?;

        Ok(handle)
    }
}

/// Translate one tiny_http request, run it through the service, and write the response.
fn serve_request(service: &dyn HttpService, mut request: tiny_http::Request) {
    let method = request.method().as_str().to_string();
    let url = request.url().to_string();

    let response = match convert_request(&mut request) {
        Ok(converted) => service
            .handle_request(converted)
            .unwrap_or_else(|e| HttpResponse::from_error(&e)),
        Err(e) => {
            warn!(method = %method, url = %url, error = %e, "rejected request");
            HttpResponse::from_error(&e)
        }
    };

    debug!(method = %method, url = %url, status = response.status().as_u16(), "request handled");

    if let Err(e) = request.respond(convert_response(response)) {
        warn!(method = %method, url = %url, error = %e, "failed to write response");
    }
}

fn convert_request(request: &mut tiny_http::Request) -> RosterResult<HttpRequest> {
    let method = HttpMethod::parse(request.method().as_str()).ok_or_else(|| {
        Box::new(RosterError::bad_request(format!(
            "unsupported method {}",
            request.method()
        )))
    })?;

    let mut body = Vec::new();
    request
        .as_reader()
        .read_to_end(&mut body)
        .map_err(|e| Box::new(RosterError::new(ErrorKind::IoError { source: e })))
        .context("Failed to read request body")?;

    let mut converted = HttpRequest::new(method, request.url()).with_body(body);
    for header in request.headers() {
        converted = converted.with_header(header.field.as_str().as_str(), header.value.as_str());
    }
    Ok(converted)
}

fn convert_response(response: HttpResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let status = tiny_http::StatusCode(response.status().as_u16());
    let headers: Vec<tiny_http::Header> = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
        })
        .collect();
    let body: HttpBody = response.into_body();
    let length = body.len();
    tiny_http::Response::new(
        status,
        headers,
        std::io::Cursor::new(body.into_bytes()),
        Some(length),
        None,
    )
}
