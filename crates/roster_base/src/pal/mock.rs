use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU16, Ordering};

use crate::ErrorKind;
use crate::RosterError;
use crate::RosterResult;

use super::FilePath;
use super::http::{HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle, HttpService};
use super::traits::{Pal, ReadSeek};

/* 📖 # Why use HashMap for MockPal storage?

MockPal keeps files and "running" servers in memory behind Arc<Mutex<T>>:
1. **Speed**: No filesystem or socket I/O, deterministic and fast for unit tests
2. **Isolation**: No side effects on the real filesystem or ports
3. **Control**: Tests decide exactly which config file exists
*/

/// In-memory PAL implementation for testing.
///
/// ```
/// use roster_base::{MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("roster.toml"), b"port = 8080".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("roster.toml")).unwrap();
/// assert_eq!(content, "port = 8080");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    http_servers: Arc<Mutex<HashMap<u16, HttpServerInfo>>>,
    next_port: Arc<AtomicU16>,
}

/// Information about a registered HTTP server.
#[derive(Debug)]
struct HttpServerInfo {
    service: Box<dyn HttpService>,
    _config: HttpServerConfig,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            http_servers: Arc::new(Mutex::new(HashMap::new())),
            next_port: Arc::new(AtomicU16::new(10000)),
        }
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().insert(path, content);
    }

    /// Simulate an HTTP request to a running server.
    ///
    /// Looks up the service registered for `port` and invokes it directly,
    /// returning exactly what the service returned (errors are not mapped to responses).
    pub fn simulate_request(&self, port: u16, request: HttpRequest) -> RosterResult<HttpResponse> {
        let servers = self.http_servers.lock();
        let server_info = servers
            .get(&port)
            .ok_or_else(|| crate::err!("No HTTP server registered on port {}", port))?;

        server_info.service.handle_request(request)
    }

    /// Get the number of registered HTTP servers.
    pub fn http_server_count(&self) -> usize {
        self.http_servers.lock().len()
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> RosterResult<bool> {
        Ok(self.files.lock().contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> RosterResult<Box<dyn ReadSeek + 'static>> {
        let files = self.files.lock();
        match files.get(path) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone()))),
            None => Err(Box::new(RosterError::new(ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            }))),
        }
    }

    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> RosterResult<HttpServerHandle> {
        // Use the configured port if provided, otherwise auto-assign
        let port = match config.port {
            Some(p) => p,
            None => self.next_port.fetch_add(1, Ordering::SeqCst),
        };

        let mut servers = self.http_servers.lock();
        if servers.contains_key(&port) {
            crate::bail!("Port {} is already in use", port);
        }
        servers.insert(
            port,
            HttpServerInfo {
                service,
                _config: config,
            },
        );

        Ok(HttpServerHandle::new(port))
    }
}
