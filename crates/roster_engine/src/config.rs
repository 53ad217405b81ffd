use serde::Deserialize;
use tracing::info;

use roster_base::pal::http::HttpServerConfig;
use roster_base::{FilePath, PalHandle, RosterResult, ResultExt};

use crate::api::ApiInfo;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "roster.toml";

/// Configuration for the student registry service.
///
/// Every key is optional; missing keys fall back to the defaults, which
/// reproduce a service listening on port 3000 on all interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Title shown in the API documentation.
    pub title: String,
    /// API version shown in the API documentation.
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            title: "Student CRUD API".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Server settings for the PAL.
    pub fn http_server_config(&self) -> HttpServerConfig {
        HttpServerConfig::new(self.host.clone())
            .with_port(self.port)
            .with_server_name("roster")
    }

    /// Metadata for the generated API documentation.
    pub fn api_info(&self) -> ApiInfo {
        ApiInfo::new(self.title.clone()).with_version(self.version.clone())
    }
}

/// Load the service configuration from `path`, or the defaults if it does not exist.
pub fn load_config(pal: &PalHandle, path: &FilePath) -> RosterResult<ServiceConfig> {
    if !pal.file_exists(path)? {
        info!(path = %path, "no config file found, using defaults");
        return Ok(ServiceConfig::default());
    }

    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: ServiceConfig = toml::from_str(&text)
        .map_err(|e| roster_base::err!("Failed to parse config file {}: {}", path, e))?;
    info!(path = %path, host = %config.host, port = config.port, "config loaded");
    Ok(config)
}
