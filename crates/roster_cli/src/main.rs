/* 📖 # Why is the CLI minimal and hardcoded?

The CLI takes no arguments. Run `roster` in a directory and it serves the
student registry, reading `roster.toml` from that directory when present and
falling back to port 3000 on all interfaces otherwise.

The server runs until the process is stopped.

Exit codes:
- 1: Error (tracing setup, unreadable or invalid config, or the port could not be bound)
*/

use std::env;
use std::process;
use std::thread;
use std::time::Duration;

use roster_base::tracing::init_tracing;
use roster_base::{FilePath, PalHandle, RealPal};
use roster_engine::{ApiService, CONFIG_FILE_NAME, InMemoryStore, StoreHandle, load_config};
use tracing::info;

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: Failed to initialize tracing: {}", e);
        process::exit(1);
    }

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });

    let pal = PalHandle::new(RealPal::new(current_dir));

    let config_path = FilePath::from(CONFIG_FILE_NAME);
    let config = match load_config(&pal, &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config from {}: {}", CONFIG_FILE_NAME, e);
            process::exit(1);
        }
    };

    let store = StoreHandle::new(InMemoryStore::new());
    let service = ApiService::new(store, config.api_info());

    let handle = match pal.start_http_server(Box::new(service), config.http_server_config()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: Failed to start HTTP server: {}", e);
            process::exit(1);
        }
    };

    info!("API running on http://localhost:{}", handle.port());
    info!("API docs at http://localhost:{}/api-docs", handle.port());

    while !handle.is_shutdown() {
        thread::park_timeout(Duration::from_secs(1));
    }
}
