pub mod api;
pub mod config;
pub mod store;
pub mod student;

pub use api::{ApiInfo, ApiService};
pub use config::{CONFIG_FILE_NAME, ServiceConfig, load_config};
pub use store::{InMemoryStore, StoreHandle, StudentStore};
pub use student::{Student, StudentFields, StudentId};
