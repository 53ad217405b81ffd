/* 📖 # Why have roster_base as a core library?
roster_base provides the foundational error handling, tracing setup and platform
abstraction (files and the HTTP server) used by the engine and the CLI.
This keeps error handling consistent and prevents circular dependencies between crates.
*/

pub mod error;
pub mod pal;
mod pal_tests;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{Error as RosterError, ErrorKind, Result as RosterResult, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
