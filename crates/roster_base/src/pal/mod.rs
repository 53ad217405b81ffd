/* 📖 # What is the Platform Abstraction Layer?

The PAL puts the two things the service needs from the outside world, reading its
config file and serving HTTP, behind one trait:
- RealPal reads from the real filesystem and listens on a real socket via tiny_http
- MockPal keeps files in memory and dispatches requests straight into the service

Handlers and config loading depend on the Pal trait, so tests never touch the network
unless they mean to.
*/

mod file_path;
pub mod http;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle, ReadSeek};
