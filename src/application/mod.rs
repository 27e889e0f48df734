pub mod config;
pub mod loader;
pub mod driver;

pub use config::Config;
pub use loader::{load_users, LoadError};
pub use driver::{run, Outcome};
