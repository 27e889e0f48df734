pub mod display;

pub use display::{format_duration, write_results, NO_MATCHES};
