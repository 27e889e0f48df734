pub mod user;
pub mod filter;

pub use user::{Age, User};
pub use filter::{filter_by_age, filter_by_email, filter_by_name, FilterKind, InvalidQuery, UnsupportedOption};
