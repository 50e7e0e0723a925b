//! Interactive terminal front end.

pub mod session;

pub use session::{SessionOptions, run_session};
