//! Cross-cutting HTTP filters.
//!
//! - `logging`: logs request metadata plus request and response body chunks
//!   as they stream through, without altering them

mod logging;

#[cfg(test)]
mod logging_test;

pub use logging::{log_exchange, query_params};
