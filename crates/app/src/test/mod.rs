//! Shared test infrastructure.

mod db;
mod helpers;
mod spans;

pub(crate) use context::TestContext;
pub(crate) use spans::SpanCapture;
