//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that dispatch through the session and format output
//!
//! Handlers should NOT call ports directly or contain introspection logic.

pub mod query;
pub mod report;
pub mod tier;
