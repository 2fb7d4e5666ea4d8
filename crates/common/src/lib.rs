//! Ambient helpers shared by the workspace: tracing setup and small
//! response payloads that are not tied to the customer domain.

pub mod types;
pub mod utils;
