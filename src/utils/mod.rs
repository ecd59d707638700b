//! Helper functions shared by the server and the admin CLI.
//!
//! - [`token`] - API token generation and HMAC hashing
//! - [`mask`] - Credential masking for logs and summaries

pub mod mask;
pub mod token;
