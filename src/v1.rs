//! OAuth 1.0a signing (RFC 5849).

mod context;
mod signer;
mod values;

pub use context::{SigningContext, SigningContextBuilder, Stamp};
pub use signer::{AuthorizationHeader, SignatureDebug, SignedParams, SignedResult, Signer};
pub use values::*;
