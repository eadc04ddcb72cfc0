//! OAuth 1.0a request signing: signature base strings, signatures and
//! `Authorization` header values.
//!
//! ```no_run
//! use oauthsign::{OAuthParameter, Signer, SigningContext, Stamp};
//!
//! let signer = Signer::new(
//!     SigningContext::builder("consumer-key", "consumer-secret")
//!         .token("token", "token-secret")
//!         .build(),
//! );
//! let header = signer.render_authorization_header(
//!     "GET",
//!     "https://api.example.com/resource",
//!     &Stamp::new(),
//!     &[("page", OAuthParameter::from("2"))],
//!     "OAuth ",
//! )?;
//! println!("{}", header);
//! # Ok::<(), oauthsign::Error>(())
//! ```

pub mod encoder;
pub mod parameters;
pub mod v1;

mod error;
mod util;

pub use encoder::{build_query_string, encode, encode_value, generate_nonce, normalize_url};
pub use error::{Error, Result};
pub use parameters::{OAuthParameter, ParamValue, ParameterSet};
pub use v1::{
    AuthorizationHeader, SignatureDebug, SignatureMethod, SignedParams, SignedResult, Signer,
    SigningContext, SigningContextBuilder, Stamp,
};
