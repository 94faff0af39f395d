//! Time-bound signed link tokens.
//!
//! Issue and verify opaque, URL-safe tokens that carry a string payload and an absolute expiry.
//! Anybody holding the shared [`Key`] can validate a token and recover the payload.
//! Typical use is an email confirmation or password reset link that expires on its own.
//!
//! The payload is integrity protected, NOT encrypted: anybody can read it without the key.
//!
//! ## Wire Format
//!
//! ```text
//! token := base64url( frame || mac )
//! frame := lowercase(algorithm) "|" rfc3339(expiry) "|" payload
//! mac   := HMAC(key, frame, algorithm)
//! ```
//!
//! The MAC length is the digest size of the algorithm, so no length field is transmitted.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//!
//! let key = link_token::Key::new(b"12345678".to_vec());
//! let token = link_token::encode("email=a@example.com", Duration::from_secs(20), &key, "sha256")?;
//!
//! let claims = link_token::decode(&token, &key)?;
//! assert_eq!(claims.payload, "email=a@example.com");
//! assert_eq!(claims.algorithm, link_token::Algorithm::Sha256);
//! # Ok::<(), link_token::Error>(())
//! ```
//!
//! See [`Codec`] to customize the [`Policy`] of permitted algorithms.

mod algorithm;
mod claims;
mod codec;
mod error;
mod key;
mod policy;

pub mod clock;
pub mod frame;
pub mod transport;

pub use algorithm::*;
pub use claims::*;
pub use codec::*;
pub use error::*;
pub use key::*;
pub use policy::*;
