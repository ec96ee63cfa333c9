//! Provider implementations.
//!
//! Each provider lives in its own module behind a feature flag of the same
//! name; shared helpers live in [`common`].

pub(crate) mod common;

#[cfg(feature = "rfc2136")]
mod rfc2136;

#[cfg(feature = "rfc2136")]
pub use rfc2136::Rfc2136Provider;
