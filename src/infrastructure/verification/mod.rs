//! Verification client for a remote authorization daemon

mod client;
mod transport;

pub use client::{
    ClientTimings, VerificationClient, DEFAULT_AT_LEAST, DEFAULT_PRE_DELAY, DEFAULT_TIMEOUT,
};
pub use transport::{CheckTransport, HttpCheckTransport, TlsOptions};
