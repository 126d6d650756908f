//! Library for talking to the VeSync smart home cloud api
//! (`https://smartapi.vesync.com`).
//!
//! It builds the request bodies the cloud expects, sends them with a bounded
//! timeout, strictly decodes the JSON answers, and implements the login that
//! turns username and password into a token and account id. It is used by the
//! `vesyncctrl` utility.
//!
//! ## Example
//!
//! ```no_run
//! use vesyncapi::{ClientConfig, VeSyncClient};
//!
//! # fn main() -> vesyncapi::Result<()> {
//! let client = VeSyncClient::new(ClientConfig::default())?;
//! let mut session = client.session("me@example.com", "password", "America/Chicago");
//!
//! client.login(&mut session)?;
//! println!("token: {}", session.token().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod api;
mod auth;
pub(crate) mod client;
pub mod config;
pub mod decode;
pub mod devices;
pub mod error;
pub mod http;
pub mod responses;
pub(crate) mod session;

pub use api::{Method, RequestBody};
pub use client::{ApiResponse, VeSyncClient};
pub use config::ClientConfig;
pub use decode::DecodeError;
pub use devices::{DeviceCategory, DeviceClass, DeviceModel};
pub use error::{Result, VeSyncError};
pub use http::{ReqwestTransport, Transport};
pub use responses::{ApiEnvelope, LoginResult};
pub use session::{AuthToken, Session};
