//! HTTP request handlers.
//!
//! Handlers validate input, call into the service and store layers, and render
//! responses. OAuth failures on the callback route are reported in-band as a
//! rendered page with a 200 status rather than an error status.

pub mod auth;
pub mod user;
