// Control-plane session API
//
// Cookie/XSRF-authenticated JSON API served under `/api/{n}.0`.
// Transport mechanics live in `client`; each resource family adds
// inherent methods from its own file.

pub mod auth;
pub mod client;
pub mod jobs;
pub mod keys;
pub mod license;
pub mod models;
pub mod sensors;

pub use client::ControlClient;
