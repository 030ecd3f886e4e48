// Event intelligence backend API: request/response types and the HTTP adapter.
//
// The backend owns discovery and the social actions; this module only maps
// typed requests onto its JSON endpoints and classifies failures.

pub mod action;
pub mod client;
pub mod error;
pub mod gateway;
pub mod pacer;
pub mod types;
