// eventintel: terminal client for the event intelligence backend.
//
// This is the library root. `api` talks to the backend, `workflow` holds
// the three-phase state machine, `output` renders it, and `shell` drives
// an interactive session.

pub mod api;
pub mod config;
pub mod output;
pub mod shell;
pub mod status;
pub mod workflow;
