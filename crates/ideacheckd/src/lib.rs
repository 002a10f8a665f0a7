//! Ideacheck daemon library - exposes modules for testing.

pub mod config;
pub mod cors;
pub mod credentials;
pub mod diagnostics;
pub mod error;
pub mod fakes;
pub mod fallback;
pub mod gemini;
pub mod invoker;
pub mod routes;
pub mod search;
pub mod server;
