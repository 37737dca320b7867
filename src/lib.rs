// HTTP server modules
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sse;

// Provider-backed features
pub mod coach;
pub mod pacing;
pub mod sentiment;

// LLM abstraction layer
pub mod llm;
