//! Gemini provider implementation
//!
//! This module provides a client for Google's Gemini models through the
//! public `generateContent` API, implementing the LlmProvider trait.

pub mod client;
pub mod mapper;
pub mod types;

// Re-export main types for convenience
pub use client::{GeminiClient, GeminiConfig, GeminiModel, DEFAULT_BASE_URL};
