//! Shared domain types for Nexify.
//!
//! This crate holds the data shapes used across the workspace: chats and
//! their messages, LLM request/response types, error enums, and
//! configuration. It depends on no IO crates.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
