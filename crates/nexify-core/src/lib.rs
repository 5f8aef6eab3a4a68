//! Business logic and repository trait definitions for Nexify.
//!
//! This crate defines the "ports" (the chat repository and completion
//! provider traits) that the infrastructure layer implements, plus the
//! orchestration core: context building, title generation, day-bucket
//! query ranges, and the prompt-handling service. It depends only on
//! `nexify-types` -- never on `nexify-infra` or any database/HTTP crate.

pub mod chat;
pub mod llm;
