//! Infrastructure implementations for Nexify.
//!
//! Concrete adapters behind the ports defined in `nexify-core`: the SQLite
//! chat repository, the Groq completion provider, and configuration
//! loading.

pub mod config;
pub mod llm;
pub mod sqlite;
