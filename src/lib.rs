//! Demo MCP server library.
//!
//! A stdio JSON-RPC server exposing tools, resources and prompts. Layers:
//! `domain` (pure rules), `ports` (use-case and gateway traits), `app`
//! (services), `adapters` (gateway implementations), `mcp` (protocol).

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod mcp;
pub mod ports;
pub mod wiring;

#[cfg(test)]
mod testing;

pub use error::Error;
