//! # Taskboard API Server Library
//!
//! This library provides the HTTP surface of the Taskboard backend.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, and the identity layer
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
