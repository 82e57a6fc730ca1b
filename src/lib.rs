//! Lovemeter - An anonymous engagement counter service
//!
//! This library provides the core functionality for the Lovemeter service:
//! an IP-keyed "love" toggle with fresh counts and an append-only event log.
//!
//! # Architecture
//! - `api`: HTTP services and middleware
//! - `cli`: Command-line argument definitions
//! - `config`: Configuration management
//! - `errors`: Unified error types
//! - `services`: LoveTracker business logic
//! - `storage`: SeaORM storage backend
//! - `system`: Logging, lifecycle and execution modes
//! - `utils`: Visitor identity helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
