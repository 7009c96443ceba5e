//! eStove API - telemetry and command relay for the eStove cooking appliance
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod routes;
pub mod services;
