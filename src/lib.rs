//! Telelog - authenticated telemetry collector
//!
//! Three small collectors behind one SQLite store:
//! - GPS fixes from a location tracker (`GET /log`)
//! - forwarded SMS messages (`POST /sms-log`)
//! - page view counts with rolling windows (`GET /site/view`)

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod stats;
pub mod web;
