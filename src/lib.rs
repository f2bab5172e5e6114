//! Library exports for the URL shortener application
//!
//! This module exposes internal components for testing and potential library usage.

pub mod config;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handler;
pub mod lookup;
pub mod model;
pub mod route;
pub mod store;
