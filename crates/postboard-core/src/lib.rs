//! Core Postboard library (config, credential storage, backend API client).

pub mod api;
pub mod config;
pub mod credentials;
