//! HTTP API: routing, request validation, and response mapping.

pub mod app;
