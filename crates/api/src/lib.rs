//! HTTP API: routing, request/response mapping, and the survey pages.

pub mod app;
