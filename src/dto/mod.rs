//! Request and response payloads of the JSON API.

pub mod api;
