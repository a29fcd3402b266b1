//! Wire types shared by every API endpoint.
//!
//! These DTOs are the JSON request and response bodies of the REST API. Server-side domain
//! models convert into them at the controller boundary.

pub mod achievement;
pub mod api;
pub mod auth;
pub mod event;
pub mod notification;
pub mod shop;
pub mod user;
