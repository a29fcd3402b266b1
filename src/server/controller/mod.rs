//! HTTP request handlers.
//!
//! Each handler authenticates through `AuthGuard`, converts request DTOs into domain
//! parameters, calls a service and converts the result back into a response DTO.

pub mod achievement;
pub mod admin;
pub mod auth;
pub mod event;
pub mod notification;
pub mod shop;
pub mod user;

use serde::Deserialize;

/// Query flag letting admins see deactivated events, achievements and products.
///
/// Ignored for students, who only ever see active records.
#[derive(Deserialize, Default)]
pub struct VisibilityParams {
    #[serde(default)]
    pub include_inactive: bool,
}

const DEFAULT_PER_PAGE: u64 = 20;
const MAX_PER_PAGE: u64 = 100;

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

/// Keeps a requested page size within `1..=100`.
fn clamp_per_page(per_page: u64) -> u64 {
    per_page.clamp(1, MAX_PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_size() {
        assert_eq!(clamp_per_page(0), 1);
        assert_eq!(clamp_per_page(25), 25);
        assert_eq!(clamp_per_page(1_000), 100);
    }
}
