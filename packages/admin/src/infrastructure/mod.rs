//! Infrastructure layer: HTTP access to the admin endpoints.

pub mod http;

pub use http::{HttpAdminApi, LOGIN_REQUIRED_TEXT};
