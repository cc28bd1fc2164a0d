//! The core business logic, independent of the HTTP layer.

pub mod greeting;
