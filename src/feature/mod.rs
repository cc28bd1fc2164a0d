//! The feature module.
//!
//! Each submodule exposes one part of the HTTP API.

pub mod greeting;
