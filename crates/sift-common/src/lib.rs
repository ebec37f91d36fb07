//! Common utilities shared by the sift crates.
//!
//! - **Warning System** - colored terminal output for non-standard or
//!   degraded selector features, printed once per distinct message

pub mod warning;
