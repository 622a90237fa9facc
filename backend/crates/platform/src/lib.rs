//! Platform - cryptographic building blocks shared across domains
//!
//! Currently hosts password hashing. Domain crates wrap these primitives in
//! their own value objects instead of using them directly in entities.

pub mod password;
