//! Authentication primitives.
//!
//! Login is handled by the external identity provider; this server only
//! verifies the HS256 access tokens it issues.
//!
//! - [`jwt`] -- JWT access-token validation (and generation, for tooling and tests).

pub mod jwt;
