//! Credential handling for member sign-in.
//!
//! - [`password`] -- Argon2id hashing and verification.
//! - [`jwt`] -- access-token signing/validation and refresh-token hashing.

pub mod jwt;
pub mod password;
