//! Request handlers

pub mod claims;
pub mod damages;
pub mod health;
