//! Per-site flow helpers composed from the esperar action dispatcher.

pub mod amazon;
pub mod auth;
pub mod google;
pub mod signup;
pub mod talent;
