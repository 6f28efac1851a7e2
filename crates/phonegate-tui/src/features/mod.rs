//! Screen features: each owns its state, key handling and view.

pub mod dashboard;
pub mod login;
