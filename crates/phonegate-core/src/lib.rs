//! Core library for phonegate: phone validation, profile fetching,
//! session persistence, the login state machine, and route decisions.

pub mod config;
pub mod logging;
pub mod login;
pub mod phone;
pub mod profile;
pub mod route;
pub mod session;
