//! earcard CLI library.
//!
//! The drill [`session::Session`] and the command implementations behind the
//! `earcard` binary.

pub mod commands;
pub mod session;
