//! Request handlers.

pub mod invitation;
