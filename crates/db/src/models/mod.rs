//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the table row plus
//! the input DTOs its repository accepts.

pub mod roster;
pub mod session;
pub mod user;
