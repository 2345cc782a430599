/*!
# Rust Language Module

This Rust module classifies the bytes of a ForWhile program and
describes the errors a run can end with.

*/

#[macro_use]
mod error;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use token::{Block, Operator, Token};
