/*!
## Rust Machine Module

This Rust module is the virtual machine for ForWhile: a sparse memory
holding both program and data, a value stack, a control stack, and the
runtime that decodes the program one byte at a time.

*/

/// Every signed 64-bit integer is an address.
pub type Address = i64;

mod config;
mod frame;
mod memory;
mod operation;
mod program;
mod runtime;
mod stack;

#[cfg(test)]
mod tests;

pub use config::{Config, DEFAULT_MAX_CALL_DEPTH};
pub use frame::Frame;
pub use memory::{Memory, PAGE_SIZE};
pub use operation::Operation;
pub use program::{Program, ENTRY};
pub use runtime::{Event, Runtime};
pub use stack::Stack;
