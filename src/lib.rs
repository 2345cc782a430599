//! # ForWhile
//!
//! A terse, stack-based language whose program text, data and
//! bookkeeping share one sparse 64-bit address space. Programs may
//! rewrite themselves while they run.
//!
//! ```text
//! forwhile "1 2 +"
//! forwhile -f program.fw
//! ```
//!
//! The program text is loaded at address -1 and read downward. Numbers
//! push themselves, `"text"` pushes its bytes followed by its length,
//! `cond[ ... ]` runs conditionally, `n( ... )` loops at most `n` times
//! while the body leaves a nonzero flag, and `{ ... }` pushes a
//! procedure address for `?` to call.
//!
//! ```
//! use forwhile::mach::{Event, Runtime};
//!
//! let mut runtime = Runtime::default();
//! runtime.enter("3~~ 2 3'>");
//! assert_eq!(runtime.execute(1000), Event::Stopped);
//! assert_eq!(runtime.values(), [-3, 0]);
//! ```

pub mod lang;
pub mod mach;
