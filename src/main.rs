//! # ForWhile
//!
//! Runs one program given on the command line or read from a file.
//!

mod term;

fn main() -> std::process::ExitCode {
    term::main()
}
