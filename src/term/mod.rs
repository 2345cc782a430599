extern crate ansi_term;
extern crate ctrlc;
use ansi_term::Style;
use clap::Parser;
use forwhile::lang::Error;
use forwhile::mach::{Config, Event, Program, Runtime, Stack, DEFAULT_MAX_CALL_DEPTH};
use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

const SEPARATOR: &str = "------------------";

#[derive(Debug, Parser)]
#[command(name = "forwhile", version, about = "Run a ForWhile program")]
struct Args {
    /// Program text to run
    #[arg(
        value_name = "PROGRAM",
        required_unless_present = "file",
        conflicts_with = "file"
    )]
    program: Option<OsString>,

    /// Read the program text from FILE
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Nested calls beyond this depth are skipped
    #[arg(long, env = "FORWHILE_MAX_CALL_DEPTH", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Read 0 from an empty stack instead of failing
    #[arg(long)]
    unchecked: bool,
}

pub fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let config = Config::default()
        .max_call_depth(args.max_call_depth)
        .check_underflow(!args.unchecked);
    let program = match &args.file {
        Some(path) => match Program::load(path) {
            Ok(program) => program,
            Err(error) => {
                report(&error);
                return ExitCode::FAILURE;
            }
        },
        None => Program::new(&arg_bytes(args.program.as_deref().unwrap_or_default())),
    };

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!(%error, "Ctrl-C handler not installed");
    }

    let mut runtime = Runtime::new(config);
    if let Err(error) = runtime.load(&program) {
        report(&error);
        return ExitCode::FAILURE;
    }
    match main_loop(&mut runtime, interrupted) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

/// Program text exactly as it arrived on the command line.
#[cfg(unix)]
fn arg_bytes(arg: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    arg.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn arg_bytes(arg: &OsStr) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Runs to the end. False when the program stopped on an error.
fn main_loop(runtime: &mut Runtime, interrupted: Arc<AtomicBool>) -> io::Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        match runtime.execute(5000) {
            Event::Stopped => {
                out.write_all(summary(runtime.stack()).as_bytes())?;
                out.flush()?;
                return Ok(true);
            }
            Event::Running => {}
            Event::Print(bytes) => out.write_all(&bytes)?,
            Event::Input => {
                out.flush()?;
                let mut input = stdin.lock();
                let buf = input.fill_buf()?;
                let len = buf.len();
                if len == 0 {
                    runtime.close_input();
                } else {
                    runtime.input(buf);
                    input.consume(len);
                }
            }
            Event::Error(error) => {
                out.flush()?;
                report(&error);
                return Ok(false);
            }
        }
    }
}

fn report(error: &Error) {
    eprintln!("{}", Style::new().bold().paint(error.to_string()));
}

/// What is left on the stack, top first.
fn summary(stack: &Stack<i64>) -> String {
    let mut s = format!("\n{}\n{}:", SEPARATOR, stack.len());
    for val in stack.iter().rev() {
        s.push_str(&format!("{} ", val));
    }
    s.push('\n');
    s
}
