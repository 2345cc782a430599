#![allow(dead_code)]
use forwhile::mach::{Event, Runtime};

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 100_000)
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.push_str(&format!("?{}\n", error));
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(bytes) => {
                s.push_str(&String::from_utf8_lossy(bytes));
            }
            Event::Input => {
                s.push_str("<EOF>");
                runtime.close_input();
            }
        }
        prev_running = event == Event::Running;
    }
    s
}

/// Runs `text` and returns what is left on the stack, bottom first.
pub fn values(text: &str) -> Vec<i64> {
    let mut r = Runtime::default();
    r.enter(text);
    assert_eq!(exec(&mut r), "", "program {:?}", text);
    r.values()
}
