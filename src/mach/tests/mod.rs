use crate::mach::{Config, Event, Runtime};

mod for_test;
mod skip_test;

fn run(runtime: &mut Runtime) -> String {
    run_cycles(runtime, 100_000)
}

fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
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
                runtime.close_input();
            }
        }
        prev_running = event == Event::Running;
    }
    s
}

fn values_of(text: &str) -> Vec<i64> {
    let mut r = Runtime::default();
    r.enter(text);
    assert_eq!(run(&mut r), "");
    r.values()
}

fn with_depth(max_call_depth: usize) -> Runtime {
    Runtime::new(Config::default().max_call_depth(max_call_depth))
}
