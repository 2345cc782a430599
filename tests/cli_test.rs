use predicates::prelude::*;
use std::error::Error;
use std::fs;
use assert_cmd::Command;
use tempfile::tempdir;

#[test]
fn prints_remaining_stack_top_first() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.arg("1 2 3 +");
    cmd.assert()
        .success()
        .stdout("\n------------------\n2:5 1 \n");
    Ok(())
}

#[test]
fn console_output_comes_first() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.arg("\"Hi\"(.#.1)");
    cmd.assert()
        .success()
        .stdout("iH\n------------------\n0:\n");
    Ok(())
}

#[test]
fn runs_program_from_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("sum.fw");
    fs::write(&path, "\\ sum of 1..4\n0 4(:3,+')\n")?;

    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.arg("-f").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("1:10 \n"));
    Ok(())
}

#[test]
fn reads_console_input() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.arg("_ _").write_stdin("A");
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("2:-1 65 \n"));
    Ok(())
}

#[test]
fn limits_call_depth() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.args(["--max-call-depth", "2", "{1 0@?}:0$?"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("2:1 1 \n"));
    Ok(())
}

#[test]
fn unchecked_mode_reads_zero() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.args(["--unchecked", "+"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("1:0 \n"));
    Ok(())
}

#[test]
fn reports_fatal_errors() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.arg("1[)");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unexpected ')' in '[]' block"));
    Ok(())
}

#[test]
fn reports_missing_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.arg("-f").arg(dir.path().join("missing.fw"));
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("CANNOT LOAD SOURCE"));
    Ok(())
}

#[test]
fn requires_a_program() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.assert().failure().code(2);

    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.args(["-f", "a.fw", "1"]);
    cmd.assert().failure().code(2);
    Ok(())
}

#[cfg(unix)]
#[test]
fn loads_argument_bytes_verbatim() -> Result<(), Box<dyn Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    let mut cmd = Command::cargo_bin("forwhile")?;
    cmd.arg(OsStr::from_bytes(b"1 2+\"\xff\""));
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("3:1 255 3 \n"));
    Ok(())
}
