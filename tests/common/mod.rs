#![allow(dead_code)]

use shellscript_rs::{Command, Error, MemoryFiles, compile_str, run_str};

/// Run a script against `files` and return what it printed.
pub fn run(input: &str, files: &MemoryFiles) -> Result<String, Error> {
    let mut out = Vec::new();
    run_str(input, files, &mut out)?;
    Ok(String::from_utf8(out).expect("output is utf-8"))
}

/// Run a script that is expected to fail.
pub fn run_err(input: &str, files: &MemoryFiles) -> Error {
    match run(input, files) {
        Ok(out) => panic!("expected an error, script printed {out:?}"),
        Err(e) => e,
    }
}

/// Resolve a script against an empty file table.
pub fn compile(input: &str) -> Vec<Command> {
    compile_str(input, &MemoryFiles::new())
        .unwrap_or_else(|e| panic!("failed to resolve {input:?}: {e}"))
}

/// The arguments of every `print`, in execution order.
pub fn printed(commands: &[Command]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Print { arg, .. } => Some(arg.as_str()),
            _ => None,
        })
        .collect()
}
