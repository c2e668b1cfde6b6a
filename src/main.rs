//! CLI tool to run and inspect shellscript files.

use std::fs;
use std::io;
use std::process::ExitCode;

use shellscript_rs::{Error, OsFiles};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn usage() -> ExitCode {
    eprintln!("Usage: shellscript [-v] [-C <dir>] <command> [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run     Execute script(s), stopping at the first error");
    eprintln!("  check   Check that script(s) resolve without running them");
    eprintln!("  tokens  Print the token stream of script(s)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v      Log debug output to stderr (RUST_LOG overrides)");
    eprintln!("  -C dir  Resolve file names used by scripts against dir");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  shellscript run hello.ss");
    eprintln!("  shellscript -C out/ run build.ss");
    eprintln!("  shellscript check *.ss");
    ExitCode::from(2)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Run one CLI command over a script's source.
fn process(command: &str, path: &str, source: &str, files: &OsFiles) -> Result<(), Error> {
    match command {
        "run" => shellscript_rs::run_str(source, files, &mut io::stdout().lock()),
        "check" => {
            let commands = shellscript_rs::compile_str(source, files)?;
            eprintln!("{path}: valid ({} command(s))", commands.len());
            Ok(())
        }
        _ => {
            for token in shellscript_rs::scan(source)? {
                println!(
                    "{}:{} {} {:?}",
                    token.span.line, token.span.column, token.kind, token.text
                );
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut verbose = false;
    let mut root = None;

    loop {
        match args.first().map(String::as_str) {
            Some("-v" | "--verbose") => {
                verbose = true;
                args.remove(0);
            }
            Some("-C") => {
                args.remove(0);
                if args.is_empty() {
                    eprintln!("Error: -C requires a directory");
                    return ExitCode::from(2);
                }
                root = Some(args.remove(0));
            }
            _ => break,
        }
    }

    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        return usage();
    }

    let command = args[0].as_str();
    let paths = &args[1..];

    if !matches!(command, "run" | "check" | "tokens") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if paths.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    init_tracing(verbose);
    let files = root.map_or_else(OsFiles::new, OsFiles::rooted);
    let mut had_error = false;

    for path in paths {
        let source = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{path}: {e}");
                if command == "run" {
                    return ExitCode::FAILURE;
                }
                had_error = true;
                continue;
            }
        };

        match process(command, path, &source, &files) {
            Ok(()) => {}
            Err(e) if command == "run" => {
                eprintln!("{path}: {e}");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
