mod render;
mod script;
mod session;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use hourglass_input::logging::{init_logging, LoggingConfig};

use script::parse_script;
use session::Session;

fn main() -> anyhow::Result<()> {
    let script_path = std::env::args().nth(1);

    init_logging(LoggingConfig::default().timestamps(script_path.is_none()));

    match script_path {
        Some(path) => run_script(&path),
        None => run_interactive(),
    }
}

/// Runs a whole script file; the first bad line aborts the run.
fn run_script(path: &str) -> anyhow::Result<()> {
    let src = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let statements = parse_script(&src).with_context(|| format!("parsing {path}"))?;
    log::info!("{path}: {} statements", statements.len());

    let stdout = io::stdout();
    let mut session = Session::new(stdout.lock());
    session.run(&statements).with_context(|| format!("running {path}"))?;
    Ok(())
}

/// Reads commands from stdin one line at a time. Mistakes are reported and
/// the session carries on.
fn run_interactive() -> anyhow::Result<()> {
    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          HOURGLASS STUDIO v0.1         ║");
    println!("  ║   duration input  ·  hours + minutes   ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  Start with: input hours+minutes       ║");
    println!("  ║  Ctrl-D to leave.                      ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let mut session = Session::new(io::stdout());
    let stdin = io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        let result = parse_script(&line).map_err(anyhow::Error::from).and_then(|statements| {
            statements.iter().try_for_each(|stmt| session.execute(stmt))
        });
        if let Err(err) = result {
            // Positions inside a single line always report line 1.
            eprintln!("  [line {}] {err:#}", index + 1);
        }
        io::stdout().flush().context("flushing stdout")?;
    }
    Ok(())
}
