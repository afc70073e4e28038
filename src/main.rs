mod debug_report;

use debug_report::{Report, Sections};
use markov_algo::{Diagnostics, Options, run_file};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MARKOV_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    init_tracing();

    for extra in &config.ignored {
        eprintln!(
            "warning: additional file \"{}\" will be ignored; \"{}\" is used",
            extra.display(),
            config.path.display()
        );
    }

    let options = Options { max_steps: config.max_steps };
    let report = Report::new(config.sections, config.color);
    let mut diagnostics = Diagnostics::new();

    let result = run_file(&config.path, &options, &mut diagnostics);
    report.print_diagnostics(&diagnostics);

    let run = match result {
        Ok(run) => run,
        Err(err) => {
            report.print_error(&err);
            std::process::exit(1);
        }
    };
    report.print_run(&run);

    if let Err(err) = run.final_word() {
        report.print_error(&err);
        std::process::exit(1);
    }
}

struct CliConfig {
    path: PathBuf,
    ignored: Vec<PathBuf>,
    max_steps: Option<usize>,
    sections: Sections,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut path: Option<PathBuf> = None;
    let mut ignored = Vec::new();
    let mut max_steps = None;
    let mut sections = Sections::all();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("markov-algo {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-q" | "--quiet" => sections = Sections::RESULT,
            "--max-steps" => {
                let value = args.next().ok_or_else(|| "error: --max-steps expects a value".to_string())?;
                max_steps = Some(parse_max_steps(&value)?);
            }
            _ if arg.starts_with("--max-steps=") => {
                max_steps = Some(parse_max_steps(arg.trim_start_matches("--max-steps="))?);
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ if path.is_some() => ignored.push(PathBuf::from(arg)),
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    let Some(path) = path else {
        return Err(format!("error: no input file specified\n\n{}", help_text()));
    };

    Ok(CliConfig { path, ignored, max_steps, sections, color })
}

fn parse_max_steps(value: &str) -> Result<usize, String> {
    value.parse().map_err(|_| format!("error: invalid --max-steps '{value}' (expected a non-negative integer)"))
}

/// Logs go to stderr so they never interleave with the report on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "markov-algo {version}

Normal-form (Markov) algorithm interpreter.

Usage:
  markov-algo [OPTIONS] <file>

Program file:
  T = {{ a, b, \\, , \\\\ }}   alphabet; \\, and \\\\ are a literal comma and backslash
  V = ab                  source word
  ab->ba                  rule, applied at the leftmost match
  b->.a                   terminal rule, halts after it fires
  // comment             full-line or trailing comment

Options:
  --max-steps <n>            Stop with an error after n rule applications.
                             Default: unlimited.
  -q, --quiet                Print only the final word.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}=<filter>        Log filter for diagnostics on stderr (e.g. debug, trace).

Exit codes:
  0  The algorithm halted.
  1  The program could not be loaded, or the step limit was reached.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
