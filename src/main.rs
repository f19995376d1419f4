use chronolex::{parse, parse_verbose};
use std::io::{self, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    // With a display option set, a bare number is an epoch timestamp to
    // render rather than a string to parse.
    if config.directive.is_some() || config.offset.is_some() {
        if let Ok(seconds) = config.input.parse::<f64>() {
            print_seconds(seconds, &config);
            return;
        }
    }

    if config.verbose {
        match parse_verbose(&config.input) {
            Ok(details) => {
                for stage in &details.stages {
                    println!(
                        "stage {:<9} consumed {} token(s), {} remaining",
                        stage.stage, stage.consumed, stage.remaining
                    );
                }
                println!("fields: {:?}", details.fields);
                println!("elapsed: {:?}", details.elapsed);
                print_seconds(details.seconds, &config);
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    match parse(&config.input) {
        Ok(seconds) => print_seconds(seconds, &config),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_seconds(seconds: f64, config: &CliConfig) {
    match &config.directive {
        Some(directive) => {
            println!("{}", chronolex::format(seconds, Some(directive.as_str()), config.offset))
        }
        None if config.offset.is_some() => {
            println!("{}", chronolex::format(seconds, None, config.offset))
        }
        None => {
            if seconds.fract() == 0.0 {
                println!("{}", seconds as i64);
            } else {
                println!("{seconds}");
            }
        }
    }
}

struct CliConfig {
    input: String,
    directive: Option<String>,
    offset: Option<i64>,
    verbose: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut directive: Option<String> = None;
    let mut offset: Option<i64> = None;
    let mut verbose = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("chronolex {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "--format" | "-f" => {
                let value = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
                directive = Some(value);
            }
            "--offset" => {
                let value = args.next().ok_or_else(|| "error: --offset expects a value".to_string())?;
                offset = Some(parse_offset(&value)?);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--format=") => {
                directive = Some(arg.trim_start_matches("--format=").to_string());
            }
            _ if arg.starts_with("--offset=") => {
                offset = Some(parse_offset(arg.trim_start_matches("--offset="))?);
            }
            _ if arg.starts_with('-') && arg.parse::<f64>().is_err() => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };
    let input = input.trim().to_string();

    if input.is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, directive, offset, verbose })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

/// Minutes west of UTC, as a bare signed integer.
fn parse_offset(value: &str) -> Result<i64, String> {
    value.parse::<i64>().map_err(|_| format!("error: invalid --offset '{value}' (expected minutes west of UTC)"))
}

fn help_text() -> String {
    format!(
        "chronolex {version}

Free-form date/time string parser and formatter.

Usage:
  chronolex [OPTIONS] [--] <input...>
  echo '12/23 10:00 EST' | chronolex

By default the input is parsed and printed as seconds since the Unix
epoch. A numeric input given alongside --format is treated as an epoch
timestamp to render instead.

Options:
  -f, --format <directive>   Render the result through a strftime-style
                             directive string instead of printing seconds.
                             Default directive: {default_directive}
  --offset <minutes>         Display offset in minutes west of UTC for
                             --format output (affects %z).
  -v, --verbose              Print per-stage token accounting and the
                             extracted fields before the result.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  CHRONOLEX_DEBUG_STAGES     When set, each pipeline stage prints the
                             tokens it left behind to stderr.

Exit codes:
  0  Success.
  1  Parse error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_directive = chronolex::DEFAULT_DIRECTIVE
    )
}
