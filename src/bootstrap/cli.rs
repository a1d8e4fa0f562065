//! Command-line arguments.
//!
//! Deliberately tiny: a config path and a verbosity counter.

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Log level forced by `-v` flags; beats config and `RUST_LOG`.
    pub log_level: Option<&'static str>,
    pub config_path: Option<String>,
    pub show_help: bool,
}

pub const USAGE: &str = "\
Usage: recipe-api [OPTIONS]

Options:
  -h, --help                 Print help
  -f, --config <PATH>        Path to configuration file (default: config/default.toml)
  -v, -vv, -vvv, -vvvv       Increase logging verbosity";

/// Parse arguments (excluding the program name).
pub fn parse<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut show_help = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => show_help = true,
            "-f" | "--config" => match iter.next() {
                Some(path) => config_path = Some(path),
                None => return Err("-f/--config requires a path argument".into()),
            },
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }

    // -v warn, -vv info, -vvv debug, -vvvv and beyond trace.
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    Ok(CliArgs { log_level, config_path, show_help })
}
