//! # Overhang CLI
//!
//! Runs a beam analysis request read from a JSON file or stdin.
//!
//! ```text
//! beam_cli [--json|--csv|--report] [--resolution N] [--demo] [FILE]
//! ```
//!
//! Set `RUST_LOG=debug` to see the engine's intermediate values.

mod demo;
mod report;

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use beam_core::api::{handle_request, parse_request, validate_request, BeamRequest, ResponseEnvelope};
use beam_core::calculations::AnalysisSettings;
use beam_core::{CalcError, CalcResult};
use log::info;

const USAGE: &str = "Usage: beam_cli [--json|--csv|--report] [--resolution N] [--demo] [FILE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Report,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq)]
struct Options {
    format: OutputFormat,
    resolution: Option<usize>,
    demo: bool,
    file: Option<PathBuf>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options, String> {
    let mut options = Options {
        format: OutputFormat::Report,
        resolution: None,
        demo: false,
        file: None,
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => options.format = OutputFormat::Json,
            "--csv" => options.format = OutputFormat::Csv,
            "--report" => options.format = OutputFormat::Report,
            "--demo" => options.demo = true,
            "--resolution" => {
                let value = args.next().ok_or("--resolution needs a value")?;
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid resolution '{}'", value))?;
                options.resolution = Some(n);
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path => {
                if options.file.is_some() {
                    return Err("Only one input file may be given".to_string());
                }
                options.file = Some(PathBuf::from(path));
            }
        }
    }
    Ok(options)
}

fn read_input(file: Option<&PathBuf>) -> CalcResult<String> {
    let read = match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).map(|_| input)
        }
    };
    read.map_err(|e| {
        let source = file.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
        CalcError::invalid_input("input", source, e.to_string())
    })
}

fn emit(format: OutputFormat, title: &str, request: &BeamRequest, settings: &AnalysisSettings) -> CalcResult<()> {
    let response = handle_request(request, settings)?;
    match format {
        OutputFormat::Report => {
            let recommendations = validate_request(request).recommendations;
            println!("{}", report::render_report(title, request, &response, &recommendations));
        }
        OutputFormat::Json => {
            let timestamp = chrono::Local::now().to_rfc3339();
            let envelope = ResponseEnvelope::success(request, response, timestamp);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        OutputFormat::Csv => print!("{}", report::render_csv(&response)),
    }
    Ok(())
}

fn run(options: &Options) -> CalcResult<()> {
    let settings = match options.resolution {
        Some(n) => AnalysisSettings::default().with_resolution(n),
        None => AnalysisSettings::default(),
    };

    if options.demo {
        for (title, mut request) in demo::scenarios() {
            info!("demo: {}", title);
            request.resolution = options.resolution;
            if options.format == OutputFormat::Csv {
                println!("# {}", title);
            }
            emit(options.format, title, &request, &settings)?;
        }
        return Ok(());
    }

    let input = read_input(options.file.as_ref())?;
    let mut request = parse_request(&input)?;
    if options.resolution.is_some() {
        request.resolution = options.resolution;
    }
    emit(options.format, "BEAM ANALYSIS RESULTS", &request, &settings)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(args(&[])).unwrap();
        assert_eq!(options.format, OutputFormat::Report);
        assert_eq!(options.resolution, None);
        assert!(!options.demo);
        assert!(options.file.is_none());
    }

    #[test]
    fn test_flags_and_file() {
        let options = parse_args(args(&["--csv", "--resolution", "250", "beam.json"])).unwrap();
        assert_eq!(options.format, OutputFormat::Csv);
        assert_eq!(options.resolution, Some(250));
        assert_eq!(options.file, Some(PathBuf::from("beam.json")));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(args(&["--resolution"])).is_err());
        assert!(parse_args(args(&["--resolution", "many"])).is_err());
        assert!(parse_args(args(&["--verbose"])).is_err());
        assert!(parse_args(args(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_missing_file_is_an_input_error() {
        let err = read_input(Some(&PathBuf::from("/nonexistent/beam.json"))).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
