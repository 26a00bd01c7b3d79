use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub loads: Option<PathBuf>,
    pub loads_out: Option<PathBuf>,
    pub cash_flow_out: Option<PathBuf>,
    pub verbose: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
}

pub enum Parsed {
    Run(CliOptions),
    Help,
}

pub fn parse_args() -> Result<Parsed, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<Parsed, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        scenario: None,
        preset: None,
        loads: None,
        loads_out: None,
        cash_flow_out: None,
        verbose: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Parsed::Help),
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--loads" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --loads (expected a CSV file path)")?;
                opts.loads = Some(PathBuf::from(path));
            }
            "--loads-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --loads-out (expected a file path)")?;
                opts.loads_out = Some(PathBuf::from(path));
            }
            "--cashflow-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --cashflow-out (expected a file path)")?;
                opts.cash_flow_out = Some(PathBuf::from(path));
            }
            "--verbose" | "-v" => opts.verbose = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(Parsed::Run(opts))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("plts-sizer: solar PV system sizing calculator");
    eprintln!();
    eprintln!("Usage: plts-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (home_on_grid, cabin_off_grid, home_hybrid)");
    eprintln!("  --loads <path>           Replace the scenario's loads with a CSV load table");
    eprintln!("  --loads-out <path>       Export the load table to CSV");
    eprintln!("  --cashflow-out <path>    Export the cash-flow projection to CSV");
    eprintln!("  --verbose, -v            Log intermediate sizing values");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after evaluation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the home_on_grid preset is used.");
}
