//! PLTS sizing calculator entry point: CLI wiring and config-driven evaluation.

mod cli;

use std::process;

use plts_sizer::config::ScenarioConfig;
use plts_sizer::io::export::{export_cash_flow_csv, export_loads_csv};
use plts_sizer::io::import::import_loads;
use plts_sizer::sizing::evaluate;
use plts_sizer::sizing::report::LoadTable;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::{CliOptions, Parsed};

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install tracing subscriber: {e}");
    }
}

fn load_scenario(cli: &CliOptions) -> Result<ScenarioConfig, String> {
    // --scenario takes priority, then --preset, then the default preset
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else {
        let name = cli.preset.as_deref().unwrap_or("home_on_grid");
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    };

    if let Some(ref path) = cli.loads {
        let loads = import_loads(path).map_err(|e| e.to_string())?;
        scenario.loads = loads.iter().cloned().collect();
    }

    Ok(scenario)
}

fn run(cli: &CliOptions) -> Result<(), String> {
    let scenario = load_scenario(cli)?;

    let params = scenario.to_parameters().map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    let loads = scenario.load_list();
    let dropped = scenario.loads.len() - loads.len();
    if dropped > 0 {
        info!(dropped, "ignored loads with non-positive power or hours");
    }

    let evaluation = evaluate(&loads, &params).map_err(|e| e.to_string())?;

    if !loads.is_empty() {
        println!("{}\n", LoadTable(&loads));
    }
    println!("{evaluation}");

    if let Some(ref path) = cli.loads_out {
        export_loads_csv(&loads, path)
            .map_err(|e| format!("failed to write load table: {e}"))?;
        info!(path = %path.display(), "load table written");
    }

    if let Some(ref path) = cli.cash_flow_out {
        match evaluation.sizing.as_ref().and_then(|s| s.cash_flow.as_ref()) {
            Some(cf) => {
                export_cash_flow_csv(cf, path)
                    .map_err(|e| format!("failed to write cash flow: {e}"))?;
                info!(path = %path.display(), "cash flow written");
            }
            None => info!("no cash flow for this system, skipping export"),
        }
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(plts_sizer::api::AppState::new(scenario));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| format!("failed to create tokio runtime: {e}"))?;
        rt.block_on(plts_sizer::api::serve(state, addr))
            .map_err(|e| format!("server error: {e}"))?;
    }

    Ok(())
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(Parsed::Run(opts)) => opts,
        Ok(Parsed::Help) => {
            cli::print_usage();
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{e}");
        process::exit(1);
    }
}
