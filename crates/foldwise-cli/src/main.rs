use anyhow::Result;
use log::LevelFilter;

use foldwise_cli::cli::build_cli;
use foldwise_cli::evaluate::{run_evaluation, RunConfig};

fn main() -> Result<()> {
    let env = env_logger::Env::default()
        .filter_or("FOLDWISE_LOG", "error,foldwise=info");
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env)
        .init();

    let matches = build_cli().get_matches();
    let config = RunConfig::from_arguments(&matches)?;

    if matches.get_one::<std::path::PathBuf>("config").is_none() {
        log::debug!(
            "Run config:\n{}",
            serde_json::to_string_pretty(&config).unwrap_or_default()
        );
    }

    let report = match run_evaluation(&config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
