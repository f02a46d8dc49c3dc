extern crate nalgebra as na;
#[macro_use]
extern crate log;

use anyhow::Context;
use fissure2d::dynamics::ConjugateGradientPhaseField;
use fissure2d::pipelines::{MpmPipeline, MpmWorld, RunConfig};
use std::path::Path;

mod helper;

const USAGE: &str = "usage: examples2d [CONFIG.json [OUTPUT_DIR]] | --default-config";

fn load_config(path: &Path) -> anyhow::Result<RunConfig> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open the configuration file {:?}", path))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("failed to parse the configuration file {:?}", path))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.first().map(String::as_str) {
        Some("--default-config") => {
            println!("{}", serde_json::to_string_pretty(&RunConfig::default())?);
            return Ok(());
        }
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(path) => load_config(Path::new(path))?,
        None => {
            info!("No configuration given, running the notched beam scenario.");
            RunConfig::default()
        }
    };
    let output_dir = args.get(1).map(String::as_str).unwrap_or("output");

    let mut world = MpmWorld::from_config(&config).context("failed to set up the simulation")?;
    let mut phase_field = ConjugateGradientPhaseField::new(config.solver.phase_field);
    let mut writer = helper::CsvSnapshotWriter::new(output_dir)
        .with_context(|| format!("failed to create the output directory {}", output_dir))?;

    let mut pipeline = MpmPipeline::new();
    pipeline
        .run(&config, &mut world, &mut phase_field, &mut (), &mut writer)
        .context("the simulation failed")?;
    info!(
        "Simulation finished after {} steps (t = {}s).",
        pipeline.step_id(),
        pipeline.time()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_json_round_trip() {
        let config = RunConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_configs_use_the_defaults() {
        let parsed: RunConfig =
            serde_json::from_str(r#"{ "end_time": 0.5, "output_interval": 10 }"#).unwrap();
        let expected = RunConfig {
            end_time: 0.5,
            output_interval: 10,
            ..RunConfig::default()
        };
        assert_eq!(parsed, expected);
    }
}
