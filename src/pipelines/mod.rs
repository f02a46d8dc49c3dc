pub use self::mpm_pipeline::MpmPipeline;
pub use self::mpm_world::MpmWorld;
pub use self::run_config::{BodyConfig, FixedRegion, GridConfig, RunConfig};
pub use self::snapshot::SnapshotWriter;

mod mpm_pipeline;
mod mpm_world;
mod run_config;
mod snapshot;
