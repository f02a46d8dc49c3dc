use crate::dynamics::ParticleSet;
use crate::error::Result;
use crate::geometry::PhaseFieldMesh;
use crate::math::Real;

/// Receives the simulation state every few steps.
pub trait SnapshotWriter {
    fn write_snapshot(
        &mut self,
        step_id: usize,
        time: Real,
        particles: &ParticleSet,
        mesh: &PhaseFieldMesh,
    ) -> Result<()>;
}

impl SnapshotWriter for () {
    fn write_snapshot(
        &mut self,
        _: usize,
        _: Real,
        _: &ParticleSet,
        _: &PhaseFieldMesh,
    ) -> Result<()> {
        Ok(())
    }
}
