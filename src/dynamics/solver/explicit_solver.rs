use crate::core::dynamics::models::FractureParameters;
use crate::dynamics::solver::{MpmHooks, SolverParameters};
use crate::dynamics::{ParticleSet, RigidBodySet};
use crate::error::Result;
use crate::geometry::{Grid, PhaseFieldMesh};
use crate::math::Real;

/// Explicit MPM solver with a phase-field degraded elastic law.
pub struct ExplicitSolver;

impl ExplicitSolver {
    /// Advances the mechanical state by `dt`.
    ///
    /// The phase field stored on `mesh` is only read here. Solving for it and
    /// re-binning the particles is left to the caller.
    pub fn step(
        dt: Real,
        params: &SolverParameters,
        fracture: &FractureParameters,
        grid: &mut Grid,
        mesh: &PhaseFieldMesh,
        particles: &mut ParticleSet,
        rigid_bodies: &RigidBodySet,
        hooks: &mut dyn MpmHooks,
    ) -> Result<()> {
        if particles.is_empty() || dt == 0.0 {
            // Nothing to simulate.
            return Ok(());
        }

        let tt0 = instant::now();

        let t0 = instant::now();
        grid.reset();
        Self::particle_to_grid_scatter(params, grid, particles)?;
        info!("P2G: {}ms", instant::now() - t0);

        let t0 = instant::now();
        Self::grid_update(dt, params.kernel, grid, particles, rigid_bodies);
        hooks.post_grid_update_hook(grid);
        grid.update_velocities();
        info!("Grid update: {}ms", instant::now() - t0);

        let t0 = instant::now();
        Self::grid_to_particle(
            dt,
            params,
            fracture.residual_stiffness,
            grid,
            mesh,
            particles,
        )?;
        Self::rigid_particle_update(dt, rigid_bodies, particles);
        info!("Particle update: {}ms", instant::now() - t0);

        info!(
            ">> Total mechanical step ({}s) computation time: {}ms",
            dt,
            instant::now() - tt0
        );

        Ok(())
    }
}
