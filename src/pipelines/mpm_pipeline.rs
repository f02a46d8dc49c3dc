use crate::core::dynamics::models::FractureParameters;
use crate::dynamics::solver::{ExplicitSolver, MpmHooks, SolverParameters};
use crate::dynamics::PhaseFieldSolver;
use crate::error::Result;
use crate::math::Real;
use crate::pipelines::{MpmWorld, RunConfig, SnapshotWriter};

/// Alternates the phase-field solve with the explicit mechanical update.
pub struct MpmPipeline {
    first_step: bool,
    step_id: usize,
    time: Real,
}

impl MpmPipeline {
    pub fn new() -> Self {
        MpmPipeline {
            first_step: true,
            step_id: 0,
            time: 0.0,
        }
    }

    /// Number of steps performed so far.
    pub fn step_id(&self) -> usize {
        self.step_id
    }

    /// Simulated time so far.
    pub fn time(&self) -> Real {
        self.time
    }

    /// Number of fixed steps of length `dt` needed to reach `end_time`.
    ///
    /// A ratio within roundoff of an integer is not rounded up to an extra step.
    pub fn num_steps(end_time: Real, dt: Real) -> usize {
        if end_time <= 0.0 {
            return 0;
        }

        let n = end_time / dt;
        let rounded = n.round();

        if (n - rounded).abs() <= 1.0e-9 * n.max(1.0) {
            rounded as usize
        } else {
            n.ceil() as usize
        }
    }

    pub fn step(
        &mut self,
        dt: Real,
        params: &SolverParameters,
        fracture: &FractureParameters,
        world: &mut MpmWorld,
        phase_field_solver: &mut dyn PhaseFieldSolver,
        hooks: &mut dyn MpmHooks,
    ) -> Result<()> {
        if self.first_step {
            world.rigid_bodies.validate(&world.particles)?;
            world
                .mesh
                .update(&world.particles, params.out_of_domain_policy)?;
            self.first_step = false;
        }

        let t0 = instant::now();
        phase_field_solver.solve(
            &mut world.mesh,
            &world.particles,
            fracture.length_scale,
            fracture.fracture_energy,
        )?;
        info!("Phase field: {}ms", instant::now() - t0);

        ExplicitSolver::step(
            dt,
            params,
            fracture,
            &mut world.grid,
            &world.mesh,
            &mut world.particles,
            &world.rigid_bodies,
            hooks,
        )?;

        let t0 = instant::now();
        world
            .mesh
            .update(&world.particles, params.out_of_domain_policy)?;
        info!("Mesh re-binning: {}ms", instant::now() - t0);

        self.step_id += 1;
        self.time += dt;
        Ok(())
    }

    /// Runs the configured simulation until its end time.
    ///
    /// A snapshot is written before the first step, then every
    /// `config.output_interval` steps, and once more at the end time if the
    /// last step is not a multiple of the interval.
    pub fn run(
        &mut self,
        config: &RunConfig,
        world: &mut MpmWorld,
        phase_field_solver: &mut dyn PhaseFieldSolver,
        hooks: &mut dyn MpmHooks,
        writer: &mut dyn SnapshotWriter,
    ) -> Result<()> {
        config.validate()?;
        let dt = ExplicitSolver::fixed_timestep_length(
            &config.solver,
            &config.deformable_material,
            &world.grid,
        )?;
        let num_steps = Self::num_steps(config.end_time, dt);
        info!(
            "Running {} steps of {}s ({} particles).",
            num_steps,
            dt,
            world.particles.len()
        );

        self.write_snapshot(dt, config, world, writer)?;

        for _ in 0..num_steps {
            self.step(
                dt,
                &config.solver,
                &config.fracture,
                world,
                phase_field_solver,
                hooks,
            )?;

            if self.step_id % config.output_interval == 0 {
                info!("Step {}/{}, t = {}s", self.step_id, num_steps, self.time);
                self.write_snapshot(dt, config, world, writer)?;
            }
        }

        // Always keep the state reached at the end time.
        if self.step_id % config.output_interval != 0 {
            self.write_snapshot(dt, config, world, writer)?;
        }

        Ok(())
    }

    fn write_snapshot(
        &self,
        dt: Real,
        config: &RunConfig,
        world: &MpmWorld,
        writer: &mut dyn SnapshotWriter,
    ) -> Result<()> {
        let bound =
            ExplicitSolver::stable_timestep_bound(&config.solver, &world.grid, &world.particles);
        if dt > bound {
            warn!(
                "Step {}: the timestep {} exceeds the stability bound {}.",
                self.step_id, dt, bound
            );
        }

        writer.write_snapshot(self.step_id, self.time, &world.particles, &world.mesh)
    }
}

impl Default for MpmPipeline {
    fn default() -> Self {
        Self::new()
    }
}
