use super::ExplicitSolver;
use crate::dynamics::solver::SolverParameters;
use crate::dynamics::ParticleSet;
use crate::error::{Result, SimulationError};
use crate::geometry::{Grid, PhaseFieldMesh};
use crate::math::{Matrix, Real, Vector};
use na::vector;
use rayon::prelude::*;

impl ExplicitSolver {
    /// Gathers the nodal fields back to the deformable particles and updates
    /// their kinematics, stress and fracture history.
    pub(crate) fn grid_to_particle(
        dt: Real,
        params: &SolverParameters,
        residual_stiffness: Real,
        grid: &Grid,
        mesh: &PhaseFieldMesh,
        particles: &mut ParticleSet,
    ) -> Result<()> {
        let kernel = params.kernel;
        let policy = params.out_of_domain_policy;

        particles
            .particles_mut()
            .par_iter_mut()
            .enumerate()
            .filter(|(_, particle)| particle.is_deformable())
            .try_for_each(|(particle_id, particle)| {
                let mut delta_velocity = Vector::zeros();
                let mut delta_position = Vector::zeros();
                let mut delta_def_grad = particle.deformation_gradient_increment;

                grid.for_each_neighbor(kernel, &particle.position, |_, node, weight, gradient| {
                    if node.has_mass() {
                        let coeff = weight / node.mass * dt;
                        delta_velocity += node.force * coeff;
                        delta_position += node.momentum * coeff;
                    }

                    delta_def_grad += node.velocity * gradient.transpose() * dt;
                });

                particle.position += delta_position;
                particle.velocity += delta_velocity;
                particle.deformation_gradient = delta_def_grad * particle.deformation_gradient;
                particle.strain += vector![
                    delta_def_grad.m11 - 1.0,
                    delta_def_grad.m22 - 1.0,
                    delta_def_grad.m12 + delta_def_grad.m21
                ];
                particle.deformation_gradient_increment = Matrix::identity();

                /*
                 * Damage-coupled stress update.
                 */
                particle.phase = mesh.phase_at(particle_id, &particle.position, policy)?;
                let model = particle.elasticity(residual_stiffness);
                particle.stress = model.stress(particle.phase, &particle.strain);
                particle.history = model.update_history(particle.history, &particle.strain);

                let determinant = particle.deformation_gradient.determinant();
                if determinant <= 0.0 {
                    error!(
                        "Particle {} got inverted (det F = {}).",
                        particle_id, determinant
                    );
                    return Err(SimulationError::InvertedParticle {
                        particle: particle_id,
                        determinant,
                    });
                }

                particle.volume = determinant * particle.volume0;
                Ok(())
            })
    }
}
