use super::ExplicitSolver;
use crate::dynamics::solver::SolverParameters;
use crate::dynamics::ParticleSet;
use crate::error::{Result, SimulationError};
use crate::geometry::Grid;
use crate::math::{Real, Vector};
use na::vector;
use rayon::prelude::*;

struct NodeContribution {
    node: usize,
    mass: Real,
    momentum: Vector<Real>,
    force: Vector<Real>,
}

impl ExplicitSolver {
    /// Scatters the mass, momentum and internal force of every deformable particle.
    ///
    /// Contributions are computed in parallel but added to the grid in particle
    /// order, so the result does not depend on the thread scheduling.
    pub(crate) fn particle_to_grid_scatter(
        params: &SolverParameters,
        grid: &mut Grid,
        particles: &ParticleSet,
    ) -> Result<()> {
        let kernel = params.kernel;
        let gravity = params.gravity;
        let grid_ref = &*grid;

        let contributions: Vec<Vec<NodeContribution>> = particles
            .particles()
            .par_iter()
            .enumerate()
            .filter(|(_, particle)| particle.is_deformable())
            .map(|(particle_id, particle)| {
                if !grid_ref.contains(&particle.position) {
                    error!(
                        "Particle {} at {} is outside of the background grid.",
                        particle_id, particle.position
                    );
                    return Err(SimulationError::ParticleOutsideGrid {
                        particle: particle_id,
                        position: particle.position,
                    });
                }

                let momentum = particle.momentum();
                let stress = particle.stress;
                let mut result = Vec::with_capacity(9);

                grid_ref.for_each_neighbor(
                    kernel,
                    &particle.position,
                    |node, _, weight, gradient| {
                        // Divergence of the stress, [σxx σxy; σxy σyy] * ∇w.
                        let internal_force = -particle.volume
                            * vector![
                                stress.x * gradient.x + stress.z * gradient.y,
                                stress.z * gradient.x + stress.y * gradient.y
                            ];

                        result.push(NodeContribution {
                            node,
                            mass: weight * particle.mass,
                            momentum: momentum * weight,
                            force: internal_force + gravity * (weight * particle.mass),
                        });
                    },
                );

                Ok(result)
            })
            .collect::<Result<_>>()?;

        for contribution in contributions.iter().flatten() {
            let node = grid.node_mut(contribution.node);
            node.mass += contribution.mass;
            node.momentum += contribution.momentum;
            node.force += contribution.force;
        }

        Ok(())
    }
}
