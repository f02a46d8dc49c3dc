use super::ExplicitSolver;
use crate::core::dynamics::solver::Kernel;
use crate::dynamics::{ParticleSet, RigidBodySet};
use crate::geometry::Grid;
use crate::math::Real;
use rayon::prelude::*;

impl ExplicitSolver {
    /// Integrates the nodal momentum and applies the boundary conditions.
    ///
    /// Fixed degrees of freedom are enforced first, then the nodes under each
    /// rigid body get the momentum of the body's imposed velocity.
    pub(crate) fn grid_update(
        dt: Real,
        kernel: Kernel,
        grid: &mut Grid,
        particles: &ParticleSet,
        rigid_bodies: &RigidBodySet,
    ) {
        grid.nodes_mut().par_iter_mut().for_each(|node| {
            node.momentum += node.force * dt;
            node.apply_fixed_dofs();
        });

        for (_, body) in rigid_bodies.iter() {
            let support = grid.support_nodes(
                kernel,
                body.particles.iter().map(|i| &particles[*i].position),
            );

            for node_id in support {
                let node = grid.node_mut(node_id);
                node.momentum = body.velocity * node.mass;
                node.force.y = 0.0;
            }
        }
    }
}
