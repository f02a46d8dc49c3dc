use super::ExplicitSolver;
use crate::dynamics::{ParticleSet, RigidBodySet};
use crate::math::Real;

impl ExplicitSolver {
    /// Moves the rigid particles with the velocity imposed on their body.
    pub(crate) fn rigid_particle_update(
        dt: Real,
        rigid_bodies: &RigidBodySet,
        particles: &mut ParticleSet,
    ) {
        for (_, body) in rigid_bodies.iter() {
            for &i in &body.particles {
                let particle = &mut particles[i];
                particle.velocity = body.velocity;
                particle.position += body.velocity * dt;
            }
        }
    }
}
