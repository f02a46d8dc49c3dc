pub use self::grid_node::{GridNode, GridNodeFlags, NODAL_MASS_EPSILON};
pub use self::particle::{Particle, ParticleRole};
pub use self::particle_set::ParticleSet;
pub use self::phase_field::{ConjugateGradientPhaseField, PhaseFieldSolver};
pub use self::rigid_body::{RigidBody, RigidBodyHandle, RigidBodySet};

mod grid_node;
mod particle;
mod particle_set;
mod phase_field;
mod rigid_body;
pub mod solver;

pub mod models {
    pub use crate::core::dynamics::models::*;
}
