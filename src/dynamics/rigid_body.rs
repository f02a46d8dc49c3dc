use crate::dynamics::ParticleSet;
use crate::error::{Result, SimulationError};
use crate::math::{Real, Vector};
use std::ops::{Index, IndexMut};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBodyHandle(pub usize);

/// A group of rigid particles sharing one imposed velocity.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBody {
    pub name: String,
    /// Indices into the particle set.
    pub particles: Vec<usize>,
    /// May be changed between two steps to drive the body.
    pub velocity: Vector<Real>,
}

impl RigidBody {
    pub fn new(name: impl Into<String>, particles: Vec<usize>, velocity: Vector<Real>) -> Self {
        Self {
            name: name.into(),
            particles,
            velocity,
        }
    }
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBodySet {
    bodies: Vec<RigidBody>,
}

impl RigidBodySet {
    pub fn new() -> Self {
        Self { bodies: vec![] }
    }

    pub fn insert(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.bodies.push(body);
        RigidBodyHandle(self.bodies.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn find(&self, name: &str) -> Option<RigidBodyHandle> {
        self.bodies
            .iter()
            .position(|body| body.name == name)
            .map(RigidBodyHandle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RigidBodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (RigidBodyHandle(i), body))
    }

    /// Checks that every body only references existing rigid particles, each
    /// of them owned by a single body.
    pub fn validate(&self, particles: &ParticleSet) -> Result<()> {
        let mut owner = vec![None; particles.len()];

        for (handle, body) in self.iter() {
            for &i in &body.particles {
                let particle = particles.get(i).ok_or_else(|| {
                    SimulationError::InvalidConfig(format!(
                        "rigid body '{}' references the missing particle {}",
                        body.name, i
                    ))
                })?;

                if !particle.is_rigid() {
                    return Err(SimulationError::InvalidConfig(format!(
                        "rigid body '{}' references the deformable particle {}",
                        body.name, i
                    )));
                }

                if let Some(other) = owner[i].replace(handle) {
                    if other != handle {
                        return Err(SimulationError::InvalidConfig(format!(
                            "particle {} belongs to more than one rigid body",
                            i
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl Index<RigidBodyHandle> for RigidBodySet {
    type Output = RigidBody;

    fn index(&self, handle: RigidBodyHandle) -> &RigidBody {
        &self.bodies[handle.0]
    }
}

impl IndexMut<RigidBodyHandle> for RigidBodySet {
    fn index_mut(&mut self, handle: RigidBodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dynamics::models::MaterialParameters;
    use crate::dynamics::Particle;
    use na::{point, vector};

    #[test]
    fn bodies_must_reference_rigid_particles() {
        let material = MaterialParameters::new(1000.0, 1.0e7, 0.3);
        let mut particles = ParticleSet::new();
        let deformable = particles.insert(Particle::deformable(point![0.0, 0.0], 1.0, &material));
        let rigid = particles.insert(Particle::rigid(point![1.0, 0.0], 1.0, &material));

        let mut bodies = RigidBodySet::new();
        let handle = bodies.insert(RigidBody::new("indenter", vec![rigid], vector![0.0, -1.0]));
        assert!(bodies.validate(&particles).is_ok());
        assert_eq!(bodies.find("indenter"), Some(handle));

        bodies[handle].particles.push(deformable);
        assert!(matches!(
            bodies.validate(&particles),
            Err(SimulationError::InvalidConfig(_))
        ));

        bodies[handle].particles = vec![rigid, 7];
        assert!(bodies.validate(&particles).is_err());
    }
}
