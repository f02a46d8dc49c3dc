use crate::dynamics::{ParticleRole, ParticleSet, RigidBody, RigidBodySet};
use crate::error::{Result, SimulationError};
use crate::geometry::{Grid, PhaseFieldMesh};
use crate::pipelines::RunConfig;
use crate::sampling;

/// All the state advanced by the pipeline.
pub struct MpmWorld {
    pub grid: Grid,
    pub mesh: PhaseFieldMesh,
    pub particles: ParticleSet,
    pub rigid_bodies: RigidBodySet,
}

impl MpmWorld {
    pub fn new(grid: Grid, mesh: PhaseFieldMesh) -> Self {
        Self {
            grid,
            mesh,
            particles: ParticleSet::new(),
            rigid_bodies: RigidBodySet::new(),
        }
    }

    /// Builds the grid, mesh and particles described by the configuration.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        config.validate()?;

        let mut grid = Grid::new(
            config.grid.origin,
            config.grid.extents,
            config.grid.num_cells,
        )?;
        let mesh = PhaseFieldMesh::new(
            config.mesh.origin,
            config.mesh.extents,
            config.mesh.num_cells,
        )?;

        for region in &config.fixed_regions {
            let num_fixed =
                grid.fix_nodes_in_aabb(&region.mins, &region.maxs, region.fix_x, region.fix_y);
            if num_fixed == 0 {
                warn!(
                    "The fixed region [{}, {}] does not contain any grid node.",
                    region.mins, region.maxs
                );
            }
        }

        let mut world = Self::new(grid, mesh);
        let cell_size = world.grid.cell_size();

        for body in &config.bodies {
            let material = match body.role {
                ParticleRole::Deformable => &config.deformable_material,
                ParticleRole::Rigid => &config.rigid_material,
            };
            let mut particles = sampling::sample_domain(
                &body.domain,
                &cell_size,
                config.particles_per_cell,
                body.role,
                material,
            );

            if particles.is_empty() {
                return Err(SimulationError::InvalidConfig(format!(
                    "the body '{}' does not contain any particle",
                    body.name
                )));
            }

            particles.iter_mut().for_each(|p| p.velocity = body.velocity);
            let num_particles = particles.len();
            let range = world.particles.insert_batch(particles);

            if body.role == ParticleRole::Rigid {
                world
                    .rigid_bodies
                    .insert(RigidBody::new(body.name.clone(), range.collect(), body.velocity));
            }

            info!(
                "Body '{}': {} {:?} particles.",
                body.name, num_particles, body.role
            );
        }

        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world() {
        let config = RunConfig::default();
        let world = MpmWorld::from_config(&config).unwrap();

        assert_eq!(world.rigid_bodies.len(), 1);
        let handle = world.rigid_bodies.find("indenter").unwrap();
        let indenter = &world.rigid_bodies[handle];
        assert!(indenter
            .particles
            .iter()
            .all(|i| world.particles[*i].is_rigid()));
        assert_eq!(
            world.particles.num_deformable() + indenter.particles.len(),
            world.particles.len()
        );
        assert!(world.rigid_bodies.validate(&world.particles).is_ok());
        assert!(world.grid.nodes().iter().any(|n| n.fixed_x()));
        assert_eq!(world.grid.nodes().iter().filter(|n| n.fixed_y()).count(), 6);
    }
}
