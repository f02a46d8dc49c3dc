use crate::core::dynamics::solver::OutOfDomainPolicy;
use crate::dynamics::ParticleSet;
use crate::error::{Result, SimulationError};
use crate::math::{Point, Real, Vector};
use na::vector;

/// Structured mesh of bilinear quadrilaterals carrying the nodal phase field.
///
/// Element `(i, j)` spans the nodes `(i, j)`, `(i + 1, j)`, `(i + 1, j + 1)`
/// and `(i, j + 1)`, in that order. The mesh also keeps track of which
/// deformable particles lie inside of each element.
#[derive(Clone, Debug)]
pub struct PhaseFieldMesh {
    origin: Point<Real>,
    cell_size: Vector<Real>,
    num_cells: [usize; 2],
    /// Nodal phase field, `1` for intact material and `0` for broken material.
    pub phase: Vec<Real>,
    element_particles: Vec<Vec<usize>>,
    particle_elements: Vec<Option<usize>>,
}

impl PhaseFieldMesh {
    pub fn new(origin: Point<Real>, extents: Vector<Real>, num_cells: [usize; 2]) -> Result<Self> {
        if num_cells[0] == 0 || num_cells[1] == 0 || extents.x <= 0.0 || extents.y <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "invalid phase-field mesh: extents {}, {:?} cells",
                extents, num_cells
            )));
        }

        let cell_size = vector![
            extents.x / num_cells[0] as Real,
            extents.y / num_cells[1] as Real
        ];
        let num_nodes = (num_cells[0] + 1) * (num_cells[1] + 1);
        let num_elements = num_cells[0] * num_cells[1];

        Ok(Self {
            origin,
            cell_size,
            num_cells,
            phase: vec![1.0; num_nodes],
            element_particles: vec![vec![]; num_elements],
            particle_elements: vec![],
        })
    }

    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    pub fn cell_size(&self) -> Vector<Real> {
        self.cell_size
    }

    pub fn num_cells(&self) -> [usize; 2] {
        self.num_cells
    }

    pub fn num_nodes(&self) -> usize {
        self.phase.len()
    }

    pub fn num_elements(&self) -> usize {
        self.element_particles.len()
    }

    #[inline]
    pub fn node_index(&self, i: usize, j: usize) -> usize {
        j * (self.num_cells[0] + 1) + i
    }

    pub fn node_position(&self, index: usize) -> Point<Real> {
        let nx = self.num_cells[0] + 1;
        let (i, j) = (index % nx, index / nx);
        self.origin + vector![i as Real * self.cell_size.x, j as Real * self.cell_size.y]
    }

    pub fn element_nodes(&self, element: usize) -> [usize; 4] {
        let (i, j) = (element % self.num_cells[0], element / self.num_cells[0]);
        [
            self.node_index(i, j),
            self.node_index(i + 1, j),
            self.node_index(i + 1, j + 1),
            self.node_index(i, j + 1),
        ]
    }

    /// Particles binned into the element by the last call to [`Self::update`].
    pub fn element_particles(&self, element: usize) -> &[usize] {
        &self.element_particles[element]
    }

    pub fn particle_element(&self, particle: usize) -> Option<usize> {
        self.particle_elements.get(particle).copied().flatten()
    }

    fn element_coords(&self, point: &Point<Real>) -> [i64; 2] {
        let local = (point - self.origin).component_div(&self.cell_size);
        [local.x.floor() as i64, local.y.floor() as i64]
    }

    /// The element containing the point. Points on the upper boundary of the
    /// mesh belong to the last row or column of elements.
    pub fn element_containing(&self, point: &Point<Real>) -> Option<usize> {
        let local = point - self.origin;
        let extents = self.cell_size.component_mul(&vector![
            self.num_cells[0] as Real,
            self.num_cells[1] as Real
        ]);

        if local.x < 0.0 || local.y < 0.0 || local.x > extents.x || local.y > extents.y {
            return None;
        }

        let [i, j] = self.element_coords(point);
        let i = (i as usize).min(self.num_cells[0] - 1);
        let j = (j as usize).min(self.num_cells[1] - 1);
        Some(j * self.num_cells[0] + i)
    }

    pub fn nearest_element(&self, point: &Point<Real>) -> usize {
        let [i, j] = self.element_coords(point);
        let i = i.clamp(0, self.num_cells[0] as i64 - 1) as usize;
        let j = j.clamp(0, self.num_cells[1] as i64 - 1) as usize;
        j * self.num_cells[0] + i
    }

    /// Finds the element of a particle, applying `policy` if it left the mesh.
    pub fn locate(
        &self,
        particle: usize,
        point: &Point<Real>,
        policy: OutOfDomainPolicy,
    ) -> Result<usize> {
        if let Some(element) = self.element_containing(point) {
            return Ok(element);
        }

        match policy {
            OutOfDomainPolicy::Fail => {
                error!(
                    "Particle {} at {} is outside of the phase-field mesh.",
                    particle, point
                );
                Err(SimulationError::ParticleOutsideMesh {
                    particle,
                    position: *point,
                })
            }
            OutOfDomainPolicy::Clamp => {
                warn!(
                    "Particle {} at {} left the phase-field mesh, using the closest element.",
                    particle, point
                );
                Ok(self.nearest_element(point))
            }
        }
    }

    /// Coordinates of the point relative to the element, in `[0, 1]²`.
    ///
    /// Points outside of the element are projected onto it.
    fn reference_coords(&self, point: &Point<Real>, element: usize) -> Vector<Real> {
        let corner = self.node_position(self.element_nodes(element)[0]);
        (point - corner)
            .component_div(&self.cell_size)
            .map(|e| e.clamp(0.0, 1.0))
    }

    pub fn shape_values(&self, point: &Point<Real>, element: usize) -> [Real; 4] {
        let xi = self.reference_coords(point, element);
        [
            (1.0 - xi.x) * (1.0 - xi.y),
            xi.x * (1.0 - xi.y),
            xi.x * xi.y,
            (1.0 - xi.x) * xi.y,
        ]
    }

    pub fn shape_gradients(&self, point: &Point<Real>, element: usize) -> [Vector<Real>; 4] {
        let xi = self.reference_coords(point, element);
        let (hx, hy) = (self.cell_size.x, self.cell_size.y);
        [
            vector![-(1.0 - xi.y) / hx, -(1.0 - xi.x) / hy],
            vector![(1.0 - xi.y) / hx, -xi.x / hy],
            vector![xi.y / hx, xi.x / hy],
            vector![-xi.y / hx, (1.0 - xi.x) / hy],
        ]
    }

    /// Indices of the nodes of the element containing the point.
    pub fn query_neighbors(&self, point: &Point<Real>) -> Option<[usize; 4]> {
        self.element_containing(point)
            .map(|element| self.element_nodes(element))
    }

    fn interpolate_in_element(&self, point: &Point<Real>, element: usize) -> Real {
        let nodes = self.element_nodes(element);
        let weights = self.shape_values(point, element);
        let value: Real = nodes
            .iter()
            .zip(weights.iter())
            .map(|(node, w)| self.phase[*node] * w)
            .sum();
        value.clamp(0.0, 1.0)
    }

    /// Phase field value at the point, if it is inside of the mesh.
    pub fn interpolate(&self, point: &Point<Real>) -> Option<Real> {
        self.element_containing(point)
            .map(|element| self.interpolate_in_element(point, element))
    }

    /// Phase field value seen by a particle, applying `policy` if it left the mesh.
    pub fn phase_at(
        &self,
        particle: usize,
        point: &Point<Real>,
        policy: OutOfDomainPolicy,
    ) -> Result<Real> {
        let element = self.locate(particle, point, policy)?;
        Ok(self.interpolate_in_element(point, element))
    }

    /// Re-associates every deformable particle to its enclosing element.
    pub fn update(&mut self, particles: &ParticleSet, policy: OutOfDomainPolicy) -> Result<()> {
        self.element_particles.iter_mut().for_each(|bin| bin.clear());
        self.particle_elements.clear();
        self.particle_elements.resize(particles.len(), None);

        for (i, particle) in particles.iter().enumerate() {
            if particle.is_deformable() {
                let element = self.locate(i, &particle.position, policy)?;
                self.element_particles[element].push(i);
                self.particle_elements[i] = Some(element);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dynamics::models::MaterialParameters;
    use crate::dynamics::Particle;
    use na::point;

    fn mesh() -> PhaseFieldMesh {
        PhaseFieldMesh::new(point![0.0, 0.0], vector![2.0, 1.0], [4, 2]).unwrap()
    }

    #[test]
    fn shape_functions_partition_unity() {
        let mesh = mesh();
        let point = point![1.3, 0.7];
        let element = mesh.element_containing(&point).unwrap();
        let values = mesh.shape_values(&point, element);
        let gradients = mesh.shape_gradients(&point, element);

        assert!((values.iter().sum::<Real>() - 1.0).abs() < 1.0e-12);
        let grad_sum: Vector<Real> = gradients.iter().sum();
        assert!(grad_sum.norm() < 1.0e-12);
        assert_eq!(mesh.query_neighbors(&point), Some(mesh.element_nodes(element)));
    }

    #[test]
    fn interpolation_is_bilinear() {
        let mut mesh = mesh();
        for i in 0..mesh.num_nodes() {
            let pos = mesh.node_position(i);
            mesh.phase[i] = 0.25 * pos.x + 0.5 * pos.y;
        }

        let value = mesh.interpolate(&point![1.3, 0.7]).unwrap();
        assert!((value - (0.25 * 1.3 + 0.5 * 0.7)).abs() < 1.0e-12);
        assert_eq!(mesh.interpolate(&point![2.5, 0.7]), None);
        // The upper boundary still belongs to the mesh.
        assert!(mesh.interpolate(&point![2.0, 1.0]).is_some());
    }

    #[test]
    fn out_of_domain_policies() {
        let mesh = mesh();
        let outside = point![-0.1, 0.2];

        assert!(matches!(
            mesh.locate(3, &outside, OutOfDomainPolicy::Fail),
            Err(SimulationError::ParticleOutsideMesh { particle: 3, .. })
        ));
        assert_eq!(mesh.locate(3, &outside, OutOfDomainPolicy::Clamp).unwrap(), 0);
        let phase = mesh.phase_at(3, &outside, OutOfDomainPolicy::Clamp).unwrap();
        assert!((phase - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn update_bins_deformable_particles_only() {
        let material = MaterialParameters::new(1000.0, 1.0e7, 0.3);
        let mut particles = ParticleSet::new();
        particles.insert(Particle::deformable(point![0.1, 0.1], 0.01, &material));
        particles.insert(Particle::rigid(point![0.2, 0.1], 0.01, &material));
        particles.insert(Particle::deformable(point![1.9, 0.9], 0.01, &material));

        let mut mesh = mesh();
        mesh.update(&particles, OutOfDomainPolicy::Fail).unwrap();

        assert_eq!(mesh.element_particles(0), &[0]);
        assert_eq!(mesh.particle_element(1), None);
        assert_eq!(mesh.particle_element(2), Some(7));

        particles[2].position = point![3.0, 0.9];
        assert!(mesh.update(&particles, OutOfDomainPolicy::Fail).is_err());
    }
}
