use crate::dynamics::Particle;
use crate::math::{Real, Vector};
use std::ops::{Index, IndexMut, Range};

/// The single store of every material point, deformable and rigid.
///
/// Particles are never removed so their indices stay valid for the whole run.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ParticleSet {
    pub(crate) particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self { particles: vec![] }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn get(&self, i: usize) -> Option<&Particle> {
        self.particles.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Particle> {
        self.particles.get_mut(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn insert(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Inserts all the particles and returns the range of their indices.
    pub fn insert_batch(&mut self, mut particles: Vec<Particle>) -> Range<usize> {
        let index_range = self.particles.len()..self.particles.len() + particles.len();
        self.particles.append(&mut particles);
        index_range
    }

    pub fn total_mass(&self) -> Real {
        self.particles.iter().map(|p| p.mass).sum()
    }

    pub fn total_momentum(&self) -> Vector<Real> {
        self.particles.iter().map(|p| p.momentum()).sum()
    }

    pub fn num_deformable(&self) -> usize {
        self.particles.iter().filter(|p| p.is_deformable()).count()
    }
}

impl Index<usize> for ParticleSet {
    type Output = Particle;

    #[inline]
    fn index(&self, i: usize) -> &Particle {
        &self.particles[i]
    }
}

impl IndexMut<usize> for ParticleSet {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Particle {
        &mut self.particles[i]
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = <&'a Vec<Particle> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        (&self.particles).into_iter()
    }
}
