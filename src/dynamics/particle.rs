use crate::core::dynamics::models::{AmorSplitElasticity, MaterialParameters};
use crate::math::{Matrix, Point, Real, Vector, Voigt};

/// Selects how a particle is advanced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ParticleRole {
    /// Carries stress and damage, takes part in the grid transfers.
    Deformable,
    /// Moves with the imposed velocity of its rigid body.
    Rigid,
}

#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Particle {
    pub role: ParticleRole,

    pub mass: Real,
    pub volume0: Real,
    pub volume: Real,

    pub position: Point<Real>,
    pub velocity: Vector<Real>,
    pub deformation_gradient: Matrix<Real>,
    // Reset to identity after every grid-to-particle transfer.
    pub deformation_gradient_increment: Matrix<Real>,
    /// Engineering strain `[εxx, εyy, γxy]`.
    pub strain: Voigt<Real>,
    /// Stress `[σxx, σyy, σxy]`.
    pub stress: Voigt<Real>,

    pub young_modulus: Real,
    pub poisson_ratio: Real,
    pub shear_modulus: Real,
    pub bulk_modulus: Real,

    // Phase field variables.
    pub phase: Real,
    pub history: Real,
}

impl Particle {
    pub fn new(
        role: ParticleRole,
        position: Point<Real>,
        volume0: Real,
        material: &MaterialParameters,
    ) -> Self {
        Self {
            role,
            mass: volume0 * material.density,
            volume0,
            volume: volume0,
            position,
            velocity: Vector::zeros(),
            deformation_gradient: Matrix::identity(),
            deformation_gradient_increment: Matrix::identity(),
            strain: Voigt::zeros(),
            stress: Voigt::zeros(),
            young_modulus: material.young_modulus,
            poisson_ratio: material.poisson_ratio,
            shear_modulus: material.shear_modulus(),
            bulk_modulus: material.bulk_modulus(),
            phase: 1.0,
            history: 0.0,
        }
    }

    pub fn deformable(position: Point<Real>, volume0: Real, material: &MaterialParameters) -> Self {
        Self::new(ParticleRole::Deformable, position, volume0, material)
    }

    pub fn rigid(position: Point<Real>, volume0: Real, material: &MaterialParameters) -> Self {
        Self::new(ParticleRole::Rigid, position, volume0, material)
    }

    pub fn is_rigid(&self) -> bool {
        self.role == ParticleRole::Rigid
    }

    pub fn is_deformable(&self) -> bool {
        self.role == ParticleRole::Deformable
    }

    /// Always consistent with the velocity, no separate momentum is stored.
    #[inline]
    pub fn momentum(&self) -> Vector<Real> {
        self.velocity * self.mass
    }

    pub fn density0(&self) -> Real {
        self.mass / self.volume0
    }

    pub fn elasticity(&self, residual_stiffness: Real) -> AmorSplitElasticity {
        AmorSplitElasticity::from_moduli(self.bulk_modulus, self.shear_modulus, residual_stiffness)
    }
}
