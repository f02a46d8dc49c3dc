use crate::math::Real;

/// Isotropic linear elastic material.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialParameters {
    pub density: Real,
    pub young_modulus: Real,
    pub poisson_ratio: Real,
}

impl MaterialParameters {
    pub fn new(density: Real, young_modulus: Real, poisson_ratio: Real) -> Self {
        Self {
            density,
            young_modulus,
            poisson_ratio,
        }
    }

    pub fn shear_modulus(&self) -> Real {
        crate::utils::shear_modulus(self.young_modulus, self.poisson_ratio)
    }

    pub fn bulk_modulus(&self) -> Real {
        crate::utils::bulk_modulus(self.young_modulus, self.poisson_ratio)
    }
}

/// Parameters of the AT2 phase-field fracture model.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractureParameters {
    /// Width of the diffuse crack band.
    pub length_scale: Real,
    /// Critical energy release rate `Gc`.
    pub fracture_energy: Real,
    /// Stiffness fraction kept by fully broken material.
    pub residual_stiffness: Real,
}

impl Default for FractureParameters {
    fn default() -> Self {
        Self {
            length_scale: 0.01,
            fracture_energy: 10.0,
            residual_stiffness: 1.0e-3,
        }
    }
}
