use crate::dynamics::solver::Kernel;
use crate::math::{Real, Vector};

/// What to do with a particle whose centroid leaves the phase-field mesh.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutOfDomainPolicy {
    /// Abort the step with an error.
    Fail,
    /// Log a warning and use the closest element of the mesh.
    Clamp,
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhaseFieldSolverParameters {
    pub max_iterations: usize,
    /// Convergence threshold on the residual norm, relative to the right-hand side norm.
    pub tolerance: Real,
}

impl Default for PhaseFieldSolverParameters {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1.0e-8,
        }
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverParameters {
    pub kernel: Kernel,
    /// Fraction of the elastic wave crossing time of one cell used as timestep.
    pub cfl_coeff: Real,
    /// Explicit timestep length. Overrides the `cfl_coeff` estimate when set.
    pub dt: Option<Real>,
    /// Body acceleration applied during the particle-to-grid transfer.
    pub gravity: Vector<Real>,
    pub out_of_domain_policy: OutOfDomainPolicy,
    pub phase_field: PhaseFieldSolverParameters,
}

impl Default for SolverParameters {
    fn default() -> Self {
        SolverParameters {
            kernel: Kernel::Linear,
            cfl_coeff: 0.2,
            dt: None,
            gravity: Vector::zeros(),
            out_of_domain_policy: OutOfDomainPolicy::Fail,
            phase_field: PhaseFieldSolverParameters::default(),
        }
    }
}
