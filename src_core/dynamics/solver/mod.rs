pub use self::kernel::{Kernel, LinearKernel, QuadraticKernel};
pub use self::solver_parameters::{
    OutOfDomainPolicy, PhaseFieldSolverParameters, SolverParameters,
};

mod kernel;
mod solver_parameters;
