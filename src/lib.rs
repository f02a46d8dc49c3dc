#[cfg(all(feature = "f32", not(feature = "f64")))]
pub extern crate parry2d as parry;
#[cfg(feature = "f64")]
pub extern crate parry2d_f64 as parry;

pub extern crate fissure2d_core;
pub extern crate nalgebra as na;

#[macro_use]
extern crate log;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub use fissure2d_core as core;

pub use self::error::{Result, SimulationError};

pub mod prelude {
    pub use crate::dynamics::models::*;
    pub use crate::dynamics::solver::*;
    pub use crate::dynamics::*;
    pub use crate::error::SimulationError;
    pub use crate::geometry::*;
    pub use crate::math::*;
    pub use crate::pipelines::*;
    pub use crate::sampling::*;
}

pub mod math {
    pub use crate::core::math::*;
}

pub mod dynamics;
mod error;
pub mod geometry;
pub mod pipelines;
pub mod sampling;
