pub extern crate nalgebra as na;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub mod prelude {
    pub use crate::dynamics::models::*;
    pub use crate::dynamics::solver::*;
    pub use crate::dynamics::timestep::*;
    pub use crate::math::*;
}

pub mod math {
    pub use super::real::*;
    use na::{Matrix2, Point2, Vector2, Vector3};

    /// The dimension of the space.
    pub const DIM: usize = 2;

    /// The point type.
    pub type Point<N> = Point2<N>;

    /// The vector type.
    pub type Vector<N> = Vector2<N>;

    /// The matrix type.
    pub type Matrix<N> = Matrix2<N>;

    /// Plane-strain engineering (Voigt) components `[xx, yy, xy]`.
    ///
    /// For strains the `xy` entry is the engineering shear `γ = 2 ε_xy`, for
    /// stresses it is the tensor component `σ_xy`.
    pub type Voigt<N> = Vector3<N>;
}

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub type Real = f64;

    /// The scalar type used throughout this crate.
    #[cfg(all(feature = "f32", not(feature = "f64")))]
    pub type Real = f32;
}

pub mod dynamics;
pub mod utils;
