pub use self::elasticity_amor_split::AmorSplitElasticity;
pub use self::material_parameters::{FractureParameters, MaterialParameters};

mod elasticity_amor_split;
mod material_parameters;
