pub mod models;
pub mod solver;
pub mod timestep;
