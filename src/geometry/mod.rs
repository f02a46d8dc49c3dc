pub use self::grid::Grid;
pub use self::phase_field_mesh::PhaseFieldMesh;

mod grid;
mod phase_field_mesh;
