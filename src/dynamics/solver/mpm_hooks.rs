use crate::geometry::Grid;

pub trait MpmHooks: Send + Sync {
    /// Called once the boundary conditions were applied to the grid, before the
    /// nodal velocities are computed.
    fn post_grid_update_hook(&mut self, grid: &mut Grid);
}

impl MpmHooks for () {
    fn post_grid_update_hook(&mut self, _: &mut Grid) {
        /* nothing */
    }
}
