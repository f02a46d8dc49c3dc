use crate::core::dynamics::solver::Kernel;
use crate::dynamics::GridNode;
use crate::error::{Result, SimulationError};
use crate::math::{Point, Real, Vector};
use na::vector;
use rayon::prelude::*;

/// A uniform background grid, stored as a flat arena of nodes.
///
/// The nodes are allocated once and reset at the beginning of every step.
/// Node `(i, j)` lives at `origin + (i * cell_size.x, j * cell_size.y)`.
#[derive(Clone, Debug)]
pub struct Grid {
    origin: Point<Real>,
    cell_size: Vector<Real>,
    num_cells: [usize; 2],
    nodes: Vec<GridNode>,
}

impl Grid {
    pub fn new(origin: Point<Real>, extents: Vector<Real>, num_cells: [usize; 2]) -> Result<Self> {
        if num_cells[0] == 0 || num_cells[1] == 0 {
            return Err(SimulationError::InvalidConfig(
                "the grid needs at least one cell along each axis".to_string(),
            ));
        }

        if extents.x <= 0.0 || extents.y <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "invalid grid extents: {}",
                extents
            )));
        }

        let cell_size = vector![
            extents.x / num_cells[0] as Real,
            extents.y / num_cells[1] as Real
        ];
        let num_nodes = (num_cells[0] + 1) * (num_cells[1] + 1);

        Ok(Self {
            origin,
            cell_size,
            num_cells,
            nodes: vec![GridNode::default(); num_nodes],
        })
    }

    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    pub fn cell_size(&self) -> Vector<Real> {
        self.cell_size
    }

    pub fn min_cell_size(&self) -> Real {
        self.cell_size.min()
    }

    pub fn num_cells(&self) -> [usize; 2] {
        self.num_cells
    }

    pub fn extents(&self) -> Vector<Real> {
        vector![
            self.cell_size.x * self.num_cells[0] as Real,
            self.cell_size.y * self.num_cells[1] as Real
        ]
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [GridNode] {
        &mut self.nodes
    }

    pub fn node(&self, i: usize) -> &GridNode {
        &self.nodes[i]
    }

    pub fn node_mut(&mut self, i: usize) -> &mut GridNode {
        &mut self.nodes[i]
    }

    #[inline]
    pub fn node_index(&self, i: usize, j: usize) -> usize {
        j * (self.num_cells[0] + 1) + i
    }

    #[inline]
    pub fn node_coords(&self, index: usize) -> [usize; 2] {
        let nx = self.num_cells[0] + 1;
        [index % nx, index / nx]
    }

    #[inline]
    pub fn node_position(&self, index: usize) -> Point<Real> {
        let [i, j] = self.node_coords(index);
        self.origin + vector![i as Real * self.cell_size.x, j as Real * self.cell_size.y]
    }

    /// Is the point inside of the gridded region (boundary included)?
    pub fn contains(&self, point: &Point<Real>) -> bool {
        let local = point - self.origin;
        let extents = self.extents();
        local.x >= 0.0 && local.y >= 0.0 && local.x <= extents.x && local.y <= extents.y
    }

    pub fn reset(&mut self) {
        self.nodes.par_iter_mut().for_each(|node| node.reset());
    }

    pub fn update_velocities(&mut self) {
        self.nodes
            .par_iter_mut()
            .for_each(|node| node.update_velocity());
    }

    /// Flags the axes of every node inside of the given box as fixed.
    ///
    /// Returns the number of affected nodes.
    pub fn fix_nodes_in_aabb(
        &mut self,
        mins: &Point<Real>,
        maxs: &Point<Real>,
        fix_x: bool,
        fix_y: bool,
    ) -> usize {
        let mut num_fixed = 0;

        for i in 0..self.nodes.len() {
            let pos = self.node_position(i);
            if pos.x >= mins.x && pos.y >= mins.y && pos.x <= maxs.x && pos.y <= maxs.y {
                let node = &mut self.nodes[i];
                node.set_fixed(node.fixed_x() || fix_x, node.fixed_y() || fix_y);
                num_fixed += 1;
            }
        }

        num_fixed
    }

    /// Calls `f(node_id, node, weight, weight_gradient)` for every node of the
    /// grid inside of the kernel support at `point`.
    ///
    /// Nodes falling outside of the grid are skipped.
    #[inline]
    pub fn for_each_neighbor(
        &self,
        kernel: Kernel,
        point: &Point<Real>,
        mut f: impl FnMut(usize, &GridNode, Real, Vector<Real>),
    ) {
        let local = (point - self.origin).component_div(&self.cell_size);
        let (i0, i1) = kernel.node_range(local.x);
        let (j0, j1) = kernel.node_range(local.y);
        let max_i = self.num_cells[0] as i64;
        let max_j = self.num_cells[1] as i64;

        for j in j0.max(0)..=j1.min(max_j) {
            for i in i0.max(0)..=i1.min(max_i) {
                let node_id = self.node_index(i as usize, j as usize);
                let node_pos = self.origin
                    + vector![i as Real * self.cell_size.x, j as Real * self.cell_size.y];
                let (weight, gradient) =
                    kernel.weight_and_gradient(node_pos - point, self.cell_size);
                f(node_id, &self.nodes[node_id], weight, gradient);
            }
        }
    }

    /// Sorted indices of the nodes reached by the kernel support of any of the points.
    pub fn support_nodes<'a>(
        &self,
        kernel: Kernel,
        points: impl IntoIterator<Item = &'a Point<Real>>,
    ) -> Vec<usize> {
        let mut result = vec![];

        for point in points {
            self.for_each_neighbor(kernel, point, |node_id, _, weight, _| {
                if weight > 0.0 {
                    result.push(node_id);
                }
            });
        }

        result.sort_unstable();
        result.dedup();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use na::point;

    fn grid() -> Grid {
        Grid::new(point![-1.0, 0.0], vector![2.0, 1.0], [4, 2]).unwrap()
    }

    #[test]
    fn node_indexing() {
        let grid = grid();
        assert_eq!(grid.nodes().len(), 15);
        assert_eq!(grid.cell_size(), vector![0.5, 0.5]);
        let id = grid.node_index(3, 2);
        assert_eq!(grid.node_coords(id), [3, 2]);
        assert_eq!(grid.node_position(id), point![0.5, 1.0]);
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(Grid::new(point![0.0, 0.0], vector![1.0, 1.0], [0, 3]).is_err());
        assert!(Grid::new(point![0.0, 0.0], vector![-1.0, 1.0], [2, 3]).is_err());
    }

    #[test]
    fn neighbors_are_clipped_to_the_grid() {
        let grid = grid();
        let mut count = 0;
        let mut weight_sum = 0.0;
        grid.for_each_neighbor(
            Kernel::QuadraticBSpline,
            &point![-0.9, 0.1],
            |_, _, w, _| {
                count += 1;
                weight_sum += w;
            },
        );
        assert_eq!(count, 4);
        assert!(weight_sum < 1.0);

        count = 0;
        weight_sum = 0.0;
        grid.for_each_neighbor(Kernel::Linear, &point![0.1, 0.6], |_, _, w, _| {
            count += 1;
            weight_sum += w;
        });
        assert_eq!(count, 4);
        assert!((weight_sum - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn fixing_nodes_in_a_box() {
        let mut grid = grid();
        let num = grid.fix_nodes_in_aabb(&point![-1.0, 0.0], &point![1.0, 0.0], false, true);
        assert_eq!(num, 5);
        grid.reset();
        let bottom = grid.node(grid.node_index(2, 0));
        assert!(bottom.fixed_y() && !bottom.fixed_x());
        assert!(!grid.node(grid.node_index(2, 1)).fixed_y());
    }

    #[test]
    fn support_nodes_are_unique() {
        let grid = grid();
        let points = [point![0.1, 0.1], point![0.2, 0.1]];
        let support = grid.support_nodes(Kernel::Linear, points.iter());
        assert_eq!(support.len(), 4);
        assert!(support.windows(2).all(|w| w[0] < w[1]));
    }
}
