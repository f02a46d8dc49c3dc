use crate::math::{Real, Vector};

/// Nodes lighter than this are only reached by the far tail of a particle's
/// shape function. Their velocity is taken as zero and they do not contribute
/// to the particle update, dividing by such a mass would only amplify roundoff.
pub const NODAL_MASS_EPSILON: Real = 1.0e-12;

bitflags::bitflags! {
    pub struct GridNodeFlags: u32 {
        const NONE = 0;
        const FIXED_X = 1 << 0;
        const FIXED_Y = 1 << 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridNode {
    pub mass: Real,
    pub momentum: Vector<Real>,
    pub force: Vector<Real>,
    pub velocity: Vector<Real>,
    pub flags: GridNodeFlags,
}

impl Default for GridNode {
    fn default() -> Self {
        Self {
            mass: 0.0,
            momentum: na::zero(),
            force: na::zero(),
            velocity: na::zero(),
            flags: GridNodeFlags::NONE,
        }
    }
}

impl GridNode {
    /// Clears the accumulators. The boundary flags survive the reset.
    pub fn reset(&mut self) {
        *self = Self {
            flags: self.flags,
            ..Self::default()
        };
    }

    pub fn has_mass(&self) -> bool {
        self.mass > NODAL_MASS_EPSILON
    }

    pub fn fixed_x(&self) -> bool {
        self.flags.contains(GridNodeFlags::FIXED_X)
    }

    pub fn fixed_y(&self) -> bool {
        self.flags.contains(GridNodeFlags::FIXED_Y)
    }

    pub fn set_fixed(&mut self, fixed_x: bool, fixed_y: bool) {
        self.flags.set(GridNodeFlags::FIXED_X, fixed_x);
        self.flags.set(GridNodeFlags::FIXED_Y, fixed_y);
    }

    /// Zeroes momentum and force along every fixed axis.
    pub fn apply_fixed_dofs(&mut self) {
        if self.fixed_x() {
            self.momentum.x = 0.0;
            self.force.x = 0.0;
        }

        if self.fixed_y() {
            self.momentum.y = 0.0;
            self.force.y = 0.0;
        }
    }

    pub fn update_velocity(&mut self) {
        self.velocity = if self.has_mass() {
            self.momentum / self.mass
        } else {
            Vector::zeros()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use na::vector;

    #[test]
    fn reset_keeps_the_boundary_flags() {
        let mut node = GridNode::default();
        node.set_fixed(true, false);
        node.mass = 2.0;
        node.momentum = vector![1.0, 2.0];
        node.force = vector![3.0, 4.0];
        node.reset();

        assert_eq!(node.mass, 0.0);
        assert_eq!(node.momentum, Vector::zeros());
        assert_eq!(node.force, Vector::zeros());
        assert!(node.fixed_x());
        assert!(!node.fixed_y());
    }

    #[test]
    fn light_nodes_have_zero_velocity() {
        let mut node = GridNode::default();
        node.mass = NODAL_MASS_EPSILON * 0.5;
        node.momentum = vector![1.0, 1.0];
        node.update_velocity();
        assert_eq!(node.velocity, Vector::zeros());

        node.mass = 2.0;
        node.update_velocity();
        assert_eq!(node.velocity, vector![0.5, 0.5]);
    }

    #[test]
    fn fixed_axes_are_zeroed() {
        let mut node = GridNode::default();
        node.set_fixed(false, true);
        node.momentum = vector![1.0, 2.0];
        node.force = vector![3.0, 4.0];
        node.apply_fixed_dofs();
        assert_eq!(node.momentum, vector![1.0, 0.0]);
        assert_eq!(node.force, vector![3.0, 0.0]);
    }
}
