use crate::math::{Real, Vector};
use na::vector;

/// Classic MPM hat function, supported on the two nodes of the enclosing cell.
pub struct LinearKernel;

impl LinearKernel {
    #[inline(always)]
    pub fn eval(x: Real) -> Real {
        let x_abs = x.abs();

        if x_abs < 1.0 {
            1.0 - x_abs
        } else {
            0.0
        }
    }

    /// One-sided derivative, so the gradients of the two nodes of a cell
    /// still cancel out when the particle sits exactly on a node.
    #[inline(always)]
    pub fn eval_derivative(x: Real) -> Real {
        if (-1.0..0.0).contains(&x) {
            1.0
        } else if (0.0..1.0).contains(&x) {
            -1.0
        } else {
            0.0
        }
    }
}

/// Quadratic B-spline, supported on three nodes per axis.
pub struct QuadraticKernel;

impl QuadraticKernel {
    #[inline(always)]
    pub fn eval(x: Real) -> Real {
        let x_abs = x.abs();

        if x_abs < 0.5 {
            3.0 / 4.0 - x_abs.powi(2)
        } else if x_abs < 3.0 / 2.0 {
            0.5 * (3.0 / 2.0 - x_abs).powi(2)
        } else {
            0.0
        }
    }

    #[inline(always)]
    pub fn eval_derivative(x: Real) -> Real {
        let x_abs = x.abs();

        if x_abs < 0.5 {
            -2.0 * x.signum() * x_abs
        } else if x_abs < 3.0 / 2.0 {
            -x.signum() * (3.0 / 2.0 - x_abs)
        } else {
            0.0
        }
    }
}

/// The shape functions used to transfer quantities between particles and grid nodes.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kernel {
    Linear,
    QuadraticBSpline,
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::Linear
    }
}

impl Kernel {
    #[inline(always)]
    pub fn eval(self, x: Real) -> Real {
        match self {
            Kernel::Linear => LinearKernel::eval(x),
            Kernel::QuadraticBSpline => QuadraticKernel::eval(x),
        }
    }

    #[inline(always)]
    pub fn eval_derivative(self, x: Real) -> Real {
        match self {
            Kernel::Linear => LinearKernel::eval_derivative(x),
            Kernel::QuadraticBSpline => QuadraticKernel::eval_derivative(x),
        }
    }

    /// Inclusive range of node indices, along one axis, that may have a
    /// non-zero weight at the coordinate `x` (expressed in cell units).
    #[inline(always)]
    pub fn node_range(self, x: Real) -> (i64, i64) {
        match self {
            Kernel::Linear => {
                let base = x.floor() as i64;
                (base, base + 1)
            }
            Kernel::QuadraticBSpline => {
                let base = x.round() as i64 - 1;
                (base, base + 2)
            }
        }
    }

    /// Weight of a node and gradient of its shape function, evaluated at the
    /// particle position.
    #[inline(always)]
    pub fn weight_and_gradient(
        self,
        elt_pos_minus_particle_pos: Vector<Real>,
        h: Vector<Real>,
    ) -> (Real, Vector<Real>) {
        let dpt = -elt_pos_minus_particle_pos.component_div(&h);
        let val_x = self.eval(dpt.x);
        let val_y = self.eval(dpt.y);

        (
            val_x * val_y,
            vector![
                self.eval_derivative(dpt.x) * val_y / h.x,
                val_x * self.eval_derivative(dpt.y) / h.y
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_partition_of_unity(kernel: Kernel) {
        let mut rng = oorandom::Rand64::new(7);
        let h = vector![0.25, 0.5];

        for _ in 0..200 {
            let pos = vector![
                10.0 * rng.rand_float() as Real,
                10.0 * rng.rand_float() as Real
            ];
            let cell_pos = pos.component_div(&h);
            let (i0, i1) = kernel.node_range(cell_pos.x);
            let (j0, j1) = kernel.node_range(cell_pos.y);

            let mut weight_sum = 0.0;
            let mut gradient_sum = Vector::zeros();

            for i in i0..=i1 {
                for j in j0..=j1 {
                    let node = vector![i as Real * h.x, j as Real * h.y];
                    let (w, grad) = kernel.weight_and_gradient(node - pos, h);
                    assert!(w >= 0.0);
                    weight_sum += w;
                    gradient_sum += grad;
                }
            }

            assert!((weight_sum - 1.0).abs() < 1.0e-10, "{:?}: {}", kernel, weight_sum);
            assert!(gradient_sum.norm() < 1.0e-8, "{:?}: {}", kernel, gradient_sum);
        }
    }

    #[test]
    fn linear_kernel_is_a_partition_of_unity() {
        check_partition_of_unity(Kernel::Linear);
    }

    #[test]
    fn quadratic_kernel_is_a_partition_of_unity() {
        check_partition_of_unity(Kernel::QuadraticBSpline);
    }

    #[test]
    fn weights_vanish_outside_of_the_support() {
        let h = vector![1.0, 1.0];
        for kernel in [Kernel::Linear, Kernel::QuadraticBSpline] {
            let (w, grad) = kernel.weight_and_gradient(vector![1.6, 0.0], h);
            assert_eq!(w, 0.0);
            assert_eq!(grad, Vector::zeros());
        }
    }

    #[test]
    fn linear_gradient_points_toward_the_node() {
        let h = vector![0.5, 0.5];
        let (_, grad) = Kernel::Linear.weight_and_gradient(vector![0.25, 0.0], h);
        assert!((grad.x - 2.0).abs() < 1.0e-12);
        assert_eq!(grad.y, 0.0);
    }
}
