use crate::core::dynamics::solver::PhaseFieldSolverParameters;
use crate::dynamics::ParticleSet;
use crate::error::Result;
use crate::geometry::PhaseFieldMesh;
use crate::math::{Real, Vector};
use na::DVector;
use rayon::prelude::*;

/// Computes the nodal phase field from the particle history.
pub trait PhaseFieldSolver: Send + Sync {
    fn solve(
        &mut self,
        mesh: &mut PhaseFieldMesh,
        particles: &ParticleSet,
        length_scale: Real,
        fracture_energy: Real,
    ) -> Result<()>;
}

/// Leaves the phase field untouched.
impl PhaseFieldSolver for () {
    fn solve(&mut self, _: &mut PhaseFieldMesh, _: &ParticleSet, _: Real, _: Real) -> Result<()> {
        Ok(())
    }
}

/// Particle contribution to the phase-field system.
struct QuadraturePoint {
    nodes: [usize; 4],
    values: [Real; 4],
    gradients: [Vector<Real>; 4],
    // Volume * (Gc / l + 2 H)
    reaction: Real,
    // Volume * Gc * l
    diffusion: Real,
    // Volume * Gc / l
    source: Real,
}

impl QuadraturePoint {
    fn apply(&self, p: &DVector<Real>) -> [Real; 4] {
        let mut val = 0.0;
        let mut grad = Vector::zeros();

        for k in 0..4 {
            val += self.values[k] * p[self.nodes[k]];
            grad += self.gradients[k] * p[self.nodes[k]];
        }

        let mut result = [0.0; 4];
        for k in 0..4 {
            result[k] = self.reaction * val * self.values[k]
                + self.diffusion * grad.dot(&self.gradients[k]);
        }
        result
    }

    fn diagonal(&self) -> [Real; 4] {
        let mut result = [0.0; 4];
        for k in 0..4 {
            result[k] = self.reaction * self.values[k] * self.values[k]
                + self.diffusion * self.gradients[k].norm_squared();
        }
        result
    }
}

/// AT2 phase field solved with a Jacobi-preconditioned conjugate gradient.
///
/// Solves `(Gc / l + 2 H) c - Gc l Δc = Gc / l` on the bilinear mesh, using
/// the deformable particles as quadrature points. The system matrix is never
/// assembled. Nodes without any particle support keep `c = 1`.
#[derive(Clone, Debug, Default)]
pub struct ConjugateGradientPhaseField {
    pub params: PhaseFieldSolverParameters,
    /// Number of iterations performed by the last solve.
    pub last_num_iterations: usize,
    /// Relative residual reached by the last solve.
    pub last_residual: Real,
}

impl ConjugateGradientPhaseField {
    pub fn new(params: PhaseFieldSolverParameters) -> Self {
        Self {
            params,
            last_num_iterations: 0,
            last_residual: 0.0,
        }
    }

    fn quadrature_points(
        mesh: &PhaseFieldMesh,
        particles: &ParticleSet,
        length_scale: Real,
        fracture_energy: Real,
    ) -> Vec<QuadraturePoint> {
        particles
            .particles()
            .par_iter()
            .enumerate()
            .filter_map(|(i, particle)| {
                let element = mesh.particle_element(i)?;
                Some(QuadraturePoint {
                    nodes: mesh.element_nodes(element),
                    values: mesh.shape_values(&particle.position, element),
                    gradients: mesh.shape_gradients(&particle.position, element),
                    reaction: particle.volume
                        * (fracture_energy / length_scale + 2.0 * particle.history),
                    diffusion: particle.volume * fracture_energy * length_scale,
                    source: particle.volume * fracture_energy / length_scale,
                })
            })
            .collect()
    }

    fn mul(points: &[QuadraturePoint], p: &DVector<Real>, out: &mut DVector<Real>) {
        let contributions: Vec<_> = points.par_iter().map(|q| q.apply(p)).collect();

        out.fill(0.0);
        for (q, contrib) in points.iter().zip(contributions.iter()) {
            for k in 0..4 {
                out[q.nodes[k]] += contrib[k];
            }
        }
    }
}

impl PhaseFieldSolver for ConjugateGradientPhaseField {
    fn solve(
        &mut self,
        mesh: &mut PhaseFieldMesh,
        particles: &ParticleSet,
        length_scale: Real,
        fracture_energy: Real,
    ) -> Result<()> {
        let t0 = instant::now();
        let points = Self::quadrature_points(mesh, particles, length_scale, fracture_energy);
        let n = mesh.num_nodes();

        let mut rhs = DVector::zeros(n);
        let mut diag = DVector::zeros(n);
        for q in &points {
            let d = q.diagonal();
            for k in 0..4 {
                rhs[q.nodes[k]] += q.source * q.values[k];
                diag[q.nodes[k]] += d[k];
            }
        }

        let precond = diag.map(crate::core::utils::inv_exact);
        let mut c = DVector::from_column_slice(&mesh.phase);
        for i in 0..n {
            if diag[i] == 0.0 {
                c[i] = 1.0;
            }
        }

        let mut ap = DVector::zeros(n);
        Self::mul(&points, &c, &mut ap);
        let mut r = &rhs - &ap;
        let mut z = r.component_mul(&precond);
        let mut p = z.clone();
        let mut rz = r.dot(&z);

        let rhs_norm = rhs.norm();
        let threshold = self.params.tolerance * rhs_norm;
        let mut niter = 0;
        let mut residual = r.norm();

        while niter < self.params.max_iterations && residual > threshold {
            Self::mul(&points, &p, &mut ap);
            let pap = p.dot(&ap);

            if pap == 0.0 {
                break;
            }

            let alpha = rz / pap;
            c.axpy(alpha, &p, 1.0);
            r.axpy(-alpha, &ap, 1.0);
            z = r.component_mul(&precond);

            let rz_new = r.dot(&z);
            let beta = rz_new / rz;
            p = &z + &p * beta;
            rz = rz_new;
            residual = r.norm();
            niter += 1;
        }

        self.last_num_iterations = niter;
        self.last_residual = if rhs_norm > 0.0 {
            residual / rhs_norm
        } else {
            0.0
        };

        if residual > threshold {
            warn!(
                "Phase field did not converge after {} iterations (relative residual: {}).",
                niter, self.last_residual
            );
        }

        for (phase, new_phase) in mesh.phase.iter_mut().zip(c.iter()) {
            *phase = new_phase.clamp(0.0, 1.0);
        }

        info!(
            "Phase field solve ({} iterations): {}ms",
            niter,
            instant::now() - t0
        );
        Ok(())
    }
}
