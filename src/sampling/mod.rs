//! Generation of material points from simple geometric domains.

use crate::core::dynamics::models::MaterialParameters;
use crate::dynamics::{Particle, ParticleRole};
use crate::math::{Point, Real, Vector};
use crate::parry::query::PointQuery;
use crate::parry::shape::{Ball, Cuboid};
use na::{point, vector};

/// A region of the plane filled with particles.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Domain {
    Circle {
        center: Point<Real>,
        radius: Real,
    },
    Rectangle {
        mins: Point<Real>,
        maxs: Point<Real>,
    },
    /// A rectangle with a rectangular slot cut out of it.
    NotchedRectangle {
        mins: Point<Real>,
        maxs: Point<Real>,
        notch_mins: Point<Real>,
        notch_maxs: Point<Real>,
    },
}

fn box_contains(mins: &Point<Real>, maxs: &Point<Real>, pt: &Point<Real>) -> bool {
    let center = na::center(mins, maxs);
    let cuboid = Cuboid::new((maxs - mins) / 2.0);
    cuboid.contains_local_point(&point![pt.x - center.x, pt.y - center.y])
}

impl Domain {
    pub fn bounding_box(&self) -> (Point<Real>, Point<Real>) {
        match self {
            Domain::Circle { center, radius } => (
                center - Vector::repeat(*radius),
                center + Vector::repeat(*radius),
            ),
            Domain::Rectangle { mins, maxs } | Domain::NotchedRectangle { mins, maxs, .. } => {
                (*mins, *maxs)
            }
        }
    }

    pub fn contains(&self, pt: &Point<Real>) -> bool {
        match self {
            Domain::Circle { center, radius } => {
                Ball::new(*radius).contains_local_point(&point![pt.x - center.x, pt.y - center.y])
            }
            Domain::Rectangle { mins, maxs } => box_contains(mins, maxs, pt),
            Domain::NotchedRectangle {
                mins,
                maxs,
                notch_mins,
                notch_maxs,
            } => box_contains(mins, maxs, pt) && !box_contains(notch_mins, notch_maxs, pt),
        }
    }
}

/// Fills the domain with a regular lattice of particles.
///
/// Each grid cell of size `cell_size` receives `n²` particles, with `n` the
/// integer closest to `sqrt(particles_per_cell)`. Every particle gets the
/// volume of its lattice cell.
pub fn sample_domain(
    domain: &Domain,
    cell_size: &Vector<Real>,
    particles_per_cell: usize,
    role: ParticleRole,
    material: &MaterialParameters,
) -> Vec<Particle> {
    let n = ((particles_per_cell as Real).sqrt().round() as usize).max(1);
    let spacing = cell_size / n as Real;
    let volume = spacing.x * spacing.y;
    let (mins, maxs) = domain.bounding_box();
    let extents = maxs - mins;

    let nx = (extents.x / spacing.x - 1.0e-6).ceil().max(0.0) as usize;
    let ny = (extents.y / spacing.y - 1.0e-6).ceil().max(0.0) as usize;
    let mut particles = Vec::with_capacity(nx * ny);

    for j in 0..ny {
        for i in 0..nx {
            let pt = mins
                + vector![
                    (i as Real + 0.5) * spacing.x,
                    (j as Real + 0.5) * spacing.y
                ];

            if domain.contains(&pt) {
                particles.push(Particle::new(role, pt, volume, material));
            }
        }
    }

    particles
}
