use crate::core::dynamics::models::{FractureParameters, MaterialParameters};
use crate::core::dynamics::solver::SolverParameters;
use crate::dynamics::ParticleRole;
use crate::error::{Result, SimulationError};
use crate::math::{Point, Real, Vector};
use crate::sampling::Domain;
use na::{point, vector};

/// A uniform structured subdivision of a box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub origin: Point<Real>,
    pub extents: Vector<Real>,
    pub num_cells: [usize; 2],
}

impl GridConfig {
    pub fn cell_size(&self) -> Vector<Real> {
        vector![
            self.extents.x / self.num_cells[0] as Real,
            self.extents.y / self.num_cells[1] as Real
        ]
    }
}

/// A set of particles sampled from one domain.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub domain: Domain,
    pub role: ParticleRole,
    /// Imposed velocity of a rigid body, initial velocity of a deformable one.
    pub velocity: Vector<Real>,
}

/// Grid nodes inside of this box get their selected axes fixed.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedRegion {
    pub mins: Point<Real>,
    pub maxs: Point<Real>,
    pub fix_x: bool,
    pub fix_y: bool,
}

/// Everything needed to set up and run a simulation.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub solver: SolverParameters,
    pub fracture: FractureParameters,
    pub deformable_material: MaterialParameters,
    /// Rigid particles only use the density, but a stiff material is expected.
    pub rigid_material: MaterialParameters,
    pub grid: GridConfig,
    pub mesh: GridConfig,
    pub particles_per_cell: usize,
    pub bodies: Vec<BodyConfig>,
    pub fixed_regions: Vec<FixedRegion>,
    pub end_time: Real,
    /// Number of steps between two snapshots.
    pub output_interval: usize,
}

/// Three-point bending of a notched beam, loaded by a rigid circular indenter.
impl Default for RunConfig {
    fn default() -> Self {
        let cell_width = 0.01;
        let grid = GridConfig {
            origin: point![-0.05, -0.05],
            extents: vector![0.9, 0.4],
            num_cells: [90, 40],
        };

        Self {
            solver: SolverParameters::default(),
            fracture: FractureParameters {
                length_scale: 2.0 * cell_width,
                fracture_energy: 10.0,
                residual_stiffness: 1.0e-3,
            },
            deformable_material: MaterialParameters::new(1000.0, 1.0e7, 0.3),
            rigid_material: MaterialParameters::new(7800.0, 2.0e11, 0.3),
            grid,
            mesh: grid,
            particles_per_cell: 4,
            bodies: vec![
                BodyConfig {
                    name: "beam".to_string(),
                    domain: Domain::NotchedRectangle {
                        mins: point![0.0, 0.0],
                        maxs: point![0.8, 0.2],
                        notch_mins: point![0.39, 0.0],
                        notch_maxs: point![0.41, 0.06],
                    },
                    role: ParticleRole::Deformable,
                    velocity: Vector::zeros(),
                },
                BodyConfig {
                    name: "indenter".to_string(),
                    domain: Domain::Circle {
                        center: point![0.4, 0.235],
                        radius: 0.03,
                    },
                    role: ParticleRole::Rigid,
                    velocity: vector![0.0, -0.05],
                },
            ],
            fixed_regions: vec![
                // Left support, pinned.
                FixedRegion {
                    mins: point![-0.001, -0.001],
                    maxs: point![0.021, 0.001],
                    fix_x: true,
                    fix_y: true,
                },
                // Right support, roller.
                FixedRegion {
                    mins: point![0.779, -0.001],
                    maxs: point![0.801, 0.001],
                    fix_x: false,
                    fix_y: true,
                },
            ],
            end_time: 0.2,
            output_interval: 500,
        }
    }
}

fn invalid(msg: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfig(msg.into())
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, material) in [
            ("deformable", &self.deformable_material),
            ("rigid", &self.rigid_material),
        ] {
            if material.density <= 0.0 || material.young_modulus <= 0.0 {
                return Err(invalid(format!(
                    "the {} material needs a positive density and Young modulus",
                    name
                )));
            }

            if material.poisson_ratio <= -1.0 || material.poisson_ratio >= 0.5 {
                return Err(invalid(format!(
                    "the {} material has an invalid Poisson ratio: {}",
                    name, material.poisson_ratio
                )));
            }
        }

        if self.fracture.length_scale <= 0.0 || self.fracture.fracture_energy <= 0.0 {
            return Err(invalid(
                "the length scale and fracture energy must be positive",
            ));
        }

        if !(0.0..1.0).contains(&self.fracture.residual_stiffness) {
            return Err(invalid("the residual stiffness must be in [0, 1)"));
        }

        if self.solver.cfl_coeff <= 0.0 {
            return Err(invalid("the CFL coefficient must be positive"));
        }

        if self.particles_per_cell == 0 || self.output_interval == 0 {
            return Err(invalid(
                "the particles per cell and output interval must be positive",
            ));
        }

        if self.end_time < 0.0 {
            return Err(invalid("the end time cannot be negative"));
        }

        if self.bodies.is_empty() {
            return Err(invalid("at least one body is needed"));
        }

        Ok(())
    }
}
