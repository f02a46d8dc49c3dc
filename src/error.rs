use crate::math::{Point, Real};
use thiserror::Error;

/// Fatal conditions that abort a simulation run.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("particle {particle} at {position} left the background grid")]
    ParticleOutsideGrid {
        particle: usize,
        position: Point<Real>,
    },
    #[error("particle {particle} at {position} left the phase-field mesh")]
    ParticleOutsideMesh {
        particle: usize,
        position: Point<Real>,
    },
    #[error("particle {particle} is inverted (det F = {determinant})")]
    InvertedParticle { particle: usize, determinant: Real },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to write a snapshot")]
    Snapshot(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
