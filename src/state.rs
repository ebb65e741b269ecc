//! The state store: particle, spring, and initial-position arrays.

use glam::{Affine3A, Vec3};

use crate::error::ClothError;
use crate::particle::Particle;
use crate::spring::Spring;

/// The single source of truth for simulation state.
///
/// Owns the particle array, the spring array, and the immutable
/// initial-position array (the rest-length coordinate frame). The three
/// buffers live and die together: created once by the topology builder,
/// released as one unit when the state is dropped, never reallocated in
/// between. External consumers (rendering, debug drawing) only ever get
/// shared references.
#[derive(Clone, Debug)]
pub struct ClothState {
    pub(crate) particles: Vec<Particle>,
    pub(crate) springs: Vec<Spring>,
    pub(crate) initial_positions: Vec<Vec3>,
    pub(crate) rows: usize,
    pub(crate) placement: Affine3A,
    pub(crate) anchor_origin: Vec3,
}

impl ClothState {
    /// Read-only view of the particle array.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Read-only view of the spring array.
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// The initial positions, in the untransformed grid frame. Rest
    /// lengths were computed in this frame and never change.
    pub fn initial_positions(&self) -> &[Vec3] {
        &self.initial_positions
    }

    /// Grid side length (`rows x rows` particles).
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Array index of the particle at grid site `(col, row)`.
    pub fn index(&self, col: usize, row: usize) -> usize {
        row + col * self.rows
    }

    /// The particle at `index`, bounds-checked.
    pub fn particle(&self, index: usize) -> Result<&Particle, ClothError> {
        self.particles.get(index).ok_or(ClothError::ParticleOutOfBounds {
            index,
            count: self.particles.len(),
        })
    }

    /// Current positions of all particles.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    /// Current velocities of all particles.
    pub fn velocities(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.velocity)
    }
}
