//! Error types for cloth construction and state access.

use thiserror::Error;

/// Errors that can occur when building or inspecting a cloth.
///
/// Configuration errors surface immediately from [`ClothSim::new`];
/// runtime numerical edge cases (degenerate spring axes, collider
/// center coincidence) are guarded locally inside the kernel and never
/// abort the simulation loop.
///
/// [`ClothSim::new`]: crate::ClothSim::new
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    /// Particle count must be a positive perfect square (the cloth is a
    /// `rows x rows` grid).
    #[error("particle count {0} is not a positive perfect square")]
    InvalidParticleCount(usize),
    /// Mass must be positive and finite.
    #[error("particle mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    /// Particle index is out of bounds.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
}
