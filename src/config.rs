//! Configuration types: construction-time setup and per-frame inputs.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ClothError;
use crate::spring::SpringFamily;

/// Designer-tunable stiffness/damping for one spring family.
///
/// Sampled live every frame by parameter sync, so edits take effect
/// without restarting the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        SpringParams {
            stiffness: 7.0,
            damping: 0.5,
        }
    }
}

/// Per-family spring parameters for all four families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyParams {
    pub structural: SpringParams,
    pub shear: SpringParams,
    pub structural_bending: SpringParams,
    pub shear_bending: SpringParams,
}

impl FamilyParams {
    /// Same parameters for every family.
    pub fn uniform(params: SpringParams) -> Self {
        FamilyParams {
            structural: params,
            shear: params,
            structural_bending: params,
            shear_bending: params,
        }
    }

    pub fn get(&self, family: SpringFamily) -> SpringParams {
        match family {
            SpringFamily::Structural => self.structural,
            SpringFamily::Shear => self.shear,
            SpringFamily::StructuralBending => self.structural_bending,
            SpringFamily::ShearBending => self.shear_bending,
        }
    }
}

/// A spherical collider, described by its current center and radius.
///
/// A non-positive radius disables the collision term (the kernel guards
/// it rather than dividing by a degenerate quantity).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(center: Vec3, radius: f32) -> Self {
        SphereCollider { center, radius }
    }
}

/// Construction-time configuration for a cloth.
///
/// # Builder Pattern
/// ```
/// use weft::{ClothConfig, SpringParams, FamilyParams};
/// use glam::Vec3;
///
/// let config = ClothConfig::new(64)
///     .with_mass(0.5)
///     .with_gravity_scale(1.0)
///     .with_anchor(Vec3::new(0.0, 8.0, 0.0))
///     .with_springs(FamilyParams::uniform(SpringParams { stiffness: 7.0, damping: 0.5 }));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClothConfig {
    /// Target particle count; must be a positive perfect square.
    pub particle_count: usize,
    /// Mass of every particle. Must be positive and finite.
    pub particle_mass: f32,
    /// Transform placing grid coordinate `(col, 0, row)` into world space.
    pub placement: Affine3A,
    /// Initial anchor position the pinned edge hangs from. Per-frame
    /// anchor motion is applied as a translation delta from this point.
    pub anchor_position: Vec3,
    /// Gravity multiplier applied to `9.81 m/s^2` downward.
    pub gravity_scale: f32,
    /// Initial per-family spring parameters.
    pub springs: FamilyParams,
}

impl ClothConfig {
    /// Create a config for `particle_count` particles with default
    /// placement (identity), mass 1, and the default spring parameters.
    pub fn new(particle_count: usize) -> Self {
        ClothConfig {
            particle_count,
            particle_mass: 1.0,
            placement: Affine3A::IDENTITY,
            anchor_position: Vec3::ZERO,
            gravity_scale: 1.0,
            springs: FamilyParams::default(),
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_placement(mut self, placement: Affine3A) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_anchor(mut self, anchor_position: Vec3) -> Self {
        self.anchor_position = anchor_position;
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    pub fn with_springs(mut self, springs: FamilyParams) -> Self {
        self.springs = springs;
        self
    }

    /// Validate the configuration, returning the grid side length.
    ///
    /// Fails fast on degenerate geometry rather than proceeding with it.
    pub fn validate(&self) -> Result<usize, ClothError> {
        let rows = (self.particle_count as f64).sqrt() as usize;
        if rows == 0 || rows * rows != self.particle_count {
            return Err(ClothError::InvalidParticleCount(self.particle_count));
        }
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(ClothError::InvalidMass(self.particle_mass));
        }
        Ok(rows)
    }
}

/// Per-frame inputs, sampled fresh each rendered frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Elapsed time since the last frame; each of the 16 sub-steps uses
    /// `dt / 16`.
    pub dt: f32,
    /// Current anchor position for the pinned edge.
    pub anchor_position: Vec3,
    /// Current collider, or `None` to fall back to the simulator's
    /// stored collider (if any).
    pub collider: Option<SphereCollider>,
    /// Gravity multiplier for this frame, sampled live like the spring
    /// parameters.
    pub gravity_scale: f32,
    /// Current values of the designer-tunable spring parameters;
    /// parameter sync rewrites the whole spring array from these after
    /// the sub-step loop.
    pub springs: FamilyParams,
}

impl FrameInput {
    pub fn new(dt: f32, config: &ClothConfig) -> Self {
        FrameInput {
            dt,
            anchor_position: config.anchor_position,
            collider: None,
            gravity_scale: config.gravity_scale,
            springs: config.springs,
        }
    }

    pub fn with_anchor(mut self, anchor_position: Vec3) -> Self {
        self.anchor_position = anchor_position;
        self
    }

    pub fn with_collider(mut self, collider: SphereCollider) -> Self {
        self.collider = Some(collider);
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    pub fn with_springs(mut self, springs: FamilyParams) -> Self {
        self.springs = springs;
        self
    }
}
