//! Spring records and the four connection families.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::SpringParams;

/// The four spring families of the cloth topology.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpringFamily {
    /// Direct grid neighbor (one step right or down).
    Structural,
    /// Diagonal grid neighbor (one step diagonally).
    Shear,
    /// Skip-one grid neighbor, resists folding along the grid axes.
    StructuralBending,
    /// Skip-one diagonal neighbor, resists folding along the diagonals.
    ShearBending,
}

impl SpringFamily {
    /// All families, in slot-vector order.
    pub const ALL: [SpringFamily; 4] = [
        SpringFamily::Structural,
        SpringFamily::Shear,
        SpringFamily::StructuralBending,
        SpringFamily::ShearBending,
    ];
}

/// A spring-damper between two particles.
///
/// Stored exactly once in the spring array; both endpoints reference it
/// through their family slot vectors. Only `stiffness` and `damping`
/// mutate after construction (rewritten each frame by parameter sync).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub particle_a: u32,
    pub particle_b: u32,
    /// Equilibrium length: the distance between the endpoints' initial
    /// (pre-simulation) positions, not their runtime positions.
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub family: SpringFamily,
}

impl Spring {
    /// Create a spring between particles `a` and `b`, capturing the rest
    /// length from the initial-position array.
    pub fn between(
        a: u32,
        b: u32,
        initial_positions: &[Vec3],
        params: SpringParams,
        family: SpringFamily,
    ) -> Self {
        let rest_length = initial_positions[a as usize].distance(initial_positions[b as usize]);
        Spring {
            particle_a: a,
            particle_b: b,
            rest_length,
            stiffness: params.stiffness,
            damping: params.damping,
            family,
        }
    }

    /// The endpoint opposite `particle`.
    pub fn other_end(&self, particle: u32) -> u32 {
        if particle == self.particle_a {
            self.particle_b
        } else {
            self.particle_a
        }
    }
}
