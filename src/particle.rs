//! Point-mass particles with per-family spring reference slots.

use glam::Vec3;

use crate::spring::SpringFamily;

/// Sentinel slot value: no spring connected in this slot.
pub const NO_SPRING: i32 = -1;

/// A fixed 4-slot spring-reference vector for one family.
///
/// Each component holds either an index into the spring array or
/// [`NO_SPRING`]. Slots 0 and 1 are the connections this particle
/// originated; slots 2 and 3 are the mirrored entries written by a
/// neighboring originator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotVec(pub [i32; 4]);

impl SlotVec {
    pub const EMPTY: SlotVec = SlotVec([NO_SPRING; 4]);

    /// The spring index in `slot`, if one is connected.
    pub fn get(&self, slot: usize) -> Option<usize> {
        match self.0[slot] {
            NO_SPRING => None,
            idx => Some(idx as usize),
        }
    }

    pub fn set(&mut self, slot: usize, spring: usize) {
        debug_assert_eq!(self.0[slot], NO_SPRING, "slot {} already occupied", slot);
        self.0[slot] = spring as i32;
    }

    /// Iterate over the occupied slots' spring indices.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().filter(|&&s| s != NO_SPRING).map(|&s| s as usize)
    }
}

/// A point mass in the cloth grid.
///
/// Topology (the four slot vectors) is immutable after construction;
/// only `position` and `velocity` mutate during simulation. Fixed
/// particles are excluded from force integration and track the external
/// anchor instead.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Stable index into the particle array, assigned at construction.
    pub id: u32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub fixed: bool,
    pub structural: SlotVec,
    pub shear: SlotVec,
    pub structural_bending: SlotVec,
    pub shear_bending: SlotVec,
}

impl Particle {
    pub fn new(id: u32, position: Vec3, mass: f32) -> Self {
        Particle {
            id,
            position,
            velocity: Vec3::ZERO,
            mass,
            fixed: false,
            structural: SlotVec::EMPTY,
            shear: SlotVec::EMPTY,
            structural_bending: SlotVec::EMPTY,
            shear_bending: SlotVec::EMPTY,
        }
    }

    pub fn slots(&self, family: SpringFamily) -> &SlotVec {
        match family {
            SpringFamily::Structural => &self.structural,
            SpringFamily::Shear => &self.shear,
            SpringFamily::StructuralBending => &self.structural_bending,
            SpringFamily::ShearBending => &self.shear_bending,
        }
    }

    pub fn slots_mut(&mut self, family: SpringFamily) -> &mut SlotVec {
        match family {
            SpringFamily::Structural => &mut self.structural,
            SpringFamily::Shear => &mut self.shear,
            SpringFamily::StructuralBending => &mut self.structural_bending,
            SpringFamily::ShearBending => &mut self.shear_bending,
        }
    }

    /// Iterate over every connected spring index across all four
    /// families (up to 16).
    pub fn spring_indices(&self) -> impl Iterator<Item = usize> + '_ {
        SpringFamily::ALL
            .into_iter()
            .flat_map(|family| self.slots(family).occupied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slots_yield_nothing() {
        let p = Particle::new(0, Vec3::ZERO, 1.0);
        assert_eq!(p.spring_indices().count(), 0);
        assert_eq!(p.structural.get(0), None);
    }

    #[test]
    fn set_and_iterate_slots() {
        let mut p = Particle::new(3, Vec3::ZERO, 1.0);
        p.structural.set(0, 7);
        p.shear.set(3, 11);
        assert_eq!(p.structural.get(0), Some(7));
        let indices: Vec<usize> = p.spring_indices().collect();
        assert_eq!(indices, vec![7, 11]);
    }
}
