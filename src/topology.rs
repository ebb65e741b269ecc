//! Topology builder: grid construction and the four spring families.

use glam::Vec3;

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::particle::Particle;
use crate::spring::{Spring, SpringFamily};
use crate::state::ClothState;

/// One directed connection attempt from a grid cell.
///
/// The originating particle records the new spring in `from_slot` of the
/// family's vector; the target records the same index in the mirrored
/// `to_slot`. Storing each spring once with two mirrored references is
/// what keeps the adjacency graph free of duplicate edges.
struct Connection {
    family: SpringFamily,
    d_col: isize,
    d_row: isize,
    from_slot: usize,
    to_slot: usize,
}

/// The up-to-8 connections attempted for every cell `(col, row)`.
const CONNECTIONS: [Connection; 8] = [
    // Structural: direct grid neighbors.
    Connection { family: SpringFamily::Structural, d_col: 0, d_row: 1, from_slot: 0, to_slot: 3 },
    Connection { family: SpringFamily::Structural, d_col: 1, d_row: 0, from_slot: 1, to_slot: 2 },
    // Shear: diagonal neighbors.
    Connection { family: SpringFamily::Shear, d_col: 1, d_row: 1, from_slot: 0, to_slot: 2 },
    Connection { family: SpringFamily::Shear, d_col: -1, d_row: 1, from_slot: 1, to_slot: 3 },
    // Structural bending: skip-one grid neighbors.
    Connection { family: SpringFamily::StructuralBending, d_col: 0, d_row: 2, from_slot: 0, to_slot: 2 },
    Connection { family: SpringFamily::StructuralBending, d_col: 2, d_row: 0, from_slot: 1, to_slot: 3 },
    // Shear bending: skip-one diagonal neighbors.
    Connection { family: SpringFamily::ShearBending, d_col: 2, d_row: 2, from_slot: 0, to_slot: 2 },
    Connection { family: SpringFamily::ShearBending, d_col: -2, d_row: 2, from_slot: 1, to_slot: 3 },
];

/// Build the particle grid, the four spring families, and the
/// initial-position array from a validated configuration.
///
/// Particles are laid out as a `rows x rows` grid with particle
/// `row + col * rows` placed by transforming grid coordinate
/// `(col, 0, row)` through the placement transform. The initial-position
/// array keeps the untransformed grid points; rest lengths are distances
/// in that frame. Every particle at `row == 0` (one full edge, stride
/// `rows` through the array) is pinned.
///
/// Connections whose target falls outside the grid are skipped, so grids
/// too small for a family (side < 2 for shear, < 3 for bending) silently
/// contribute zero springs for it rather than erroring.
pub fn build(config: &ClothConfig) -> Result<ClothState, ClothError> {
    let rows = config.validate()?;
    let count = config.particle_count;

    let mut particles = Vec::with_capacity(count);
    let mut initial_positions = Vec::with_capacity(count);
    for col in 0..rows {
        for row in 0..rows {
            let grid_point = Vec3::new(col as f32, 0.0, row as f32);
            let id = (row + col * rows) as u32;
            particles.push(Particle::new(
                id,
                config.placement.transform_point3(grid_point),
                config.particle_mass,
            ));
            initial_positions.push(grid_point);
        }
    }

    // Bounded by 8 attempts per cell; interior cells realize all 8.
    let mut springs = Vec::with_capacity(count * 8);
    for col in 0..rows {
        for row in 0..rows {
            connect_cell(col, row, rows, config, &initial_positions, &mut particles, &mut springs);
        }
    }
    debug_assert!(springs.len() <= 8 * count);

    // Pin one full edge so the cloth hangs from it.
    for index in (0..count).step_by(rows) {
        particles[index].fixed = true;
    }

    log::info!(
        "built cloth topology: {} particles ({rows}x{rows} grid), {} springs",
        count,
        springs.len(),
    );

    Ok(ClothState {
        particles,
        springs,
        initial_positions,
        rows,
        placement: config.placement,
        anchor_origin: config.anchor_position,
    })
}

/// Attempt the eight directed connections originating at `(col, row)`.
fn connect_cell(
    col: usize,
    row: usize,
    rows: usize,
    config: &ClothConfig,
    initial_positions: &[Vec3],
    particles: &mut [Particle],
    springs: &mut Vec<Spring>,
) {
    let from = row + col * rows;
    for conn in &CONNECTIONS {
        let target_col = col as isize + conn.d_col;
        let target_row = row as isize + conn.d_row;
        if target_col < 0 || target_row < 0 || target_col >= rows as isize || target_row >= rows as isize {
            continue;
        }
        let to = target_row as usize + target_col as usize * rows;

        let spring_index = springs.len();
        springs.push(Spring::between(
            from as u32,
            to as u32,
            initial_positions,
            config.springs.get(conn.family),
            conn.family,
        ));
        particles[from].slots_mut(conn.family).set(conn.from_slot, spring_index);
        particles[to].slots_mut(conn.family).set(conn.to_slot, spring_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family_count(state: &ClothState, family: SpringFamily) -> usize {
        state.springs().iter().filter(|s| s.family == family).count()
    }

    #[test]
    fn four_by_four_family_counts() {
        let state = build(&ClothConfig::new(16)).unwrap();
        // r = 4: structural 2*4*3, shear 2*3^2, bending 2*4*2 and 2*2^2.
        assert_eq!(family_count(&state, SpringFamily::Structural), 24);
        assert_eq!(family_count(&state, SpringFamily::Shear), 18);
        assert_eq!(family_count(&state, SpringFamily::StructuralBending), 16);
        assert_eq!(family_count(&state, SpringFamily::ShearBending), 8);
    }

    #[test]
    fn tiny_grids_skip_missing_families() {
        // 2x2: structural and shear only.
        let state = build(&ClothConfig::new(4)).unwrap();
        assert_eq!(family_count(&state, SpringFamily::Structural), 4);
        assert_eq!(family_count(&state, SpringFamily::Shear), 2);
        assert_eq!(family_count(&state, SpringFamily::StructuralBending), 0);
        assert_eq!(family_count(&state, SpringFamily::ShearBending), 0);

        // Single particle: no springs at all.
        let state = build(&ClothConfig::new(1)).unwrap();
        assert_eq!(state.spring_count(), 0);
    }

    #[test]
    fn structural_slots_mirror() {
        let state = build(&ClothConfig::new(16)).unwrap();
        let a = state.index(1, 1);
        let b = state.index(1, 2);
        // (1,1) originated a structural spring toward (1,2): slot 0
        // mirrors into the target's slot 3.
        let spring_index = state.particles()[a].structural.get(0).unwrap();
        assert_eq!(state.particles()[b].structural.get(3), Some(spring_index));
        let s = &state.springs()[spring_index];
        assert_eq!((s.particle_a, s.particle_b), (a as u32, b as u32));
    }

    #[test]
    fn one_edge_is_pinned() {
        let state = build(&ClothConfig::new(16)).unwrap();
        for (i, p) in state.particles().iter().enumerate() {
            assert_eq!(p.fixed, i % state.rows() == 0, "particle {i}");
        }
    }
}
