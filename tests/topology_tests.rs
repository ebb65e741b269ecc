use approx::assert_relative_eq;
use glam::{Affine3A, Quat, Vec3};
use weft::{ClothConfig, ClothError, ClothSim, FrameInput, SpringFamily};

/// Every spring must be referenced exactly twice: once from each
/// endpoint's family vector, in different slot components.
#[test]
fn adjacency_symmetry_holds() {
    let sim = ClothSim::new(&ClothConfig::new(64)).unwrap();
    let state = sim.state();

    let mut references: Vec<Vec<(usize, usize)>> = vec![Vec::new(); state.spring_count()];
    for (particle_index, particle) in state.particles().iter().enumerate() {
        for family in SpringFamily::ALL {
            for slot in 0..4 {
                if let Some(spring_index) = particle.slots(family).get(slot) {
                    references[spring_index].push((particle_index, slot));
                }
            }
        }
    }

    for (spring_index, refs) in references.iter().enumerate() {
        let spring = &state.springs()[spring_index];
        assert_eq!(
            refs.len(),
            2,
            "spring {} should be referenced exactly twice, found {:?}",
            spring_index,
            refs,
        );
        let endpoints = [refs[0].0, refs[1].0];
        assert!(
            endpoints.contains(&(spring.particle_a as usize))
                && endpoints.contains(&(spring.particle_b as usize)),
            "spring {} referenced by non-endpoint particles {:?}",
            spring_index,
            endpoints,
        );
        assert_ne!(
            refs[0].1, refs[1].1,
            "spring {} must occupy different slot components at its two endpoints",
            spring_index,
        );
    }
}

#[test]
fn family_counts_match_grid_formulas() {
    for rows in [4usize, 8] {
        let sim = ClothSim::new(&ClothConfig::new(rows * rows)).unwrap();
        let count = |family: SpringFamily| {
            sim.springs().iter().filter(|s| s.family == family).count()
        };
        assert_eq!(count(SpringFamily::Structural), 2 * rows * (rows - 1), "structural, r={rows}");
        assert_eq!(count(SpringFamily::Shear), 2 * (rows - 1) * (rows - 1), "shear, r={rows}");
        assert_eq!(
            count(SpringFamily::StructuralBending),
            2 * rows * (rows - 2),
            "structural bending, r={rows}",
        );
        assert_eq!(
            count(SpringFamily::ShearBending),
            2 * (rows - 2) * (rows - 2),
            "shear bending, r={rows}",
        );
        assert!(sim.springs().len() <= 8 * rows * rows);
    }
}

/// Rest lengths come from the initial-position frame and stay put no
/// matter how far the particles move.
#[test]
fn rest_lengths_are_invariant_under_motion() {
    let config = ClothConfig::new(16);
    let mut sim = ClothSim::new(&config).unwrap();

    let expected: Vec<f32> = sim
        .springs()
        .iter()
        .map(|s| {
            let initial = sim.state().initial_positions();
            initial[s.particle_a as usize].distance(initial[s.particle_b as usize])
        })
        .collect();

    // Let the cloth drape for a while.
    let input = FrameInput::new(1.0 / 60.0, &config);
    for _ in 0..60 {
        sim.step_frame(&input, &mut weft::NoOpStepObserver);
    }

    for (spring, expected) in sim.springs().iter().zip(&expected) {
        assert_relative_eq!(spring.rest_length, expected);
    }
}

/// With identity placement the rest lengths are exact unit multiples.
#[test]
fn rest_lengths_are_unit_multiples() {
    let sim = ClothSim::new(&ClothConfig::new(64)).unwrap();
    for spring in sim.springs() {
        let expected = match spring.family {
            SpringFamily::Structural => 1.0,
            SpringFamily::Shear => 2.0f32.sqrt(),
            SpringFamily::StructuralBending => 2.0,
            SpringFamily::ShearBending => 2.0 * 2.0f32.sqrt(),
        };
        assert_relative_eq!(spring.rest_length, expected, epsilon = 1e-6);
    }
}

/// Placement only moves the world positions; the rest-length frame is
/// untouched by it.
#[test]
fn placement_does_not_affect_rest_lengths() {
    let placement = Affine3A::from_scale_rotation_translation(
        Vec3::splat(2.5),
        Quat::from_rotation_y(0.7),
        Vec3::new(10.0, -3.0, 4.0),
    );
    let config = ClothConfig::new(16).with_placement(placement);
    let sim = ClothSim::new(&config).unwrap();
    for spring in sim.springs() {
        assert!(spring.rest_length <= 2.0 * 2.0f32.sqrt() + 1e-5);
    }
    // World positions did move.
    let p0 = sim.particle(0).unwrap();
    assert!(p0.position.distance(Vec3::ZERO) > 1.0);
}

#[test]
fn one_full_edge_is_pinned_with_stride_rows() {
    let sim = ClothSim::new(&ClothConfig::new(64)).unwrap();
    let rows = sim.state().rows();
    let fixed: Vec<usize> = sim
        .particles()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.fixed)
        .map(|(i, _)| i)
        .collect();
    let expected: Vec<usize> = (0..64).step_by(rows).collect();
    assert_eq!(fixed, expected);
}

#[test]
fn particle_ids_are_stable_indices() {
    let sim = ClothSim::new(&ClothConfig::new(16)).unwrap();
    for (index, particle) in sim.particles().iter().enumerate() {
        assert_eq!(particle.id as usize, index);
    }
}

#[test]
fn construction_rejects_bad_configs() {
    assert_eq!(
        ClothSim::new(&ClothConfig::new(12)).err(),
        Some(ClothError::InvalidParticleCount(12)),
    );
    assert_eq!(
        ClothSim::new(&ClothConfig::new(16).with_mass(-1.0)).err(),
        Some(ClothError::InvalidMass(-1.0)),
    );
}

#[test]
fn slot_report_lists_every_particle() {
    let sim = ClothSim::new(&ClothConfig::new(16)).unwrap();
    let report = sim.structural_slot_report();
    assert_eq!(report.lines().count(), 16);
    assert!(report.starts_with("id 0:"));
    // Corner particle (last row, last col) originated nothing; its
    // structural vector holds only mirrored or empty slots.
    let last = report.lines().last().unwrap();
    assert!(last.starts_with("id 15: -1, -1"), "unexpected line: {last}");
}
