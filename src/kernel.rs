//! Force/integration kernel: the per-particle, per-sub-step update.

use glam::Vec3;
use rayon::prelude::*;

use crate::config::SphereCollider;
use crate::particle::Particle;
use crate::state::ClothState;

/// Below this length a spring's axis direction is undefined and its
/// force contribution is skipped.
pub const LENGTH_EPS: f32 = 1e-6;

/// Standard gravity, m/s^2.
const GRAVITY: f32 = 9.81;

/// Uniform inputs for one sub-step dispatch.
#[derive(Clone, Copy, Debug)]
pub(crate) struct KernelParams {
    /// Sub-step timestep (`frame_dt / SUB_STEPS`).
    pub dt: f32,
    pub gravity_scale: f32,
    /// Anchor translation since construction; fixed particles sit at
    /// their built position offset by this.
    pub anchor_delta: Vec3,
    pub collider: Option<SphereCollider>,
}

/// One sub-step: update every particle from the previous sub-step's
/// published state into `scratch`.
///
/// Each particle's update reads only previous-step positions and
/// velocities, never another particle's in-progress value, so the
/// per-particle tasks are independent and run across the rayon pool in
/// any order. The caller swaps `scratch` in afterwards; immutable fields
/// (id, mass, slots) are already identical in both buffers.
pub(crate) fn dispatch(state: &ClothState, scratch: &mut [Particle], params: &KernelParams) {
    debug_assert_eq!(scratch.len(), state.particles.len());
    scratch.par_iter_mut().enumerate().for_each(|(index, out)| {
        let (position, velocity) = integrate_particle(index, state, params);
        out.position = position;
        out.velocity = velocity;
    });
}

/// Compute the new position and velocity of one particle.
///
/// Non-fixed particles accumulate spring-damper forces over every
/// occupied slot of all four families, add gravity, integrate with
/// semi-implicit Euler, and finally get projected out of the collider
/// sphere (a positional clamp, not a force). Fixed particles track the
/// anchor instead and carry zero velocity.
pub(crate) fn integrate_particle(
    index: usize,
    state: &ClothState,
    params: &KernelParams,
) -> (Vec3, Vec3) {
    let particle = &state.particles[index];

    if particle.fixed {
        let home = state.placement.transform_point3(state.initial_positions[index]);
        return (home + params.anchor_delta, Vec3::ZERO);
    }

    let mut force = accumulate_spring_forces(particle, state);
    force.y -= particle.mass * params.gravity_scale * GRAVITY;

    // Semi-implicit Euler: position advances by the *new* velocity.
    let velocity = particle.velocity + force / particle.mass * params.dt;
    let mut position = particle.position + velocity * params.dt;

    if let Some(collider) = params.collider {
        position = resolve_sphere(position, collider);
    }

    (position, velocity)
}

/// Sum the Hookean and damping terms over the particle's connected
/// springs, reading the other endpoint's previous-step state.
fn accumulate_spring_forces(particle: &Particle, state: &ClothState) -> Vec3 {
    let mut force = Vec3::ZERO;
    for spring_index in particle.spring_indices() {
        let spring = &state.springs[spring_index];
        let other = &state.particles[spring.other_end(particle.id) as usize];

        let delta = other.position - particle.position;
        let length = delta.length();
        if length < LENGTH_EPS {
            // Degenerate axis; skip rather than divide by ~zero.
            continue;
        }
        let axis = delta / length;

        let hooke = spring.stiffness * (length - spring.rest_length);
        let relative_velocity = other.velocity - particle.velocity;
        let damping = spring.damping * relative_velocity.dot(axis);
        force += axis * (hooke + damping);
    }
    force
}

/// Project a position radially onto the collider surface if it ended up
/// inside the sphere.
fn resolve_sphere(position: Vec3, collider: SphereCollider) -> Vec3 {
    if collider.radius <= 0.0 {
        return position;
    }
    let offset = position - collider.center;
    let distance = offset.length();
    if distance >= collider.radius {
        return position;
    }
    if distance < LENGTH_EPS {
        // Coincident with the center; pick a stable direction.
        return collider.center + Vec3::Y * collider.radius;
    }
    collider.center + offset / distance * collider.radius
}
