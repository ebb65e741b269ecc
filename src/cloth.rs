//! The cloth simulator: sub-step loop, parameter sync, read-only surface.

use std::fmt::Write as _;
use std::mem;

use glam::Vec3;

use crate::config::{ClothConfig, FamilyParams, FrameInput, SphereCollider};
use crate::error::ClothError;
use crate::kernel::{self, KernelParams};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::Spring;
use crate::state::ClothState;
use crate::topology;

/// Sub-steps per rendered frame. Each uses `dt / SUB_STEPS`, trading
/// extra dispatches for stiff-spring stability without an implicit
/// solver.
pub const SUB_STEPS: usize = 16;

/// A simulated cloth hanging from one pinned edge.
///
/// Owns the state store plus a scratch particle buffer. Each call to
/// [`step_frame`](ClothSim::step_frame) runs the 16 ordered sub-step
/// dispatches, swapping the scratch buffer in after each so every
/// dispatch reads only the previous sub-step's published state, then
/// runs parameter sync before returning — the next frame's first
/// dispatch can never overlap an unsynced spring array.
pub struct ClothSim {
    state: ClothState,
    scratch: Vec<Particle>,
    collider: Option<SphereCollider>,
}

impl ClothSim {
    /// Build a cloth from the configuration.
    ///
    /// Fails fast on configuration errors (non-square particle count,
    /// non-positive mass) rather than proceeding with degenerate
    /// geometry.
    pub fn new(config: &ClothConfig) -> Result<Self, ClothError> {
        let state = topology::build(config)?;
        let scratch = state.particles.clone();
        Ok(ClothSim {
            state,
            scratch,
            collider: None,
        })
    }

    /// Store a collider to use whenever a frame does not supply its own
    /// via [`FrameInput::with_collider`](crate::FrameInput::with_collider).
    pub fn set_collider(&mut self, collider: Option<SphereCollider>) {
        self.collider = collider;
    }

    /// Advance the simulation by one rendered frame.
    pub fn step_frame<O: StepObserver>(&mut self, input: &FrameInput, observer: &mut O) {
        let params = KernelParams {
            dt: input.dt / SUB_STEPS as f32,
            gravity_scale: input.gravity_scale,
            anchor_delta: input.anchor_position - self.state.anchor_origin,
            collider: input.collider.or(self.collider),
        };

        for substep in 0..SUB_STEPS {
            kernel::dispatch(&self.state, &mut self.scratch, &params);
            // Publish this sub-step's results; the old buffer becomes
            // scratch for the next dispatch.
            mem::swap(&mut self.state.particles, &mut self.scratch);
            observer.on_substep(substep);
        }

        self.sync_parameters(&input.springs);
        observer.on_parameter_sync();

        log::trace!(
            "stepped cloth frame: dt {}, {} substeps, {} springs resynced",
            input.dt,
            SUB_STEPS,
            self.state.springs.len(),
        );
        observer.on_frame_complete();
    }

    /// Rewrite every spring's live stiffness/damping from the current
    /// family parameters.
    ///
    /// Full-array rewrite every frame: fresh parameters always win over
    /// avoiding the round-trip.
    fn sync_parameters(&mut self, params: &FamilyParams) {
        for spring in self.state.springs.iter_mut() {
            let family = params.get(spring.family);
            spring.stiffness = family.stiffness;
            spring.damping = family.damping;
        }
    }

    /// Mark a particle fixed (anchored) or free, bounds-checked.
    ///
    /// A particle fixed after it has moved snaps back to its anchored
    /// home site on the next sub-step.
    pub fn set_fixed(&mut self, index: usize, fixed: bool) -> Result<(), ClothError> {
        let count = self.state.particles.len();
        let particle = self
            .state
            .particles
            .get_mut(index)
            .ok_or(ClothError::ParticleOutOfBounds { index, count })?;
        particle.fixed = fixed;
        if fixed {
            particle.velocity = Vec3::ZERO;
        }
        // Keep the scratch buffer's immutable fields in agreement.
        self.scratch[index].fixed = fixed;
        Ok(())
    }

    /// Mutable access to one particle, bounds-checked. Intended for
    /// setting up scenarios (displacing a particle, seeding a velocity);
    /// topology fields must not be touched, and pinning must go through
    /// [`set_fixed`](ClothSim::set_fixed) so both internal buffers agree.
    pub fn particle_mut(&mut self, index: usize) -> Result<&mut Particle, ClothError> {
        let count = self.state.particles.len();
        self.state
            .particles
            .get_mut(index)
            .ok_or(ClothError::ParticleOutOfBounds { index, count })
    }

    /// Textual dump of every particle's identifier and its four
    /// structural slot values, for external logging.
    pub fn structural_slot_report(&self) -> String {
        let mut report = String::new();
        for particle in self.state.particles() {
            let slots = particle.structural.0;
            let _ = writeln!(
                report,
                "id {}: {}, {}, {}, {}",
                particle.id, slots[0], slots[1], slots[2], slots[3],
            );
        }
        report
    }

    /// The state store, read-only.
    pub fn state(&self) -> &ClothState {
        &self.state
    }

    pub fn particles(&self) -> &[Particle] {
        self.state.particles()
    }

    pub fn springs(&self) -> &[Spring] {
        self.state.springs()
    }

    pub fn particle(&self, index: usize) -> Result<&Particle, ClothError> {
        self.state.particle(index)
    }

    /// Array index of the particle at grid site `(col, row)`.
    pub fn index(&self, col: usize, row: usize) -> usize {
        self.state.index(col, row)
    }
}
