//! Mass-spring cloth simulation with a data-parallel integration kernel.
//!
//! `weft` simulates a rectangular cloth as a square grid of point masses
//! connected by four families of spring-dampers (structural, shear, and
//! their skip-one bending variants), hanging from one pinned edge and
//! colliding with a moving sphere.
//!
//! # Features
//!
//! - **Cross-referenced topology**: every spring is stored once and
//!   referenced from both endpoints through fixed 4-slot family vectors
//! - **Data-parallel kernel**: per-particle force/integration update with
//!   no cross-particle dependency, dispatched over a rayon thread pool
//! - **Sub-stepped integration**: 16 semi-implicit Euler sub-steps per
//!   frame for stiff-spring stability without an implicit solver
//! - **Live retuning**: per-family stiffness/damping rewritten into the
//!   spring array every frame from designer-editable parameters
//! - **Observable**: monitor frame phases via the [`StepObserver`] trait

pub mod cloth;
pub mod config;
pub mod error;
pub mod kernel;
pub mod observer;
pub mod particle;
pub mod spring;
pub mod state;
pub mod topology;

// Re-export primary API
pub use cloth::{ClothSim, SUB_STEPS};
pub use config::{ClothConfig, FamilyParams, FrameInput, SphereCollider, SpringParams};
pub use error::ClothError;
pub use observer::{NoOpStepObserver, StepObserver};
pub use particle::{Particle, SlotVec, NO_SPRING};
pub use spring::{Spring, SpringFamily};
pub use state::ClothState;
