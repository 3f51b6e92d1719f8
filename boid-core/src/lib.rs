#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking swarm simulation: boids that steer around a player ship and get
//! shot down by its missiles.
//!
//! The host owns a [`Simulation`], feeds it [`Command`]s between frames and
//! calls [`Simulation::step`] once per fixed time step. Everything else
//! (drawing, raw input, wiring) lives outside this crate.

extern crate alloc;

pub mod behavior;
pub mod collision;
pub mod config;
pub mod entity;
pub mod factory;
pub mod simulation;
pub mod vector;

pub use behavior::{Flocking, FlockingForces, Pursuit, SteeringBehavior, SteeringStrategy};
pub use config::SimulationConfig;
pub use entity::{EntityId, ObjectKind, SpaceObject};
#[cfg(feature = "std")]
pub use factory::BoidFactory;
pub use factory::MissileFactory;
pub use simulation::{Command, DestroyedBoid, Simulation, StepReport};
pub use vector::Vector2D;
