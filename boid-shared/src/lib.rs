#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents a 2D position in canvas coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// What the renderer needs to draw a boid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoidView {
    pub position: Position,
    pub rotation: f32,
    pub aggressive: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShipView {
    pub position: Position,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MissileView {
    pub position: Position,
}

/// Read-only snapshot of the world after a step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub boids: Vec<BoidView>,
    pub ship: ShipView,
    /// Only missiles still in flight
    pub missiles: Vec<MissileView>,
    pub score: u32,
    pub lives: u32,
}

/// Discrete player requests produced by the input layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RotateLeft,
    RotateRight,
    Accelerate,
    Fire,
}

/// An action to apply before the step with the given tick runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledAction {
    pub tick: u64,
    pub action: Action,
}

/// Boid simulation configuration.
///
/// Missing fields fall back to the defaults, so a settings file only needs
/// the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub time_step: f32,

    pub flock_count: usize,
    pub max_speed: f32,
    pub max_force: f32,
    pub perception_radius: f32,
    pub cohesion_radius: f32,
    pub separation_radius: f32,
    pub ship_presence_factor: f32,
    pub boid_radius: f32,
    pub initial_speed: f32,
    pub aggressive_chance: f64,

    pub ship_radius: f32,
    pub ship_max_speed: f32,
    pub ship_acceleration: f32,
    pub ship_damping: f32,
    pub rotation_step: f32,

    pub missile_speed: f32,
    pub missile_lifetime: f32,
    pub missile_radius: f32,
    pub missile_spawn_offset: f32,
    pub max_missiles: Option<usize>,

    pub score_per_kill: u32,
    pub initial_lives: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            canvas_width: 840.0,
            canvas_height: 460.0,
            time_step: 1.0 / 60.0,

            flock_count: 25,
            max_speed: 180.0,
            max_force: 180.0,
            perception_radius: 65.0,
            cohesion_radius: 50.0,
            separation_radius: 40.0,
            ship_presence_factor: 5.0,
            boid_radius: 5.0,
            initial_speed: 60.0,
            aggressive_chance: 0.5,

            ship_radius: 10.0,
            ship_max_speed: 200.0,
            ship_acceleration: 500.0,
            ship_damping: 0.96,
            rotation_step: 0.1,

            missile_speed: 300.0,
            missile_lifetime: 3.0,
            missile_radius: 3.0,
            missile_spawn_offset: 15.0,
            max_missiles: None,

            score_per_kill: 10,
            initial_lives: 3,
        }
    }
}

#[cfg(feature = "std")]
impl SimulationSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0);
        let p2 = Position::new(3.0, 4.0);
        assert_eq!(p1.distance_to(&p2), 5.0);
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings =
            SimulationSettings::from_json(r#"{ "flock_count": 5, "max_missiles": 3 }"#).unwrap();
        assert_eq!(settings.flock_count, 5);
        assert_eq!(settings.max_missiles, Some(3));
        assert_eq!(settings.canvas_width, 840.0);
        assert_eq!(settings.missile_lifetime, 3.0);
    }

    #[test]
    fn test_bad_settings_are_rejected() {
        assert!(SimulationSettings::from_json(r#"{ "flock_count": "many" }"#).is_err());
    }

    #[test]
    fn test_action_names() {
        let script: Vec<ScheduledAction> = serde_json::from_str(
            r#"[{ "tick": 0, "action": "rotate_left" }, { "tick": 3, "action": "fire" }]"#,
        )
        .unwrap();
        assert_eq!(
            script,
            [
                ScheduledAction {
                    tick: 0,
                    action: Action::RotateLeft
                },
                ScheduledAction {
                    tick: 3,
                    action: Action::Fire
                },
            ]
        );
    }

    #[test]
    fn test_frame_serializes_views() {
        let frame = Frame {
            tick: 7,
            boids: vec![BoidView {
                position: Position::new(1.0, 2.0),
                rotation: 0.5,
                aggressive: true,
            }],
            ship: ShipView {
                position: Position::new(420.0, 230.0),
                rotation: 0.0,
            },
            missiles: Vec::new(),
            score: 10,
            lives: 3,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["boids"][0]["aggressive"], true);
        assert_eq!(json["ship"]["position"]["x"], 420.0);
        assert_eq!(json["score"], 10);
    }
}
