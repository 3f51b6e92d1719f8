/// Configuration for the boid simulation.
///
/// All speeds are in pixels per second and all accelerations in pixels per
/// second squared; every integration is scaled by `time_step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
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
    /// Initial velocity components are drawn from `[-initial_speed, initial_speed)`
    pub initial_speed: f32,
    pub aggressive_chance: f64,

    pub ship_radius: f32,
    pub ship_max_speed: f32,
    pub ship_acceleration: f32,
    /// Multiplier applied to the ship velocity after every step
    pub ship_damping: f32,
    pub rotation_step: f32,

    pub missile_speed: f32,
    pub missile_lifetime: f32,
    pub missile_radius: f32,
    /// Distance ahead of the ship centre where missiles appear
    pub missile_spawn_offset: f32,
    pub max_missiles: Option<usize>,

    pub score_per_kill: u32,
    pub initial_lives: u32,
}

impl Default for SimulationConfig {
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

impl SimulationConfig {
    pub fn canvas_center(&self) -> crate::Vector2D {
        crate::Vector2D::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }
}
