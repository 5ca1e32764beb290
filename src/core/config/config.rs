use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, io, path::Path};

use crate::core::components::Polarity;

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            title: "Pachinko".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub y: f32,
}
impl Default for GravityConfig {
    fn default() -> Self {
        Self { y: -980.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Ball count after a reset (and at session start).
    pub starting_balls: i32,
    /// World-space y at which dropped balls appear.
    pub drop_height: f32,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_balls: 5,
            drop_height: 384.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub restitution: f32,
}
impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 22.0,
            restitution: 0.4,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: SpawnRange<f32>,
    pub height: f32,
    /// Rotation is drawn from `0..=max_rotation` radians.
    pub max_rotation: f32,
}
impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: SpawnRange {
                min: 16.0,
                max: 128.0,
            },
            height: 16.0,
            max_rotation: 3.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
}
impl Placement {
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    pub x: f32,
    pub y: f32,
    pub good: bool,
}
impl SlotPlacement {
    pub fn polarity(&self) -> Polarity {
        if self.good {
            Polarity::Good
        } else {
            Polarity::Bad
        }
    }
}

/// Static scene layout in world coordinates (origin at screen center, y up).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub slots: Vec<SlotPlacement>,
    pub slot_size: (f32, f32),
    pub bouncers: Vec<Placement>,
    pub bouncer_radius: f32,
    /// Angular speed of the decorative slot glow (radians / second).
    pub glow_spin: f32,
}
impl Default for LayoutConfig {
    fn default() -> Self {
        let slot = |x: f32, good: bool| SlotPlacement { x, y: -384.0, good };
        Self {
            slots: vec![
                slot(-384.0, true),
                slot(-128.0, false),
                slot(128.0, true),
                slot(384.0, false),
            ],
            slot_size: (200.0, 40.0),
            bouncers: [-512.0, -256.0, 0.0, 256.0, 512.0]
                .into_iter()
                .map(|x| Placement { x, y: -384.0 })
                .collect(),
            bouncer_radius: 48.0,
            glow_spin: std::f32::consts::PI / 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    pub enabled: bool,
    pub particle_count: usize,
    pub lifetime: f32,
    pub speed: f32,
}
impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            particle_count: 24,
            lifetime: 0.6,
            speed: 220.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gravity: GravityConfig,
    pub session: SessionConfig,
    pub ball: BallConfig,
    pub obstacle: ObstacleConfig,
    pub layout: LayoutConfig,
    pub effects: EffectsConfig,
    pub rapier_debug: bool,
    /// Fixed RNG seed for reproducible sessions; entropy-seeded when absent.
    pub seed: Option<u64>,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            gravity: Default::default(),
            session: Default::default(),
            ball: Default::default(),
            obstacle: Default::default(),
            layout: Default::default(),
            effects: Default::default(),
            rapier_debug: false,
            seed: None,
        }
    }
}

/// Suffix of `load_layered` errors for files that do not exist.
pub const MISSING_FILE: &str = "not found";

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Merge every readable file in order (later files override earlier keys) and
    /// deserialize the result. Never fails: returns defaults plus the collected errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    errors.push(format!("{}: {MISSING_FILE}", path_ref.display()))
                }
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.gravity.y >= 0.0 {
            w.push(format!(
                "gravity.y is {} ; balls will not fall toward the slots",
                self.gravity.y
            ));
        }
        if self.session.starting_balls <= 0 {
            w.push(format!(
                "session.starting_balls {} leaves no ball to drop after a reset",
                self.session.starting_balls
            ));
        }
        if self.session.drop_height.abs() > self.window.height {
            w.push(format!(
                "session.drop_height {} is outside the window",
                self.session.drop_height
            ));
        }
        if self.ball.radius <= 0.0 {
            w.push("ball.radius must be > 0".into());
        }
        if !(0.0..=1.5).contains(&self.ball.restitution) {
            w.push(format!(
                "ball.restitution {} outside recommended 0..1.5",
                self.ball.restitution
            ));
        }
        let width = &self.obstacle.width;
        if width.min > width.max {
            w.push(format!(
                "obstacle.width min ({}) greater than max ({})",
                width.min, width.max
            ));
        }
        if width.min <= 0.0 || self.obstacle.height <= 0.0 {
            w.push("obstacle dimensions must be > 0".into());
        }
        if self.obstacle.max_rotation < 0.0 {
            w.push("obstacle.max_rotation negative".into());
        }
        if self.layout.slots.is_empty() {
            w.push("layout.slots is empty; balls can never score".into());
        }
        if self.layout.slot_size.0 <= 0.0 || self.layout.slot_size.1 <= 0.0 {
            w.push("layout.slot_size must be > 0".into());
        }
        if self.layout.bouncer_radius <= 0.0 && !self.layout.bouncers.is_empty() {
            w.push("layout.bouncer_radius must be > 0".into());
        }
        if self.effects.enabled && self.effects.lifetime <= 0.0 {
            w.push("effects.lifetime must be > 0 when effects are enabled".into());
        }
        w
    }
}
