use bevy::prelude::*;
use rand::Rng;

/// Which way a slot moves the score and ball count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Good,
    Bad,
}

impl Polarity {
    /// Change applied to both score and balls remaining when a ball lands here.
    #[inline]
    pub fn delta(self) -> i32 {
        match self {
            Polarity::Good => 1,
            Polarity::Bad => -1,
        }
    }
}

/// Category tag carried by every collider the session controller reacts to.
/// Contacts are classified by this tag, never by entity identity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Bouncer,
    Slot(Polarity),
    Obstacle,
    Ball,
}

/// Cosmetic ball color. Drawn uniformly from the fixed palette on spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColor {
    Red,
    Blue,
    Green,
    Cyan,
    Purple,
    Yellow,
    Grey,
}

impl BallColor {
    pub const ALL: [BallColor; 7] = [
        BallColor::Red,
        BallColor::Blue,
        BallColor::Green,
        BallColor::Cyan,
        BallColor::Purple,
        BallColor::Yellow,
        BallColor::Grey,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Full width/height of box bodies (slots, obstacles).
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone, PartialEq)]
pub struct BoxSize(pub Vec2);

/// Random tint rolled for a player-placed obstacle.
#[derive(Component, Debug, Deref, Copy, Clone, PartialEq)]
pub struct Tint(pub Color);

/// Decorative glow drawn under a slot base. Has no collider.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGlow(pub Polarity);

/// Constant angular velocity (radians / second) for cosmetic rotation.
#[derive(Component, Debug, Deref, Copy, Clone, PartialEq)]
pub struct Spin(pub f32);
