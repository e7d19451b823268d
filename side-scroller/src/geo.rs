//! Simple geometry primitives.

use crate::sprites::Drawable;

/// A tiny position vector in screen space.
///
/// Positions are fractional so that sub-pixel velocities (gravity) accumulate correctly. They are
/// rounded when drawing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A tiny rectangle based on two absolute `Vec2`s.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Rect {
    pub(crate) p1: Vec2,
    pub(crate) p2: Vec2,
}

impl Vec2 {
    /// Create a new vector.
    pub const fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    /// Round to the nearest pixel.
    pub(crate) fn to_pixel(self) -> (isize, isize) {
        (self.x.round() as isize, self.y.round() as isize)
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl core::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl core::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

impl Rect {
    /// Create a rectangle from a position and a `Drawable` drawn at `scale`.
    pub(crate) fn from_drawable<D>(pos: Vec2, drawable: &D, scale: usize) -> Rect
    where
        D: Drawable,
    {
        let size = Vec2::new(drawable.width() as f32, drawable.height() as f32) * scale as f32;

        Rect {
            p1: pos,
            p2: pos + size,
        }
    }
}
