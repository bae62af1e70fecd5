use serde::{Deserialize, Serialize};

/// Straight line piece given by two endpoint pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
}

impl Segment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            p0: [x1, y1],
            p1: [x2, y2],
        }
    }

    /// Build from the `(x1, y1, x2, y2)` integer tuple produced by line detectors.
    pub fn from_pixels(coords: [i32; 4]) -> Self {
        Self::new(
            coords[0] as f32,
            coords[1] as f32,
            coords[2] as f32,
            coords[3] as f32,
        )
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.p0[0], self.p0[1], self.p1[0], self.p1[1]]
    }

    /// `(y2 - y1) / (x2 - x1)`, or `None` for a vertical segment.
    pub fn slope(&self) -> Option<f32> {
        let dx = self.p1[0] - self.p0[0];
        if dx == 0.0 {
            return None;
        }
        Some((self.p1[1] - self.p0[1]) / dx)
    }

    pub fn length(&self) -> f32 {
        let dx = self.p1[0] - self.p0[0];
        let dy = self.p1[1] - self.p0[1];
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self) -> [f32; 2] {
        [
            (self.p0[0] + self.p1[0]) * 0.5,
            (self.p0[1] + self.p1[1]) * 0.5,
        ]
    }
}

/// Lane side a segment is assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaneSide {
    Left,
    Right,
}

impl std::fmt::Display for LaneSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaneSide::Left => write!(f, "left"),
            LaneSide::Right => write!(f, "right"),
        }
    }
}

/// One value per lane side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LanePair<T> {
    pub left: T,
    pub right: T,
}

impl<T> LanePair<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: LaneSide) -> &T {
        match side {
            LaneSide::Left => &self.left,
            LaneSide::Right => &self.right,
        }
    }

    pub fn as_ref(&self) -> LanePair<&T> {
        LanePair {
            left: &self.left,
            right: &self.right,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(LaneSide, T) -> U) -> LanePair<U> {
        LanePair {
            left: f(LaneSide::Left, self.left),
            right: f(LaneSide::Right, self.right),
        }
    }

    /// Iterate as `(side, value)` in left-then-right order.
    pub fn iter(&self) -> impl Iterator<Item = (LaneSide, &T)> {
        [(LaneSide::Left, &self.left), (LaneSide::Right, &self.right)].into_iter()
    }
}
