//! Lane travel direction.

/// Sense of travel along a horizontal lane.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Decreasing x (sign −1).
    Left,
    /// Increasing x (sign +1).
    #[default]
    Right,
}

impl Direction {
    /// `-1.0` for [`Direction::Left`], `+1.0` for [`Direction::Right`].
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left  => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Build from a signed value; negative means left, anything else right.
    #[inline]
    pub fn from_sign(sign: f64) -> Self {
        if sign < 0.0 { Direction::Left } else { Direction::Right }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left  => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
