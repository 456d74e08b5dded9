use std::{ops::{Sub, Mul}, fmt::{Display, Formatter, self}};

use serde::{Deserialize, Serialize};

/// A 2D point. For geographic data `x` is longitude and `y` is latitude.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct R2<D> {
    pub x: D,
    pub y: D,
}

/// Geographic coordinate: `x` = longitude, `y` = latitude.
pub type Coord = R2<f64>;

impl<D> R2<D> {
    pub fn new(x: D, y: D) -> Self {
        R2 { x, y }
    }
}

impl<D: Display> Display for R2<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl R2<f64> {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// z-component of `(a - self) × (b - self)`; positive when `self → a → b` turns left.
    pub fn cross(&self, a: &R2<f64>, b: &R2<f64>) -> f64 {
        let (u, v) = (*a - *self, *b - *self);
        u.x * v.y - u.y * v.x
    }

    /// Lexicographic order on (x, y), total over all f64 values.
    pub fn lex_cmp(&self, o: &R2<f64>) -> std::cmp::Ordering {
        self.x.total_cmp(&o.x).then_with(|| self.y.total_cmp(&o.y))
    }
}

impl<D: Sub<Output = D>> Sub for R2<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<D: Mul<D, Output = D> + Clone> Mul<D> for R2<D> {
    type Output = Self;
    fn mul(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x * rhs.clone(),
            y: self.y * rhs,
        }
    }
}
