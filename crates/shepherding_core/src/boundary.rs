//! Arena walls and the pen fence.
//!
//! Coordinates grow downward, so "top" is the smaller `y`. A crossing clamps
//! the agent one unit back inside and turns it by a quarter turn chosen from
//! the quadrant its heading falls in.

use crate::config::{ArenaConfig, PenConfig};
use crate::geometry::reflect_angle;
use shepherding_data::{Body, Vec2};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const THREE_HALF_PI: f64 = 3.0 * FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// Quarter-turn applied to an orientation in `[0, 2π)` after hitting this wall.
    #[must_use]
    pub fn deflect(self, o: f64) -> f64 {
        match self {
            Wall::Left => {
                if (FRAC_PI_2..PI).contains(&o) {
                    o - FRAC_PI_2
                } else if (PI..=THREE_HALF_PI).contains(&o) {
                    o + FRAC_PI_2
                } else {
                    o
                }
            }
            Wall::Right => {
                if (THREE_HALF_PI..TAU).contains(&o) {
                    o - FRAC_PI_2
                } else if (0.0..=FRAC_PI_2).contains(&o) {
                    o + FRAC_PI_2
                } else {
                    o
                }
            }
            Wall::Top => {
                if o > PI && o <= THREE_HALF_PI {
                    o - FRAC_PI_2
                } else if o > THREE_HALF_PI && o <= TAU {
                    o + FRAC_PI_2
                } else {
                    o
                }
            }
            Wall::Bottom => {
                if (FRAC_PI_2..=PI).contains(&o) {
                    o + FRAC_PI_2
                } else if (0.0..FRAC_PI_2).contains(&o) {
                    o - FRAC_PI_2
                } else {
                    o
                }
            }
        }
    }
}

fn bounce(body: &mut Body, wall: Wall) {
    body.orientation = wall.deflect(body.orientation);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Arena {
    #[must_use]
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self {
            min_x: config.padding,
            max_x: config.padding + config.width,
            min_y: config.padding,
            max_y: config.padding + config.height,
        }
    }

    /// True when `p` lies within the walls shrunk by `inset`.
    #[must_use]
    pub fn contains(&self, p: Vec2, inset: f64) -> bool {
        p.x >= self.min_x + inset
            && p.x <= self.max_x - inset
            && p.y >= self.min_y + inset
            && p.y <= self.max_y - inset
    }

    /// Checks left, right, top and bottom walls in order.
    pub fn reflect(&self, body: &mut Body) {
        body.orientation = reflect_angle(body.orientation);
        if body.position.x < self.min_x {
            body.position.x = self.min_x + 1.0;
            bounce(body, Wall::Left);
        }
        if body.position.x > self.max_x {
            body.position.x = self.max_x - 1.0;
            bounce(body, Wall::Right);
        }
        if body.position.y < self.min_y {
            body.position.y = self.min_y + 1.0;
            bounce(body, Wall::Top);
        }
        if body.position.y > self.max_y {
            body.position.y = self.max_y - 1.0;
            bounce(body, Wall::Bottom);
        }
        body.orientation = reflect_angle(body.orientation);
    }
}

/// Which side of the fence an agent is kept on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceSide {
    Outside,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub corner: Vec2,
    pub size: f64,
    pub fence_width: f64,
    pub gate_inset: f64,
}

impl Pen {
    #[must_use]
    pub fn from_config(config: &PenConfig) -> Self {
        Self {
            corner: Vec2::new(config.corner_x, config.corner_y),
            size: config.size,
            fence_width: config.fence_width,
            gate_inset: config.gate_inset,
        }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.corner.x - self.size
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.corner.y - self.size
    }

    #[must_use]
    pub fn centre(&self) -> Vec2 {
        Vec2::new(
            self.corner.x - self.size / 2.0,
            self.corner.y - self.size / 2.0,
        )
    }

    /// The containment predicate that decides a sheep's state.
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.y >= self.top()
    }

    /// Gate used by sheep, measured from the anchoring corner.
    #[must_use]
    pub fn sheep_gate(&self) -> Vec2 {
        Vec2::new(
            self.corner.x - self.gate_inset,
            self.corner.y - self.gate_inset,
        )
    }

    /// Gate used by shepherds, measured from the pen centre.
    #[must_use]
    pub fn shepherd_gate(&self) -> Vec2 {
        let c = self.centre();
        Vec2::new(c.x - self.gate_inset, c.y - self.gate_inset)
    }

    /// Distance from `p` to the pen rectangle, zero inside it.
    #[must_use]
    pub fn distance_to(&self, p: Vec2) -> f64 {
        let dx = (self.left() - p.x).max(0.0);
        let dy = (self.top() - p.y).max(0.0);
        dx.hypot(dy)
    }

    /// Keeps `body` on `side` of the left and top fences. The left fence covers
    /// `y >= gate.y` and the top fence covers `x >= gate.x`.
    pub fn reflect(&self, body: &mut Body, side: FenceSide, gate: Vec2) {
        let fw = self.fence_width;
        let (left, top) = (self.left(), self.top());
        body.orientation = reflect_angle(body.orientation);
        match side {
            FenceSide::Outside => {
                if body.position.x > left - fw && body.position.y >= gate.y {
                    body.position.x = left - fw - 1.0;
                    bounce(body, Wall::Right);
                }
                if body.position.y > top - fw && body.position.x >= gate.x {
                    body.position.y = top - fw - 1.0;
                    bounce(body, Wall::Bottom);
                }
            }
            FenceSide::Inside => {
                if body.position.x < left + fw && body.position.y >= gate.y {
                    body.position.x = left + fw + 1.0;
                    bounce(body, Wall::Left);
                }
                if body.position.y < top + fw && body.position.x >= gate.x {
                    body.position.y = top + fw + 1.0;
                    bounce(body, Wall::Top);
                }
            }
        }
        body.orientation = reflect_angle(body.orientation);
    }
}
