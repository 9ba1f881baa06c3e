//! Fixed field landmarks ("flags") of the soccer server.
//!
//! Coordinates are in the flag table's own frame, where `+y` points to the top
//! touch line. Goal commands negate `y` when looking a name up; the shooting
//! logic uses the goal entries as they are.

use std::collections::HashMap;

use crate::{Side, Vector2};

/// Alias for the goal the agent attacks.
pub const OPPONENT_GOAL: &str = "goal_opp";
/// Alias for the goal the agent defends.
pub const OWN_GOAL: &str = "goal_own";

/// Distance of both goal lines from the center spot.
const GOAL_LINE_X: f64 = 52.5;

lazy_static::lazy_static! {
    static ref FLAGS: HashMap<&'static str, Vector2> = build_flags();
}

fn build_flags() -> HashMap<&'static str, Vector2> {
    let mut flags = HashMap::new();
    let mut add = |name: &'static str, x: f64, y: f64| {
        flags.insert(name, Vector2::new(x, y));
    };

    // Boundary flags along the top and bottom lines
    add("ftl50", -50.0, 39.0);
    add("ftl40", -40.0, 39.0);
    add("ftl30", -30.0, 39.0);
    add("ftl20", -20.0, 39.0);
    add("ftl10", -10.0, 39.0);
    add("ft0", 0.0, 39.0);
    add("ftr10", 10.0, 39.0);
    add("ftr20", 20.0, 39.0);
    add("ftr30", 30.0, 39.0);
    add("ftr40", 40.0, 39.0);
    add("ftr50", 50.0, 39.0);
    add("fbl50", -50.0, -39.0);
    add("fbl40", -40.0, -39.0);
    add("fbl30", -30.0, -39.0);
    add("fbl20", -20.0, -39.0);
    add("fbl10", -10.0, -39.0);
    add("fb0", 0.0, -39.0);
    add("fbr10", 10.0, -39.0);
    add("fbr20", 20.0, -39.0);
    add("fbr30", 30.0, -39.0);
    add("fbr40", 40.0, -39.0);
    add("fbr50", 50.0, -39.0);

    // Boundary flags behind the goal lines
    add("flt30", -57.5, 30.0);
    add("flt20", -57.5, 20.0);
    add("flt10", -57.5, 10.0);
    add("fl0", -57.5, 0.0);
    add("flb10", -57.5, -10.0);
    add("flb20", -57.5, -20.0);
    add("flb30", -57.5, -30.0);
    add("frt30", 57.5, 30.0);
    add("frt20", 57.5, 20.0);
    add("frt10", 57.5, 10.0);
    add("fr0", 57.5, 0.0);
    add("frb10", 57.5, -10.0);
    add("frb20", 57.5, -20.0);
    add("frb30", 57.5, -30.0);

    // Goals and goal posts
    add("gl", -GOAL_LINE_X, 0.0);
    add("gr", GOAL_LINE_X, 0.0);
    add("fglt", -52.5, 7.01);
    add("fglb", -52.5, -7.01);
    add("fgrt", 52.5, 7.01);
    add("fgrb", 52.5, -7.01);

    // Penalty areas
    add("fplt", -36.0, 20.15);
    add("fplc", -36.0, 0.0);
    add("fplb", -36.0, -20.15);
    add("fprt", 36.0, 20.15);
    add("fprc", 36.0, 0.0);
    add("fprb", 36.0, -20.15);

    // Corners and center line
    add("flt", -52.5, 34.0);
    add("fct", 0.0, 34.0);
    add("frt", 52.5, 34.0);
    add("flb", -52.5, -34.0);
    add("fcb", 0.0, -34.0);
    add("frb", 52.5, -34.0);
    add("fc", 0.0, 0.0);

    flags
}

/// Name → coordinate lookup for field landmarks.
///
/// The table itself is immutable; only the goal aliases depend on the side
/// passed to [`Landmarks::resolve`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Landmarks;

impl Landmarks {
    pub fn new() -> Self {
        Self
    }

    /// Look up a landmark by its exact name.
    pub fn resolve(&self, name: &str, side: Side) -> Option<Vector2> {
        match name {
            OPPONENT_GOAL => Some(self.opponent_goal(side)),
            OWN_GOAL => Some(self.own_goal(side)),
            _ => FLAGS.get(name).copied(),
        }
    }

    /// The goal the agent attacks.
    pub fn opponent_goal(&self, side: Side) -> Vector2 {
        match side {
            Side::Left => Vector2::new(GOAL_LINE_X, 0.0),
            Side::Right => Vector2::new(-GOAL_LINE_X, 0.0),
        }
    }

    /// The goal the agent defends.
    pub fn own_goal(&self, side: Side) -> Vector2 {
        self.opponent_goal(side.opposite())
    }

    /// All plain landmark names, sorted. Aliases are not included.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = FLAGS.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
