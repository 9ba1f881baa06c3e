mod geometry;
mod landmarks;
mod settings;
mod side;
mod world;

pub use geometry::*;
pub use landmarks::*;
pub use settings::*;
pub use side::*;
pub use world::*;

pub type Vector2 = nalgebra::Vector2<f64>;

/// A motor command for our player as it will be sent to the server.
///
/// Angles are in degrees with `+` clockwise, as the server expects them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotorCmd {
    /// Teleport to a position. Only allowed before kickoff.
    Move { x: f64, y: f64 },
    /// Kick the ball with the given power in a direction relative to the body.
    Kick { force: f64, angle: f64 },
    /// Accelerate forward with the given power.
    Dash { power: f64 },
    /// Rotate the body by the given moment.
    Turn { moment: f64 },
}

impl MotorCmd {
    /// The command name, as used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            MotorCmd::Move { .. } => "move",
            MotorCmd::Kick { .. } => "kick",
            MotorCmd::Dash { .. } => "dash",
            MotorCmd::Turn { .. } => "turn",
        }
    }

    /// The space separated arguments, rounded to hundredths.
    pub fn args(&self) -> String {
        let r = round_to_hundredths;
        match *self {
            MotorCmd::Move { x, y } => format!("{} {}", r(x), r(y)),
            MotorCmd::Kick { force, angle } => format!("{} {}", r(force), r(angle)),
            MotorCmd::Dash { power } => format!("{}", r(power)),
            MotorCmd::Turn { moment } => format!("{}", r(moment)),
        }
    }
}

impl std::fmt::Display for MotorCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.name(), self.args())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_cmd_wire_form() {
        assert_eq!(MotorCmd::Dash { power: 100.0 }.to_string(), "(dash 100)");
        assert_eq!(
            MotorCmd::Kick {
                force: 125.0,
                angle: -33.333333
            }
            .to_string(),
            "(kick 125 -33.33)"
        );
        assert_eq!(MotorCmd::Turn { moment: 90.0 }.args(), "90");
        assert_eq!(MotorCmd::Move { x: -15.0, y: 0.5 }.args(), "-15 0.5");
        assert_eq!(MotorCmd::Move { x: 0.0, y: 0.0 }.name(), "move");
    }
}
