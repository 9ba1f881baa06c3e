use striker_core::Vector2;

/// What a reach/follow goal is chasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSubject {
    Ball,
    Player { team: String, id: u32 },
}

impl std::fmt::Display for TargetSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetSubject::Ball => write!(f, "ball"),
            TargetSubject::Player { team, id } => write!(f, "{team} {id}"),
        }
    }
}

/// A goal waiting in the action queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Travel to a fixed point. With `requires_ball` the ball is carried there.
    Goto { target: Vector2, requires_ball: bool },
    /// Travel to an object that is looked up in every tick's perception.
    ///
    /// `continuous` goals (follow) do not finish when the object is reached.
    /// `target` caches the last position the object was seen at.
    ReachFollow {
        subject: TargetSubject,
        continuous: bool,
        requires_ball: bool,
        target: Option<Vector2>,
    },
}

impl Action {
    pub fn goto(target: Vector2, requires_ball: bool) -> Self {
        Action::Goto {
            target,
            requires_ball,
        }
    }

    /// A reach (`continuous == false`) or follow goal issued by a command.
    ///
    /// Commanded goals on the ball carry it, so they go through the dribbling
    /// logic once the ball is in reach.
    pub fn reach_follow(subject: TargetSubject, continuous: bool) -> Self {
        let requires_ball = subject == TargetSubject::Ball;
        Action::ReachFollow {
            subject,
            continuous,
            requires_ball,
            target: None,
        }
    }

    /// The plain "run to the ball" goal inserted when a ball goal finds the
    /// ball out of reach. It never replans itself.
    pub fn chase_ball() -> Self {
        Action::ReachFollow {
            subject: TargetSubject::Ball,
            continuous: false,
            requires_ball: false,
            target: None,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Action::ReachFollow {
                continuous: true,
                ..
            }
        )
    }

    pub fn requires_ball(&self) -> bool {
        match self {
            Action::Goto { requires_ball, .. } | Action::ReachFollow { requires_ball, .. } => {
                *requires_ball
            }
        }
    }

    /// The point this goal currently heads for, if known.
    pub fn target(&self) -> Option<Vector2> {
        match self {
            Action::Goto { target, .. } => Some(*target),
            Action::ReachFollow { target, .. } => *target,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Goto {
                target,
                requires_ball,
            } => write!(f, "goto ({}, {}) ball={}", target.x, target.y, requires_ball),
            Action::ReachFollow {
                subject,
                continuous,
                ..
            } => {
                let verb = if *continuous { "follow" } else { "reach" };
                write!(f, "{verb} {subject}")
            }
        }
    }
}
