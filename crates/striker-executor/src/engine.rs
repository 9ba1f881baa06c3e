use striker_core::{
    bearing_to, distance, AgentState, BehaviorSettings, Landmarks, MotorCmd, ObjectKind,
    PerceivedObject, Vector2,
};

use crate::{
    action::{Action, TargetSubject},
    queue::ActionQueue,
};

/// What evaluating the active goal asks for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// Send a command, keep the plan as it is.
    Emit(MotorCmd),
    /// Do nothing this tick.
    Idle,
    /// The active goal is reached: drop it and do nothing this tick.
    Done,
    /// The ball is out of reach: put a ball chase in front of the active goal
    /// and do nothing this tick.
    FetchBall,
}

/// Turns the active goal of the plan and the current perception into at most
/// one motor command per tick.
///
/// In order of priority:
/// 1. With the ball at our feet and the opponent goal in range, shoot.
/// 2. With an empty plan, idle.
/// 3. Otherwise work on the front goal of the plan, popping it when it is
///    reached and inserting a ball chase when a ball goal lost the ball.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    settings: BehaviorSettings,
    landmarks: Landmarks,
}

impl DecisionEngine {
    pub fn new(settings: BehaviorSettings) -> Self {
        Self {
            settings,
            landmarks: Landmarks::new(),
        }
    }

    /// Decide on this tick's command. `None` means idle.
    pub fn tick(
        &self,
        agent: &AgentState,
        perception: &[PerceivedObject],
        queue: &mut ActionQueue,
    ) -> Option<MotorCmd> {
        if let Some(shot) = self.shoot(agent, perception) {
            return Some(shot);
        }

        let step = match queue.front_mut()? {
            Action::Goto {
                target,
                requires_ball,
            } => self.evaluate_goto(agent, perception, *target, *requires_ball, false),
            Action::ReachFollow {
                subject,
                continuous,
                requires_ball,
                target,
            } => self.evaluate_follow(
                agent,
                perception,
                subject,
                target,
                *continuous,
                *requires_ball,
            ),
        };

        match step {
            Step::Emit(cmd) => Some(cmd),
            Step::Idle => None,
            Step::Done => {
                if let Some(action) = queue.pop_front() {
                    log::debug!("Reached goal: {}", action);
                }
                None
            }
            Step::FetchBall => {
                log::debug!("Ball out of reach, fetching it first");
                queue.push_front(Action::chase_ball());
                None
            }
        }
    }

    /// Shoot at the opponent goal if the ball is at our feet and the goal is close enough.
    fn shoot(&self, agent: &AgentState, perception: &[PerceivedObject]) -> Option<MotorCmd> {
        if !self.ball_is_near(agent, perception) {
            return None;
        }
        let goal = self.landmarks.opponent_goal(agent.side);
        if distance(agent.position, goal) > self.settings.max_goal_dist {
            return None;
        }
        let angle = bearing_to(agent.position, agent.forward, goal).ok()?;
        Some(MotorCmd::Kick {
            force: self.settings.kick_force,
            angle: -angle,
        })
    }

    fn ball_is_near(&self, agent: &AgentState, perception: &[PerceivedObject]) -> bool {
        find_subject(perception, &TargetSubject::Ball)
            .map(|ball| distance(agent.position, ball.position) <= self.settings.dist_ball)
            .unwrap_or(false)
    }

    fn evaluate_follow(
        &self,
        agent: &AgentState,
        perception: &[PerceivedObject],
        subject: &TargetSubject,
        cached_target: &mut Option<Vector2>,
        continuous: bool,
        requires_ball: bool,
    ) -> Step {
        let Some(object) = find_subject(perception, subject) else {
            log::debug!("{} not in view, searching", subject);
            return Step::Emit(MotorCmd::Turn {
                moment: self.settings.search_angle,
            });
        };
        *cached_target = Some(object.position);
        self.evaluate_goto(agent, perception, object.position, requires_ball, continuous)
    }

    fn evaluate_goto(
        &self,
        agent: &AgentState,
        perception: &[PerceivedObject],
        target: Vector2,
        requires_ball: bool,
        continuous: bool,
    ) -> Step {
        let s = &self.settings;
        let dist = distance(agent.position, target);

        if dist <= s.dist_ball && !continuous {
            return Step::Done;
        }

        if requires_ball {
            if dist <= s.dist_flag {
                return Step::Done;
            }
            if !self.ball_is_near(agent, perception) {
                return Step::FetchBall;
            }
            return match bearing_to(agent.position, agent.forward, target) {
                Ok(angle) => Step::Emit(MotorCmd::Kick {
                    force: s.dribble_force,
                    angle: -angle,
                }),
                Err(_) => Step::Idle,
            };
        }

        // Standing on the target counts as arrived
        let Ok(angle) = bearing_to(agent.position, agent.forward, target) else {
            return Step::Idle;
        };
        if angle.abs() > s.follow_angle {
            Step::Emit(MotorCmd::Turn { moment: -angle })
        } else if dist > s.dist_ball {
            Step::Emit(MotorCmd::Dash { power: s.speed })
        } else {
            Step::Idle
        }
    }
}

/// The first perceived object matching the subject.
fn find_subject<'a>(
    perception: &'a [PerceivedObject],
    subject: &TargetSubject,
) -> Option<&'a PerceivedObject> {
    perception.iter().find(|object| match subject {
        TargetSubject::Ball => object.kind == ObjectKind::Ball,
        TargetSubject::Player { team, id } => object.is_player(team, *id),
    })
}
