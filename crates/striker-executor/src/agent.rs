use striker_core::{
    AgentState, BehaviorSettings, Landmarks, MotorCmd, PerceivedObject, Snapshot,
};

use crate::{
    engine::DecisionEngine,
    parser::{CommandParser, ParseError},
    queue::ActionQueue,
};

/// Summary of one command batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Commands that changed (or could have changed) the plan
    pub applied: usize,
    /// Commands that were not recognized
    pub ignored: usize,
    /// One entry per rejected command
    pub errors: Vec<ParseError>,
}

/// One player's behavior: its plan, the latest perception and the logic that
/// turns both into motor commands.
///
/// Command batches and ticks both take `&mut self`, so the plan is never
/// changed by a batch halfway through a tick or the other way around.
pub struct Agent {
    state: AgentState,
    perception: Vec<PerceivedObject>,
    queue: ActionQueue,
    parser: CommandParser,
    engine: DecisionEngine,
}

impl Agent {
    pub fn new(settings: BehaviorSettings, state: AgentState) -> Self {
        Self {
            state,
            perception: Vec::new(),
            queue: ActionQueue::new(),
            parser: CommandParser::new(settings.clone()),
            engine: DecisionEngine::new(settings),
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AgentState {
        &mut self.state
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    /// Parse a `;` separated command batch and apply it to the plan, left to right.
    pub fn handle_commands(&mut self, text: &str) -> BatchReport {
        let mut report = BatchReport::default();
        for parsed in self.parser.parse_batch(text, self.state.side) {
            match parsed.result {
                Ok(Some(command)) => {
                    log::debug!("Applying `{}`", parsed.line);
                    command.apply(&mut self.queue);
                    report.applied += 1;
                }
                Ok(None) => {
                    log::debug!("Ignoring unknown command `{}`", parsed.line);
                    report.ignored += 1;
                }
                Err(err) => {
                    log::error!("Rejected command `{}`: {}", parsed.line, err);
                    if matches!(err, ParseError::UnknownLandmark(_)) {
                        log::info!("Known landmarks: {}", Landmarks::new().names().join(" "));
                    }
                    report.errors.push(err);
                }
            }
        }
        log::info!("Plan has {} goal(s)", self.queue.len());
        report
    }

    /// Replace the perception with a new snapshot.
    ///
    /// The side and the kickoff turn are assigned at startup and survive
    /// updates.
    pub fn update(&mut self, snapshot: Snapshot) {
        if snapshot.agent.side != self.state.side {
            log::warn!(
                "Snapshot says we play {}, keeping assigned side {}",
                snapshot.agent.side,
                self.state.side
            );
        }
        self.state = AgentState {
            side: self.state.side,
            kickoff_turn: self.state.kickoff_turn,
            ..snapshot.agent
        };
        self.perception = snapshot.objects;
    }

    /// Run the decision engine for one tick. `None` means idle.
    pub fn tick(&mut self) -> Option<MotorCmd> {
        self.engine
            .tick(&self.state, &self.perception, &mut self.queue)
    }

    /// Commands to send right after connecting: the initial placement and,
    /// if one was assigned, the kickoff turn.
    pub fn placement(&self, x: f64, y: f64) -> Vec<MotorCmd> {
        let mut cmds = vec![MotorCmd::Move { x, y }];
        if self.state.kickoff_turn != 0.0 {
            cmds.push(MotorCmd::Turn {
                moment: self.state.kickoff_turn,
            });
        }
        cmds
    }
}
