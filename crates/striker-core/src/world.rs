use serde::{Deserialize, Serialize};

use crate::{Side, Vector2};

/// The agent's own state, refreshed by the world model every tick.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentState {
    /// Position on the field
    pub position: Vector2,
    /// Unit vector of the direction the agent is facing ("zero vector")
    pub forward: Vector2,
    /// The side our team defends
    pub side: Side,
    /// Turn moment assigned at startup, applied once after the initial `move`
    #[serde(default)]
    pub kickoff_turn: f64,
}

impl AgentState {
    pub fn new(position: Vector2, forward: Vector2, side: Side) -> Self {
        Self {
            position,
            forward,
            side,
            kickoff_turn: 0.0,
        }
    }
}

impl Default for AgentState {
    fn default() -> Self {
        Self::new(Vector2::zeros(), Vector2::new(1.0, 0.0), Side::Left)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Ball,
    Player,
    Landmark,
}

/// One object from the current perception snapshot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PerceivedObject {
    pub kind: ObjectKind,
    /// Team name, for players whose team could be made out
    #[serde(default)]
    pub team: Option<String>,
    /// Uniform number, for players close enough to read it
    #[serde(default)]
    pub id: Option<u32>,
    /// Flag name, for landmarks
    #[serde(default)]
    pub name: Option<String>,
    pub position: Vector2,
}

impl PerceivedObject {
    pub fn ball(position: Vector2) -> Self {
        Self {
            kind: ObjectKind::Ball,
            team: None,
            id: None,
            name: None,
            position,
        }
    }

    pub fn player(team: impl Into<String>, id: u32, position: Vector2) -> Self {
        Self {
            kind: ObjectKind::Player,
            team: Some(team.into()),
            id: Some(id),
            name: None,
            position,
        }
    }

    pub fn is_player(&self, team: &str, id: u32) -> bool {
        self.kind == ObjectKind::Player
            && self.team.as_deref() == Some(team)
            && self.id == Some(id)
    }
}

/// Everything the decision engine sees in one tick.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub agent: AgentState,
    #[serde(default)]
    pub objects: Vec<PerceivedObject>,
}

impl Snapshot {
    /// The first ball in the snapshot, if one is visible.
    pub fn ball(&self) -> Option<&PerceivedObject> {
        self.objects.iter().find(|o| o.kind == ObjectKind::Ball)
    }
}
