//! Plan execution for a single soccer agent.
//!
//! The referee's text commands are parsed into goals ([`Action`]) kept in an
//! [`ActionQueue`]. Every simulation tick the [`DecisionEngine`] looks at the
//! front goal and the current perception and produces at most one
//! [`striker_core::MotorCmd`]. [`Agent`] ties the pieces together.

mod action;
mod agent;
mod engine;
mod parser;
mod queue;

pub use action::{Action, TargetSubject};
pub use agent::{Agent, BatchReport};
pub use engine::DecisionEngine;
pub use parser::{Command, CommandParser, ParseError, ParsedCommand};
pub use queue::ActionQueue;
