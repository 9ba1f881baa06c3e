//! Parser for the referee's plan commands.
//!
//! A batch is a `;` separated list of commands:
//!
//! ```text
//! goto <x> <y> <true|false>      go to a point, carrying the ball if `true`
//! goto <landmark> <true|false>   same, with the point taken from the flag table
//! reach ball | reach <team> <n>  go to the ball or a player, done on arrival
//! follow ball | follow <team> <n> keep going to the ball or a player
//! stop                           drop the active goal
//! clear                          drop all goals
//! ```
//!
//! A goal command replaces the current plan unless it is prefixed with
//! `next `, in which case it is appended to it.

use striker_core::{BehaviorSettings, Landmarks, Side, Vector2};
use thiserror::Error;

use crate::{
    action::{Action, TargetSubject},
    queue::ActionQueue,
};

const CHAIN_PREFIX: &str = "next ";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("malformed command")]
    Malformed,
    #[error("unknown landmark `{0}`")]
    UnknownLandmark(String),
    #[error("`{0}` is not a valid coordinate")]
    InvalidNumber(String),
    #[error("target ({x}, {y}) is outside the field")]
    OutOfBounds { x: f64, y: f64 },
    #[error("expected `true` or `false`, got `{0}`")]
    InvalidFlag(String),
    #[error("`{0}` is not a valid player number")]
    InvalidPlayerId(String),
}

/// A single queue mutation produced by one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a goal. Without `append` it replaces the whole plan.
    Push { action: Action, append: bool },
    Stop,
    Clear,
}

impl Command {
    pub fn apply(self, queue: &mut ActionQueue) {
        match self {
            Command::Push {
                action,
                append: true,
            } => queue.push_back(action),
            Command::Push {
                action,
                append: false,
            } => queue.replace(action),
            Command::Stop => {
                queue.pop_front();
            }
            Command::Clear => queue.clear(),
        }
    }
}

/// The outcome of one command of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand<'a> {
    /// The trimmed command text
    pub line: &'a str,
    /// `Ok(None)` for commands that are not recognized
    pub result: Result<Option<Command>, ParseError>,
}

#[derive(Debug, Clone)]
pub struct CommandParser {
    settings: BehaviorSettings,
    landmarks: Landmarks,
}

impl CommandParser {
    pub fn new(settings: BehaviorSettings) -> Self {
        Self {
            settings,
            landmarks: Landmarks::new(),
        }
    }

    /// Parse every command of a batch. Empty pieces are skipped; a bad command
    /// never prevents the following ones from being parsed.
    pub fn parse_batch<'a>(&self, text: &'a str, side: Side) -> Vec<ParsedCommand<'a>> {
        text.split(';')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| ParsedCommand {
                line,
                result: self.parse_command(line, side),
            })
            .collect()
    }

    /// Parse a single command.
    pub fn parse_command(&self, line: &str, side: Side) -> Result<Option<Command>, ParseError> {
        let (line, append) = match line.strip_prefix(CHAIN_PREFIX) {
            Some(rest) => (rest.trim_start(), true),
            None => (line, false),
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((keyword, params)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match *keyword {
            "goto" => {
                let action = self.parse_goto(params, side)?;
                Command::Push { action, append }
            }
            "reach" | "follow" => {
                let subject = parse_subject(params)?;
                let action = Action::reach_follow(subject, *keyword == "follow");
                Command::Push { action, append }
            }
            "stop" if params.is_empty() => Command::Stop,
            "clear" if params.is_empty() => Command::Clear,
            "stop" | "clear" => return Err(ParseError::Malformed),
            _ => return Ok(None),
        };
        Ok(Some(command))
    }

    fn parse_goto(&self, params: &[&str], side: Side) -> Result<Action, ParseError> {
        let (target, flag) = match params {
            [name, flag] => {
                let Some(pos) = self.landmarks.resolve(name, side) else {
                    return Err(if name.parse::<f64>().is_ok() {
                        ParseError::Malformed
                    } else {
                        ParseError::UnknownLandmark(name.to_string())
                    });
                };
                (Vector2::new(pos.x, -pos.y), *flag)
            }
            [x, y, flag] => (Vector2::new(parse_coord(x)?, parse_coord(y)?), *flag),
            _ => return Err(ParseError::Malformed),
        };

        if !self.settings.in_bounds(target) {
            return Err(ParseError::OutOfBounds {
                x: target.x,
                y: target.y,
            });
        }
        let requires_ball = match flag {
            "true" => true,
            "false" => false,
            other => return Err(ParseError::InvalidFlag(other.to_string())),
        };
        Ok(Action::goto(target, requires_ball))
    }
}

fn parse_coord(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(token.to_string()))
}

fn parse_subject(params: &[&str]) -> Result<TargetSubject, ParseError> {
    match params {
        [ball] if ball.eq_ignore_ascii_case("ball") => Ok(TargetSubject::Ball),
        [team, id] => {
            let id = id
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidPlayerId(id.to_string()))?;
            Ok(TargetSubject::Player {
                team: team.to_string(),
                id,
            })
        }
        _ => Err(ParseError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CommandParser {
        CommandParser::new(BehaviorSettings::default())
    }

    fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        parser().parse_command(line, Side::Left)
    }

    fn push(action: Action, append: bool) -> Result<Option<Command>, ParseError> {
        Ok(Some(Command::Push { action, append }))
    }

    #[test]
    fn test_goto_coordinates() {
        assert_eq!(
            parse("goto 10 -5.5 false"),
            push(Action::goto(Vector2::new(10.0, -5.5), false), false)
        );
        assert_eq!(
            parse("next goto -57 39 true"),
            push(Action::goto(Vector2::new(-57.0, 39.0), true), true)
        );
    }

    #[test]
    fn test_goto_landmark_negates_y() {
        assert_eq!(
            parse("goto fprb true"),
            push(Action::goto(Vector2::new(36.0, 20.15), true), false)
        );
        assert_eq!(
            parse("goto goal_opp false"),
            push(Action::goto(Vector2::new(52.5, 0.0), false), false)
        );
        let right = parser().parse_command("goto goal_opp false", Side::Right);
        assert_eq!(
            right,
            push(Action::goto(Vector2::new(-52.5, 0.0), false), false)
        );
    }

    #[test]
    fn test_goto_rejections() {
        assert_eq!(
            parse("goto 60 0 false"),
            Err(ParseError::OutOfBounds { x: 60.0, y: 0.0 })
        );
        assert_eq!(
            parse("goto 0 -40 false"),
            Err(ParseError::OutOfBounds { x: 0.0, y: -40.0 })
        );
        // Boundary flags behind the goal lines are outside the accepted area
        assert!(matches!(
            parse("goto fl0 false"),
            Err(ParseError::OutOfBounds { .. })
        ));
        assert_eq!(
            parse("goto ten 0 false"),
            Err(ParseError::InvalidNumber("ten".into()))
        );
        assert_eq!(
            parse("goto 1 NaN false"),
            Err(ParseError::InvalidNumber("NaN".into()))
        );
        assert_eq!(
            parse("goto 1 2 yes"),
            Err(ParseError::InvalidFlag("yes".into()))
        );
        assert_eq!(
            parse("goto nowhere true"),
            Err(ParseError::UnknownLandmark("nowhere".into()))
        );
        assert_eq!(parse("goto 10 false"), Err(ParseError::Malformed));
        assert_eq!(parse("goto 1 2"), Err(ParseError::Malformed));
        assert_eq!(parse("goto"), Err(ParseError::Malformed));
    }

    #[test]
    fn test_reach_and_follow() {
        assert_eq!(
            parse("reach ball"),
            push(Action::reach_follow(TargetSubject::Ball, false), false)
        );
        assert_eq!(
            parse("next follow BALL"),
            push(Action::reach_follow(TargetSubject::Ball, true), true)
        );
        let blue7 = TargetSubject::Player {
            team: "Blue".into(),
            id: 7,
        };
        assert_eq!(
            parse("follow Blue 7"),
            push(Action::reach_follow(blue7.clone(), true), false)
        );
        assert_eq!(
            parse("reach Blue 7"),
            push(Action::reach_follow(blue7, false), false)
        );
        assert_eq!(
            parse("reach Blue seven"),
            Err(ParseError::InvalidPlayerId("seven".into()))
        );
        assert_eq!(parse("follow"), Err(ParseError::Malformed));
        assert_eq!(parse("reach a b c"), Err(ParseError::Malformed));
    }

    #[test]
    fn test_stop_clear_and_unknown() {
        assert_eq!(parse("stop"), Ok(Some(Command::Stop)));
        assert_eq!(parse("next clear"), Ok(Some(Command::Clear)));
        assert_eq!(parse("stop now"), Err(ParseError::Malformed));
        assert_eq!(parse("dance"), Ok(None));
        assert_eq!(parse("gotox 1 2 true"), Ok(None));
    }

    #[test]
    fn test_batch_keeps_going_after_errors() {
        let text = " goto 10 10 false ; next goto 99 0 false;;next reach ball; next jump ;next goto 1 1 maybe ";
        let parsed = parser().parse_batch(text, Side::Left);
        let lines: Vec<&str> = parsed.iter().map(|p| p.line).collect();
        assert_eq!(
            lines,
            vec![
                "goto 10 10 false",
                "next goto 99 0 false",
                "next reach ball",
                "next jump",
                "next goto 1 1 maybe"
            ]
        );
        let errors = parsed.iter().filter(|p| p.result.is_err()).count();
        assert_eq!(errors, 2);
        let commands = parsed
            .iter()
            .filter(|p| matches!(p.result, Ok(Some(_))))
            .count();
        assert_eq!(commands, 2);
    }

    #[test]
    fn test_apply() {
        let mut queue = ActionQueue::new();
        let a = Action::goto(Vector2::new(1.0, 1.0), false);
        let b = Action::goto(Vector2::new(2.0, 2.0), false);
        let c = Action::reach_follow(TargetSubject::Ball, false);

        Command::Push { action: a.clone(), append: true }.apply(&mut queue);
        Command::Push { action: b.clone(), append: true }.apply(&mut queue);
        assert_eq!(queue.len(), 2);

        Command::Stop.apply(&mut queue);
        assert_eq!(queue.front(), Some(&b));

        Command::Push { action: c.clone(), append: false }.apply(&mut queue);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.front(), Some(&c));

        Command::Clear.apply(&mut queue);
        assert!(queue.is_empty());
        Command::Stop.apply(&mut queue);
        assert!(queue.is_empty());
    }
}
