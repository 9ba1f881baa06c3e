use std::collections::VecDeque;

use crate::action::Action;

/// The agent's plan: an ordered list of goals, the front one being active.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a goal behind the existing plan.
    pub fn push_back(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Insert a goal ahead of the active one. The previous front resumes once
    /// the new goal is done.
    pub fn push_front(&mut self, action: Action) {
        self.actions.push_front(action);
    }

    /// Drop the active goal. Does nothing on an empty queue.
    pub fn pop_front(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Replace the whole plan with a single goal.
    pub fn replace(&mut self, action: Action) {
        self.actions.clear();
        self.actions.push_back(action);
    }

    pub fn front(&self) -> Option<&Action> {
        self.actions.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Action> {
        self.actions.front_mut()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}
