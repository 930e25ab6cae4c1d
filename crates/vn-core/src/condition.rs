//! Condition evaluation for dialogue lines and choices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::GameState;
use crate::value::StateValue;

/// A flat predicate over game state: every key must match its expected value.
///
/// An expected value of [`StateValue::Null`] matches a key that is absent or
/// null. Any other expected value requires strict equality. An empty
/// condition always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(pub BTreeMap<String, StateValue>);

impl Condition {
    /// Create an empty condition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to equal `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Require `key` to be absent or null.
    pub fn with_unset(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), StateValue::Null);
        self
    }

    /// Evaluate the condition against the current state.
    pub fn evaluate(&self, state: &GameState) -> bool {
        self.0.iter().all(|(key, expected)| match expected {
            StateValue::Null => state.get(key).is_none_or(StateValue::is_null),
            _ => state.get(key) == Some(expected),
        })
    }

    /// Evaluate an optional condition. An absent condition always holds.
    pub fn check(condition: Option<&Condition>, state: &GameState) -> bool {
        condition.is_none_or(|c| c.evaluate(state))
    }
}
