//! The game state store for a single playthrough.

use std::collections::BTreeMap;

use crate::value::StateValue;

/// A flat key/value map of game state, as read by conditions and written by choices.
pub type StateMap = BTreeMap<String, StateValue>;

/// Mutable key/value state accumulated over one playthrough.
///
/// Created empty, merged by choice `setState` payloads, and wholly replaced
/// on restart or story switch. Reads hand out copies so callers can never
/// mutate the store behind its back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameState {
    values: StateMap,
}

impl GameState {
    /// Create an empty game state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Shallow-merge `partial` into the state. Later keys overwrite earlier ones.
    pub fn update<K, V>(&mut self, partial: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<StateValue>,
    {
        for (key, value) in partial {
            self.values.insert(key.into(), value.into());
        }
    }

    /// Get the value for a key, if set.
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    /// A defensive copy of the whole state.
    pub fn snapshot(&self) -> StateMap {
        self.values.clone()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn update_merges_and_reset_clears() {
        let mut state = GameState::new();
        state.reset();
        state.update([("a", 1)]);
        assert_eq!(
            state.snapshot(),
            StateMap::from([("a".to_string(), StateValue::Integer(1))])
        );

        state.update([("b", 2)]);
        assert_eq!(
            state.snapshot(),
            StateMap::from([
                ("a".to_string(), StateValue::Integer(1)),
                ("b".to_string(), StateValue::Integer(2)),
            ])
        );

        state.reset();
        assert!(state.snapshot().is_empty());
    }

    #[test]
    fn later_keys_overwrite() {
        let mut state = GameState::new();
        state.update([("mood", StateValue::from("calm"))]);
        state.update([("mood", StateValue::from("angry"))]);
        assert_eq!(state.get("mood"), Some(&StateValue::from("angry")));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut state = GameState::new();
        state.update([("door_open", true)]);

        let mut copy = state.snapshot();
        copy.insert("door_open".to_string(), StateValue::Bool(false));
        copy.insert("intruder".to_string(), StateValue::Bool(true));

        assert_eq!(state.get("door_open"), Some(&StateValue::Bool(true)));
        assert!(state.get("intruder").is_none());
    }

    #[test]
    fn update_accepts_state_maps() {
        let mut patch = StateMap::new();
        patch.insert("chapter_one_done".to_string(), StateValue::Bool(true));

        let mut state = GameState::new();
        state.update(patch);
        assert!(!state.is_empty());
        assert_eq!(state.get("chapter_one_done"), Some(&StateValue::Bool(true)));
    }

    fn value() -> impl Strategy<Value = StateValue> {
        prop_oneof![
            Just(StateValue::Null),
            any::<bool>().prop_map(StateValue::Bool),
            (-5i64..5).prop_map(StateValue::Integer),
            "[a-z]{0,3}".prop_map(StateValue::String),
        ]
    }

    fn state_map() -> impl Strategy<Value = StateMap> {
        prop::collection::btree_map("[a-d]", value(), 0..4)
    }

    proptest! {
        #[test]
        fn update_matches_map_extend(base in state_map(), patches in prop::collection::vec(state_map(), 0..4)) {
            let mut state = GameState::new();
            state.update(base.clone());
            let mut expected = base;
            for patch in patches {
                state.update(patch.clone());
                expected.extend(patch);
            }
            prop_assert_eq!(state.snapshot(), expected);
        }
    }
}
