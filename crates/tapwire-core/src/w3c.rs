//! W3C Actions payload construction (modern protocol).
//!
//! A payload is an ordered set of input timelines, each attributed to one
//! logical input source: a finger or the keyboard. Finger timelines carry
//! pointer primitives (move, down, up, pause); keyboard timelines carry
//! keyDown/keyUp pairs. The server executes all timelines in parallel and
//! interpolates motion from the duration on each move, so gestures in this
//! model never subdivide motion client-side (contrast with [`crate::touch`]).
//!
//! # Pause quirk
//!
//! The duration on a `pause` primitive does not hold the pointer in place
//! when the next primitive is a move; the perceived delay attaches to the
//! move instead. Gesture helpers work around this by restating the start
//! position after a pause, e.g. `move(start) down pause(t) move(start)
//! move(end)` for a swipe.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DEFAULT_PAUSE_SECONDS;

/// One primitive in a finger timeline.
///
/// Serializes to the wire-level action object, tagged by `type`. Durations
/// are milliseconds; an instantaneous move omits `duration` entirely rather
/// than carrying zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PointerAction {
    #[serde(rename = "pointerMove")]
    Move {
        x: f64,
        y: f64,
        /// Element the coordinates are relative to; viewport when absent.
        #[serde(skip_serializing_if = "Option::is_none")]
        origin: Option<String>,
        /// Milliseconds to spread the movement over.
        #[serde(skip_serializing_if = "Option::is_none")]
        duration: Option<f64>,
    },
    #[serde(rename = "pointerDown")]
    Down,
    #[serde(rename = "pointerUp")]
    Up,
    #[serde(rename = "pause")]
    Pause { duration: f64 },
}

/// Fluent builder for a single `pointerMove` primitive.
///
/// Coordinates, origin and pressure-style values pass through verbatim;
/// no range validation happens here. Repeat calls overwrite the previous
/// value for that field.
#[derive(Debug, Clone, Default)]
pub struct PointerMove {
    x: f64,
    y: f64,
    origin: Option<String>,
    duration: Option<f64>,
}

impl PointerMove {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target coordinates.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Interpret coordinates relative to `element`.
    ///
    /// `None` is a no-op: coordinates stay viewport-relative (or keep a
    /// previously set origin).
    pub fn with_origin(mut self, element: Option<&str>) -> Self {
        if let Some(element) = element {
            self.origin = Some(element.to_string());
        }
        self
    }

    /// Spread the movement over `seconds`, stored as milliseconds.
    ///
    /// `None` is a no-op: the movement stays instantaneous.
    pub fn with_duration(mut self, seconds: Option<f64>) -> Self {
        if let Some(seconds) = seconds {
            self.duration = Some(seconds * 1000.0);
        }
        self
    }
}

impl From<PointerMove> for PointerAction {
    fn from(movement: PointerMove) -> Self {
        PointerAction::Move {
            x: movement.x,
            y: movement.y,
            origin: movement.origin,
            duration: movement.duration,
        }
    }
}

/// One finger's timeline: an append-only ordered sequence of pointer
/// primitives.
///
/// Pure sequencing; gesture semantics (tap vs swipe) live on
/// [`W3cActions`]. Output order always equals call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FingerActions {
    actions: Vec<PointerAction>,
}

impl FingerActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a movement.
    pub fn move_to(mut self, movement: PointerMove) -> Self {
        self.actions.push(movement.into());
        self
    }

    /// Append a finger press.
    pub fn down(mut self) -> Self {
        self.actions.push(PointerAction::Down);
        self
    }

    /// Append a finger release.
    pub fn up(mut self) -> Self {
        self.actions.push(PointerAction::Up);
        self
    }

    /// Append a pause. Negative input normalizes to the 0.5 s default.
    ///
    /// See the module docs for the pause-before-move quirk.
    pub fn pause(mut self, seconds: f64) -> Self {
        let seconds = if seconds < 0.0 {
            DEFAULT_PAUSE_SECONDS
        } else {
            seconds
        };
        self.actions.push(PointerAction::Pause {
            duration: seconds * 1000.0,
        });
        self
    }

    /// Read the accumulated timeline.
    pub fn actions(&self) -> &[PointerAction] {
        &self.actions
    }

    /// Consume the builder, yielding the ordered primitive list.
    pub fn into_actions(self) -> Vec<PointerAction> {
        self.actions
    }
}

/// One primitive in a keyboard timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KeyAction {
    #[serde(rename = "keyDown")]
    Down { value: char },
    #[serde(rename = "keyUp")]
    Up { value: char },
}

/// Pointer timeline parameters. Touch is the only pointer type this
/// protocol generation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerParameters {
    #[serde(rename = "pointerType")]
    pub pointer_type: PointerType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    Touch,
}

/// One input timeline in an action set, tagged by kind.
///
/// Identifiers are unique within their containing [`W3cActions`] and derive
/// from the set length at the moment of insertion, so they are stable once
/// assigned and never renumbered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputSource {
    Key {
        id: String,
        actions: Vec<KeyAction>,
    },
    Pointer {
        id: String,
        parameters: PointerParameters,
        actions: Vec<PointerAction>,
    },
}

impl InputSource {
    /// The timeline's identifier within its action set.
    pub fn id(&self) -> &str {
        match self {
            InputSource::Key { id, .. } => id,
            InputSource::Pointer { id, .. } => id,
        }
    }
}

/// Timing profile for [`W3cActions::swipe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTiming {
    /// Hold before the motion begins.
    pub press_seconds: f64,
    /// Total motion duration; `None` requests an instantaneous jump.
    pub swipe_seconds: Option<f64>,
    /// Hold after the motion ends.
    pub hold_seconds: f64,
}

impl Default for SwipeTiming {
    fn default() -> Self {
        Self {
            press_seconds: 0.25,
            swipe_seconds: None,
            hold_seconds: 0.25,
        }
    }
}

/// Ordered set of input timelines forming one W3C Actions payload.
///
/// Serializes transparently as the wire-level array of timeline objects, so
/// the transport can embed it directly in the request body. Gesture helpers
/// compose [`FingerActions`] internally and chain, e.g.:
///
/// ```
/// use tapwire_core::w3c::W3cActions;
///
/// let payload = W3cActions::new()
///     .tap(10.0, 20.0, None)
///     .send_keys("hi");
/// assert_eq!(payload.inputs().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct W3cActions {
    inputs: Vec<InputSource>,
}

impl W3cActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keyboard timeline typing `text`, one keyDown/keyUp pair per
    /// character.
    pub fn send_keys(mut self, text: &str) -> Self {
        let id = format!("key{}", self.inputs.len());
        debug!("composing key timeline {} for {} chars", id, text.chars().count());
        let actions = text
            .chars()
            .flat_map(|c| [KeyAction::Down { value: c }, KeyAction::Up { value: c }])
            .collect();
        self.inputs.push(InputSource::Key { id, actions });
        self
    }

    /// Append finger timelines, one per sequence, tagged as touch pointers.
    ///
    /// Each timeline id derives from the set length at its moment of
    /// insertion.
    pub fn inject_touch_actions<I>(mut self, sequences: I) -> Self
    where
        I: IntoIterator<Item = FingerActions>,
    {
        for sequence in sequences {
            let id = format!("finger{}", self.inputs.len());
            self.inputs.push(InputSource::Pointer {
                id,
                parameters: PointerParameters {
                    pointer_type: PointerType::Touch,
                },
                actions: sequence.into_actions(),
            });
        }
        self
    }

    /// Tap at the given coordinates: a brief (0.1 s) stationary contact.
    pub fn tap(self, x: f64, y: f64, origin: Option<&str>) -> Self {
        self.contact(x, y, origin, 0.1)
    }

    /// Long press at the given coordinates: same contact shape as
    /// [`tap`](Self::tap) with a 2 s hold.
    pub fn press(self, x: f64, y: f64, origin: Option<&str>) -> Self {
        self.contact(x, y, origin, 2.0)
    }

    /// Stationary contact with an explicit hold duration. [`tap`](Self::tap)
    /// and [`press`](Self::press) are presets of this.
    pub fn contact(self, x: f64, y: f64, origin: Option<&str>, hold_seconds: f64) -> Self {
        debug!("composing contact at ({}, {}), hold {}s", x, y, hold_seconds);
        let finger = FingerActions::new()
            .move_to(PointerMove::new().with_xy(x, y).with_origin(origin))
            .down()
            .pause(hold_seconds)
            .up();
        self.inject_touch_actions([finger])
    }

    /// Swipe from one point to another as a single finger timeline.
    ///
    /// The motion is a single terminal move carrying the whole swipe
    /// duration; the server interpolates over it. The start position is
    /// restated after the press pause so the hold does not bleed into the
    /// motion (see the module docs).
    pub fn swipe(
        self,
        from: (f64, f64),
        to: (f64, f64),
        origin: Option<&str>,
        timing: SwipeTiming,
    ) -> Self {
        debug!(
            "composing swipe ({}, {}) -> ({}, {}), motion {:?}s",
            from.0, from.1, to.0, to.1, timing.swipe_seconds
        );
        let finger = FingerActions::new()
            .move_to(PointerMove::new().with_xy(from.0, from.1).with_origin(origin))
            .down()
            .pause(timing.press_seconds)
            .move_to(PointerMove::new().with_xy(from.0, from.1).with_origin(origin))
            .move_to(
                PointerMove::new()
                    .with_xy(to.0, to.1)
                    .with_origin(origin)
                    .with_duration(timing.swipe_seconds),
            )
            .pause(timing.hold_seconds)
            .up();
        self.inject_touch_actions([finger])
    }

    /// Read the accumulated timelines.
    pub fn inputs(&self) -> &[InputSource] {
        &self.inputs
    }

    /// Consume the builder, yielding the ordered timeline list.
    pub fn into_inputs(self) -> Vec<InputSource> {
        self.inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pause_ms(action: &PointerAction) -> f64 {
        match action {
            PointerAction::Pause { duration } => *duration,
            other => panic!("expected pause, got {:?}", other),
        }
    }

    #[test]
    fn test_pointer_move_omits_unset_fields() {
        let movement: PointerAction = PointerMove::new().with_xy(10.0, 20.0).into();
        let value = serde_json::to_value(&movement).unwrap();
        assert_eq!(
            value,
            json!({"type": "pointerMove", "x": 10.0, "y": 20.0})
        );
    }

    #[test]
    fn test_pointer_move_duration_converts_to_ms() {
        let movement: PointerAction = PointerMove::new()
            .with_xy(0.0, 0.0)
            .with_duration(Some(1.5))
            .into();
        match movement {
            PointerAction::Move { duration, .. } => assert_eq!(duration, Some(1500.0)),
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_with_origin_none_is_noop() {
        let movement: PointerAction = PointerMove::new()
            .with_xy(0.0, 0.0)
            .with_origin(Some("element-42"))
            .with_origin(None)
            .into();
        match movement {
            PointerAction::Move { origin, .. } => {
                assert_eq!(origin.as_deref(), Some("element-42"));
            }
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_with_duration_none_is_noop() {
        let movement: PointerAction = PointerMove::new()
            .with_xy(0.0, 0.0)
            .with_duration(None)
            .into();
        match movement {
            PointerAction::Move { duration, .. } => assert_eq!(duration, None),
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_repeat_configuration_overwrites() {
        let movement: PointerAction = PointerMove::new()
            .with_xy(1.0, 2.0)
            .with_xy(3.0, 4.0)
            .with_duration(Some(1.0))
            .with_duration(Some(2.0))
            .into();
        assert_eq!(
            movement,
            PointerAction::Move {
                x: 3.0,
                y: 4.0,
                origin: None,
                duration: Some(2000.0),
            }
        );
    }

    #[test]
    fn test_finger_actions_preserve_order() {
        let finger = FingerActions::new()
            .down()
            .pause(1.0)
            .move_to(PointerMove::new().with_xy(5.0, 5.0))
            .up();
        let actions = finger.into_actions();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], PointerAction::Down);
        assert!(matches!(actions[1], PointerAction::Pause { .. }));
        assert!(matches!(actions[2], PointerAction::Move { .. }));
        assert_eq!(actions[3], PointerAction::Up);
    }

    #[test]
    fn test_negative_pause_normalizes_to_default() {
        for seconds in [-0.001, -1.0, -1e9] {
            let finger = FingerActions::new().pause(seconds);
            assert_eq!(pause_ms(&finger.actions()[0]), 500.0);
        }
    }

    #[test]
    fn test_tap_shape() {
        let set = W3cActions::new().tap(50.0, 60.0, None);
        let actions = match &set.inputs()[0] {
            InputSource::Pointer { actions, .. } => actions,
            other => panic!("expected pointer timeline, got {:?}", other),
        };
        assert_eq!(actions.len(), 4);
        match &actions[0] {
            PointerAction::Move { x, y, duration, .. } => {
                assert_eq!((*x, *y), (50.0, 60.0));
                assert_eq!(*duration, None);
            }
            other => panic!("expected move, got {:?}", other),
        }
        assert_eq!(actions[1], PointerAction::Down);
        assert_eq!(pause_ms(&actions[2]), 100.0);
        assert_eq!(actions[3], PointerAction::Up);
    }

    #[test]
    fn test_press_is_tap_shape_with_longer_hold() {
        let set = W3cActions::new().press(50.0, 60.0, None);
        let actions = match &set.inputs()[0] {
            InputSource::Pointer { actions, .. } => actions,
            other => panic!("expected pointer timeline, got {:?}", other),
        };
        assert_eq!(actions.len(), 4);
        assert_eq!(pause_ms(&actions[2]), 2000.0);
    }

    #[test]
    fn test_swipe_shape_restates_start_before_motion() {
        let timing = SwipeTiming {
            swipe_seconds: Some(0.5),
            ..SwipeTiming::default()
        };
        let set = W3cActions::new().swipe((0.0, 0.0), (100.0, 0.0), None, timing);
        let actions = match &set.inputs()[0] {
            InputSource::Pointer { actions, .. } => actions,
            other => panic!("expected pointer timeline, got {:?}", other),
        };
        assert_eq!(actions.len(), 7);
        // move(from) down pause move(from) move(to, duration) pause up
        assert!(matches!(&actions[0], PointerAction::Move { x: s, duration: None, .. } if *s == 0.0));
        assert_eq!(actions[1], PointerAction::Down);
        assert_eq!(pause_ms(&actions[2]), 250.0);
        assert!(matches!(&actions[3], PointerAction::Move { x: s, duration: None, .. } if *s == 0.0));
        match &actions[4] {
            PointerAction::Move { x, duration, .. } => {
                assert_eq!(*x, 100.0);
                assert_eq!(*duration, Some(500.0));
            }
            other => panic!("expected move, got {:?}", other),
        }
        assert_eq!(pause_ms(&actions[5]), 250.0);
        assert_eq!(actions[6], PointerAction::Up);
    }

    #[test]
    fn test_swipe_instantaneous_motion_has_no_duration() {
        let set = W3cActions::new().swipe(
            (0.0, 0.0),
            (100.0, 0.0),
            None,
            SwipeTiming::default(),
        );
        let actions = match &set.inputs()[0] {
            InputSource::Pointer { actions, .. } => actions,
            other => panic!("expected pointer timeline, got {:?}", other),
        };
        assert!(matches!(&actions[4], PointerAction::Move { duration: None, .. }));
    }

    #[test]
    fn test_send_keys_pairs_per_character() {
        let set = W3cActions::new().send_keys("hi");
        let actions = match &set.inputs()[0] {
            InputSource::Key { actions, .. } => actions,
            other => panic!("expected key timeline, got {:?}", other),
        };
        assert_eq!(
            actions,
            &vec![
                KeyAction::Down { value: 'h' },
                KeyAction::Up { value: 'h' },
                KeyAction::Down { value: 'i' },
                KeyAction::Up { value: 'i' },
            ]
        );
    }

    #[test]
    fn test_identifiers_derive_from_set_length() {
        let set = W3cActions::new()
            .tap(0.0, 0.0, None)
            .send_keys("a")
            .tap(1.0, 1.0, None);
        let ids: Vec<&str> = set.inputs().iter().map(|input| input.id()).collect();
        assert_eq!(ids, ["finger0", "key1", "finger2"]);
    }

    #[test]
    fn test_inject_multiple_fingers_get_distinct_ids() {
        let set = W3cActions::new().inject_touch_actions([
            FingerActions::new().down().up(),
            FingerActions::new().down().up(),
        ]);
        let ids: Vec<&str> = set.inputs().iter().map(|input| input.id()).collect();
        assert_eq!(ids, ["finger0", "finger1"]);
    }

    #[test]
    fn test_origin_passes_through_verbatim() {
        let set = W3cActions::new().tap(5.0, 5.0, Some("ABCD-1234"));
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value[0]["actions"][0]["origin"], json!("ABCD-1234"));
    }

    #[test]
    fn test_wire_shape() {
        let set = W3cActions::new().tap(10.0, 20.0, None);
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(
            value,
            json!([{
                "type": "pointer",
                "id": "finger0",
                "parameters": {"pointerType": "touch"},
                "actions": [
                    {"type": "pointerMove", "x": 10.0, "y": 20.0},
                    {"type": "pointerDown"},
                    {"type": "pause", "duration": 100.0},
                    {"type": "pointerUp"},
                ],
            }])
        );
    }

    #[test]
    fn test_payload_round_trips() {
        let set = W3cActions::new()
            .swipe((0.0, 0.0), (30.0, 40.0), Some("el"), SwipeTiming::default())
            .send_keys("ok");
        let json = serde_json::to_string(&set).unwrap();
        let back: W3cActions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
