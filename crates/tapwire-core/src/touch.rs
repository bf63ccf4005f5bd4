//! Legacy Touch Actions payload construction.
//!
//! The per-step model that predates W3C Actions. A payload is one flat
//! ordered sequence of touch primitives; there are no parallel timelines
//! and no keyboard input. Automation agents past v7 removed this endpoint,
//! so new callers should prefer [`crate::w3c`]; this model remains for
//! driving older deployments.
//!
//! Unlike the modern model, the server performs no motion interpolation:
//! [`TouchActions::swipe`] subdivides drag motion client-side into discrete
//! moveTo/wait step pairs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DEFAULT_PAUSE_SECONDS;

/// Option payload carried by legacy touch actions.
///
/// All fields are optional and unset fields are omitted on the wire. Values
/// pass through verbatim; nothing here validates coordinate ranges,
/// pressure bounds or tap counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Element the coordinates are relative to; viewport when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Wait length in milliseconds (only meaningful on `wait`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms: Option<f64>,
}

/// One primitive in a legacy touch sequence, tagged by `action`.
///
/// Timed behavior in this model is expressed via surrounding `wait`
/// entries, never inline on the primitive itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TouchAction {
    MoveTo { options: TouchOptions },
    Press { options: TouchOptions },
    LongPress { options: TouchOptions },
    Tap { options: TouchOptions },
    Wait { options: TouchOptions },
    Release,
    Cancel,
}

/// Fluent builder for a `moveTo` primitive.
#[derive(Debug, Clone, Default)]
pub struct TouchMove {
    options: TouchOptions,
}

impl TouchMove {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target coordinates.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.options.x = Some(x);
        self.options.y = Some(y);
        self
    }

    /// Interpret coordinates relative to `element`. `None` is a no-op.
    pub fn with_origin(mut self, element: Option<&str>) -> Self {
        if let Some(element) = element {
            self.options.element = Some(element.to_string());
        }
        self
    }
}

impl From<TouchMove> for TouchAction {
    fn from(movement: TouchMove) -> Self {
        TouchAction::MoveTo {
            options: movement.options,
        }
    }
}

/// Fluent builder for a `press` primitive.
#[derive(Debug, Clone, Default)]
pub struct TouchPress {
    options: TouchOptions,
}

impl TouchPress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the press coordinates.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.options.x = Some(x);
        self.options.y = Some(y);
        self
    }

    /// Interpret coordinates relative to `element`. `None` is a no-op.
    pub fn with_origin(mut self, element: Option<&str>) -> Self {
        if let Some(element) = element {
            self.options.element = Some(element.to_string());
        }
        self
    }

    /// Set the press pressure, typically between 0.0 and 1.0.
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.options.pressure = Some(pressure);
        self
    }
}

impl From<TouchPress> for TouchAction {
    fn from(press: TouchPress) -> Self {
        TouchAction::Press {
            options: press.options,
        }
    }
}

/// Fluent builder for a `longPress` primitive.
#[derive(Debug, Clone, Default)]
pub struct TouchLongPress {
    options: TouchOptions,
}

impl TouchLongPress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the press coordinates.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.options.x = Some(x);
        self.options.y = Some(y);
        self
    }

    /// Interpret coordinates relative to `element`. `None` is a no-op.
    pub fn with_origin(mut self, element: Option<&str>) -> Self {
        if let Some(element) = element {
            self.options.element = Some(element.to_string());
        }
        self
    }
}

impl From<TouchLongPress> for TouchAction {
    fn from(press: TouchLongPress) -> Self {
        TouchAction::LongPress {
            options: press.options,
        }
    }
}

/// Fluent builder for a `tap` primitive.
#[derive(Debug, Clone, Default)]
pub struct TouchTap {
    options: TouchOptions,
}

impl TouchTap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tap coordinates.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.options.x = Some(x);
        self.options.y = Some(y);
        self
    }

    /// Interpret coordinates relative to `element`. `None` is a no-op.
    pub fn with_origin(mut self, element: Option<&str>) -> Self {
        if let Some(element) = element {
            self.options.element = Some(element.to_string());
        }
        self
    }

    /// Set the number of taps to perform.
    pub fn with_count(mut self, count: u32) -> Self {
        self.options.count = Some(count);
        self
    }
}

impl From<TouchTap> for TouchAction {
    fn from(tap: TouchTap) -> Self {
        TouchAction::Tap {
            options: tap.options,
        }
    }
}

/// Timing and interpolation profile for [`TouchActions::swipe`].
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTiming {
    /// Hold before the motion begins.
    pub press_seconds: f64,
    /// Total motion duration; `None` requests an instantaneous jump with no
    /// interpolation.
    pub swipe_seconds: Option<f64>,
    /// Approximate distance, in coordinate units, covered by each
    /// interpolation step.
    pub delta: f64,
    /// Hold after the motion ends.
    pub hold_seconds: f64,
    /// Lift the touch when the swipe completes. Set to `false` to compose
    /// multi-segment drags across several `swipe` calls.
    pub lift_after: bool,
}

impl Default for SwipeTiming {
    fn default() -> Self {
        Self {
            press_seconds: 0.25,
            swipe_seconds: None,
            delta: 10.0,
            hold_seconds: 0.25,
            lift_after: true,
        }
    }
}

/// Ordered legacy touch sequence.
///
/// Append-only: output order always equals call order. Serializes
/// transparently as the wire-level array of action objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchActions {
    actions: Vec<TouchAction>,
}

impl TouchActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a movement.
    pub fn move_to(mut self, movement: TouchMove) -> Self {
        self.actions.push(movement.into());
        self
    }

    /// Append a press.
    pub fn press(mut self, press: TouchPress) -> Self {
        self.actions.push(press.into());
        self
    }

    /// Append a long press.
    pub fn long_press(mut self, press: TouchLongPress) -> Self {
        self.actions.push(press.into());
        self
    }

    /// Append a tap.
    pub fn tap(mut self, tap: TouchTap) -> Self {
        self.actions.push(tap.into());
        self
    }

    /// Append a wait. Negative input normalizes to the 0.5 s default.
    pub fn pause(mut self, seconds: f64) -> Self {
        let seconds = if seconds < 0.0 {
            DEFAULT_PAUSE_SECONDS
        } else {
            seconds
        };
        self.actions.push(TouchAction::Wait {
            options: TouchOptions {
                ms: Some(seconds * 1000.0),
                ..TouchOptions::default()
            },
        });
        self
    }

    /// Append a touch release.
    pub fn up(mut self) -> Self {
        self.actions.push(TouchAction::Release);
        self
    }

    /// Append a cancel.
    pub fn cancel(mut self) -> Self {
        self.actions.push(TouchAction::Cancel);
        self
    }

    /// Swipe from one point to another.
    ///
    /// With `swipe_seconds` unset the motion is a single direct move:
    /// press(from), wait(press), moveTo(to), wait(hold), optional release.
    ///
    /// With a duration the motion is subdivided into steps of roughly
    /// `delta` coordinate units, each followed by an equal share of the
    /// total duration, then a landing move onto the last step position
    /// (equal to the end point when the distance divides evenly by `delta`,
    /// floating-point-close otherwise).
    ///
    /// A swipe shorter than `delta` (including a zero-distance swipe)
    /// rounds to zero steps and falls back to the single direct move rather
    /// than dividing by zero.
    pub fn swipe(
        mut self,
        from: (f64, f64),
        to: (f64, f64),
        origin: Option<&str>,
        timing: SwipeTiming,
    ) -> Self {
        let (from_x, from_y) = from;
        let (to_x, to_y) = to;

        let distance = (to_x - from_x).hypot(to_y - from_y);
        // Zero when no duration was given or the swipe is shorter than one
        // step; a negative delta also lands here via the as-cast.
        let steps = match timing.swipe_seconds {
            Some(_) => (distance / timing.delta) as u32,
            None => 0,
        };

        self = self
            .press(TouchPress::new().with_xy(from_x, from_y).with_origin(origin))
            .pause(timing.press_seconds);

        match (timing.swipe_seconds, steps) {
            (Some(swipe_seconds), 1..) => {
                let steps_f = f64::from(steps);
                let dx = (to_x - from_x) / steps_f;
                let dy = (to_y - from_y) / steps_f;
                let interval = swipe_seconds / steps_f;
                debug!(
                    "interpolating swipe over {:.1} units: {} steps every {:.0}ms",
                    distance,
                    steps,
                    interval * 1000.0
                );
                for i in 1..=steps {
                    let i = f64::from(i);
                    self = self
                        .move_to(
                            TouchMove::new()
                                .with_xy(from_x + i * dx, from_y + i * dy)
                                .with_origin(origin),
                        )
                        .pause(interval);
                }
                // Landing move onto the last interpolated position.
                self = self.move_to(
                    TouchMove::new()
                        .with_xy(from_x + steps_f * dx, from_y + steps_f * dy)
                        .with_origin(origin),
                );
            }
            _ => {
                debug!(
                    "direct swipe ({}, {}) -> ({}, {})",
                    from_x, from_y, to_x, to_y
                );
                self = self.move_to(TouchMove::new().with_xy(to_x, to_y).with_origin(origin));
            }
        }

        self = self.pause(timing.hold_seconds);
        if timing.lift_after {
            self = self.up();
        }
        self
    }

    /// Read the accumulated sequence.
    pub fn actions(&self) -> &[TouchAction] {
        &self.actions
    }

    /// Consume the builder, yielding the ordered primitive list.
    pub fn into_actions(self) -> Vec<TouchAction> {
        self.actions
    }
}
