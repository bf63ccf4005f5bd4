//! Core payload builders for tapwire.
//!
//! This crate constructs request payloads for two generations of a remote
//! UI-automation protocol used to drive touch interactions on a device via
//! an HTTP automation server. Builders accumulate ordered action sequences
//! in memory; transmitting the serialized payload (and resolving element
//! identifiers) is the job of the embedding HTTP client.
//!
//! # Modules
//!
//! - [`w3c`]: the modern W3C Actions multi-pointer model. One payload holds
//!   any number of per-finger timelines plus keyboard timelines, and the
//!   server interpolates motion from move durations.
//! - [`touch`]: the legacy per-step Touch Actions model. Drag motion must be
//!   pre-interpolated client-side into discrete timed steps.
//!
//! # Gesture construction
//!
//! Both models expose the same caller-level gestures (tap, long press,
//! swipe) on their top-level builders, composed from small fluent primitive
//! builders. All construction is synchronous and purely in-memory; duration
//! and pause values are data describing requested timing for the remote
//! executor, never local delays.
//!
//! ```
//! use tapwire_core::w3c::W3cActions;
//!
//! let payload = W3cActions::new().tap(120.0, 340.0, None);
//! let json = serde_json::to_string(&payload).unwrap();
//! assert!(json.contains("pointerDown"));
//! ```

pub mod touch;
pub mod w3c;

/// Default pause length in seconds.
///
/// Negative pause input in either model normalizes to this value rather
/// than being rejected.
pub const DEFAULT_PAUSE_SECONDS: f64 = 0.5;
