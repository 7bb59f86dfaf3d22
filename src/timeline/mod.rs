//! Stepped diagram timelines.
//!
//! A [`Timeline`](cursor::Timeline) is an append-only list of [`Step`](model::Step)s plus a
//! cursor. Moving the cursor never mutates the steps; [`frame`](cursor::Timeline::frame)
//! recomputes the cumulative diagram for `[0, pos]` from scratch on every call.

/// Cursor and cumulative frame evaluation.
pub mod cursor;
/// JSON documents describing timelines and multi-player scenes.
pub mod doc;
/// Actions and steps.
pub mod model;
