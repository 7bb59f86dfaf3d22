//! Play/pause/step controller over a [`Timeline`](crate::Timeline).
//!
//! The player never interprets transitions. It moves the cursor, asks the timeline for the
//! cumulative frame, and hands the result to a [`Surface`](surface::Surface).

/// Player tuning loaded from JSON.
pub mod config;
/// The Idle/Playing state machine.
pub mod controller;
/// Mount point, controls and the drawing collaborator.
pub mod surface;
