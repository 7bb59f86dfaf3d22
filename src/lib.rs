//! Stepped finite-state-machine diagrams.
//!
//! A [`Timeline`] lists the transitions of a diagram in reveal order; a [`Player`] steps through
//! it under play/pause/step controls, drawing the cumulative diagram on a [`Surface`] after every
//! successful step.
//!
//! - Build a timeline with [`Timeline::new`] or load a [`Scene`] from JSON
//! - Wrap it in a [`Player`] with a surface and a [`VirtualClock`]
//! - Feed it [`PlayerEvent`]s
#![forbid(unsafe_code)]

pub mod clock;
mod foundation;
pub mod graph;
pub mod player;
pub mod timeline;

pub use crate::foundation::error::{FsmError, FsmResult};

pub use crate::clock::{Scheduler, TimerToken, VirtualClock};
pub use crate::graph::diagram::{DiagramEdge, DiagramGraph, DiagramNode, GraphOptions, RankDir};
pub use crate::graph::dot::{DotSurface, to_dot};
pub use crate::graph::sink::{EdgeAttrs, EdgeCurve, GraphSink, NodeAttrs, NodeShape};
pub use crate::player::config::PlayerConfig;
pub use crate::player::controller::{PlayState, Player, PlayerEvent};
pub use crate::player::surface::{
    Controls, Mount, RecordingSurface, Surface, SurfaceCall, ToggleFace,
};
pub use crate::timeline::cursor::{GroupBuilder, Progress, Timeline};
pub use crate::timeline::doc::{Scene, SceneEntry, TimelineDoc};
pub use crate::timeline::model::{Action, Step};
