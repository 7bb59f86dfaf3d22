//! Directed graph collector fed by [`crate::Timeline::frame`].
//!
//! The timeline only knows how to report nodes and edges into a [`GraphSink`]; laying the graph
//! out and drawing it belongs to whatever sits behind the sink.

/// Graphviz DOT text export.
pub mod dot;
/// In-memory diagram graph and its layout options.
pub mod diagram;
/// Collector trait and node/edge display attributes.
pub mod sink;
