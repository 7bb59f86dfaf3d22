use std::{fmt::Write as _, time::Duration};

use crate::{
    foundation::error::FsmResult,
    graph::diagram::DiagramGraph,
    player::surface::{Controls, Mount, Surface},
};

const PX_PER_INCH: f64 = 72.0;

/// Serialize `graph` as Graphviz DOT text.
///
/// Output is deterministic: nodes then edges, each in registration order.
pub fn to_dot(graph: &DiagramGraph) -> String {
    to_dot_scaled(graph, None)
}

/// Like [`to_dot`], with the drawing scaled by `zoom` (a mount's `data-zoom`).
pub fn to_dot_scaled(graph: &DiagramGraph, zoom: Option<f64>) -> String {
    let opts = graph.options();
    let mut out = String::new();

    out.push_str("digraph {\n");
    let _ = writeln!(out, "  rankdir={};", opts.rankdir.as_str());
    if let Some(z) = zoom {
        let _ = writeln!(out, "  scale={z};");
    }
    let _ = writeln!(
        out,
        "  nodesep={}; ranksep={};",
        inches(opts.nodesep),
        inches(opts.ranksep)
    );
    let _ = writeln!(
        out,
        "  pad=\"{},{}\";",
        inches(opts.marginx),
        inches(opts.marginy)
    );

    out.push_str("  splines=spline;\n");

    for node in graph.nodes() {
        let _ = writeln!(
            out,
            "  {} [shape=ellipse, label={}];",
            quote(&node.id),
            quote(&node.attrs.label)
        );
    }

    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "  {} -> {} [label={}];",
            quote(&edge.from),
            quote(&edge.to),
            quote(&edge.attrs.label)
        );
    }

    out.push_str("}\n");
    out
}

fn inches(px: f64) -> String {
    let v = px / PX_PER_INCH;
    // 4 decimals, trailing zeros dropped.
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Surface that keeps every drawn frame as DOT text.
#[derive(Debug, Default)]
pub struct DotSurface {
    mount: Option<Mount>,
    controls: Option<Controls>,
    fill: f64,
    frames: Vec<String>,
}

impl DotSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&self) -> Option<&Mount> {
        self.mount.as_ref()
    }

    pub fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    pub fn fill(&self) -> f64 {
        self.fill
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn take_frames(&mut self) -> Vec<String> {
        std::mem::take(&mut self.frames)
    }
}

impl Surface for DotSurface {
    fn mount(&mut self, mount: &Mount, controls: &Controls) {
        self.mount = Some(mount.clone());
        self.controls = Some(controls.clone());
    }

    fn update_controls(&mut self, controls: &Controls) {
        self.controls = Some(controls.clone());
    }

    fn update_progress(&mut self, fill: f64) {
        self.fill = fill;
    }

    fn draw(&mut self, graph: &DiagramGraph, _transition: Duration) -> FsmResult<()> {
        let zoom = self.mount.as_ref().and_then(|m| m.zoom);
        self.frames.push(to_dot_scaled(graph, zoom));
        Ok(())
    }
}
