use std::collections::HashSet;

use crate::{
    graph::sink::{EdgeAttrs, GraphSink, NodeAttrs},
    timeline::model::{Action, Step},
};

/// Cursor snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Progress {
    /// `-1` before the first step, `length - 1` at the last.
    pub pos: isize,
    /// Number of top-level steps (a group counts once).
    pub length: usize,
}

impl Progress {
    /// Proportional fill `(pos + 1) / length`, 0 for an empty timeline.
    pub fn fraction(self) -> f64 {
        if self.length == 0 {
            return 0.0;
        }
        let done = (self.pos + 1).max(0) as f64;
        (done / self.length as f64).clamp(0.0, 1.0)
    }
}

/// Ordered steps plus a cursor.
///
/// Built by value (`Timeline::new().edge(..).group()..end()`); afterwards only the cursor moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    steps: Vec<Step>,
    pos: isize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            pos: -1,
        }
    }

    /// Rewound timeline over `steps`.
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps, pos: -1 }
    }

    /// Append a single action. `to` and `label` may be omitted.
    pub fn add(mut self, from: &str, to: Option<&str>, label: Option<&str>) -> Self {
        self.steps.push(Step::Single(action(from, to, label)));
        self
    }

    /// Append a labelled transition `from -> to`.
    pub fn edge(self, from: &str, to: &str, label: &str) -> Self {
        self.add(from, Some(to), Some(label))
    }

    /// Append a lone node.
    pub fn node(self, from: &str) -> Self {
        self.add(from, None, None)
    }

    pub fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Start a group of simultaneous actions; [`GroupBuilder::end`] appends it as one step.
    pub fn group(self) -> GroupBuilder {
        GroupBuilder {
            parent: self,
            actions: Vec::new(),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn pos(&self) -> isize {
        self.pos
    }

    pub fn progress(&self) -> Progress {
        Progress {
            pos: self.pos,
            length: self.steps.len(),
        }
    }

    fn last_index(&self) -> isize {
        self.steps.len() as isize - 1
    }

    /// `true` at the last step, and for an empty timeline.
    pub fn finished(&self) -> bool {
        self.pos >= self.last_index()
    }

    pub fn rewind(&mut self) {
        self.pos = -1;
    }

    /// Advance one step. Returns `false` (cursor unchanged) at the end.
    pub fn next(&mut self) -> bool {
        if self.pos < self.last_index() {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Step back one step. Moving from 0 to -1 succeeds; from -1 it returns `false`.
    pub fn prev(&mut self) -> bool {
        if self.pos >= 0 {
            self.pos -= 1;
            true
        } else {
            false
        }
    }

    /// Report every node and edge visible at the cursor into `g`.
    ///
    /// Covers steps `[0, pos]` in order, and within a group in array order. Each node id is
    /// registered once per call. An action registers an edge only when it has both a target and
    /// a non-empty label. Nothing is reported while the cursor is outside `[0, len - 1]`.
    pub fn frame<G: GraphSink + ?Sized>(&self, g: &mut G) {
        if self.pos < 0 || self.pos > self.last_index() {
            return;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for step in &self.steps[..=self.pos as usize] {
            for a in step.actions() {
                if seen.insert(a.from.as_str()) {
                    g.set_node(&a.from, NodeAttrs::ellipse(a.from.as_str()));
                }
                let Some(to) = a.target() else {
                    continue;
                };
                if seen.insert(to) {
                    g.set_node(to, NodeAttrs::ellipse(to));
                }
                if let Some(label) = a.edge_label() {
                    g.set_edge(&a.from, to, EdgeAttrs::basis(label));
                }
            }
        }
    }
}

/// Accumulates one group; see [`Timeline::group`].
///
/// Has no `group` method of its own: groups do not nest.
#[derive(Debug)]
pub struct GroupBuilder {
    parent: Timeline,
    actions: Vec<Action>,
}

impl GroupBuilder {
    pub fn add(mut self, from: &str, to: Option<&str>, label: Option<&str>) -> Self {
        self.actions.push(action(from, to, label));
        self
    }

    pub fn edge(self, from: &str, to: &str, label: &str) -> Self {
        self.add(from, Some(to), Some(label))
    }

    pub fn node(self, from: &str) -> Self {
        self.add(from, None, None)
    }

    /// Append the accumulated actions as a single step and hand back the timeline.
    pub fn end(self) -> Timeline {
        let mut parent = self.parent;
        parent.steps.push(Step::Group(self.actions));
        parent
    }
}

fn action(from: &str, to: Option<&str>, label: Option<&str>) -> Action {
    Action::new(from, to.map(str::to_string), label.map(str::to_string))
}
