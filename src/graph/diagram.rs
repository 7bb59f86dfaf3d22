use crate::graph::sink::{EdgeAttrs, GraphSink, NodeAttrs};

/// Rank direction of the layered layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RankDir {
    /// Left to right.
    #[default]
    LR,
    /// Top to bottom.
    TB,
    /// Right to left.
    RL,
    /// Bottom to top.
    BT,
}

impl RankDir {
    /// Graphviz spelling of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LR => "LR",
            Self::TB => "TB",
            Self::RL => "RL",
            Self::BT => "BT",
        }
    }
}

/// Graph-level layout options handed to the renderer with every frame.
///
/// Distances are in pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphOptions {
    /// Rank direction.
    pub rankdir: RankDir,
    /// Horizontal margin around the drawing.
    pub marginx: f64,
    /// Vertical margin around the drawing.
    pub marginy: f64,
    /// Separation between nodes in the same rank.
    pub nodesep: f64,
    /// Separation between ranks.
    pub ranksep: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            rankdir: RankDir::LR,
            marginx: 10.0,
            marginy: 20.0,
            nodesep: 40.0,
            ranksep: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DiagramNode {
    pub id: String,
    pub attrs: NodeAttrs,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    pub attrs: EdgeAttrs,
}

/// Fresh directed graph populated once per rendered frame.
///
/// Nodes and edges keep their first-registration order so repeated renders of the same frame are
/// laid out identically.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DiagramGraph {
    options: GraphOptions,
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
}

impl DiagramGraph {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&DiagramEdge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

impl GraphSink for DiagramGraph {
    fn set_node(&mut self, id: &str, attrs: NodeAttrs) {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(existing) => existing.attrs = attrs,
            None => self.nodes.push(DiagramNode {
                id: id.to_string(),
                attrs,
            }),
        }
    }

    fn set_edge(&mut self, from: &str, to: &str, attrs: EdgeAttrs) {
        match self
            .edges
            .iter_mut()
            .find(|e| e.from == from && e.to == to)
        {
            Some(existing) => existing.attrs = attrs,
            None => self.edges.push(DiagramEdge {
                from: from.to_string(),
                to: to.to_string(),
                attrs,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_node_keeps_position_and_takes_new_attrs() {
        let mut g = DiagramGraph::default();
        g.set_node("a", NodeAttrs::ellipse("a"));
        g.set_node("b", NodeAttrs::ellipse("b"));
        g.set_node("a", NodeAttrs::ellipse("A"));

        let ids: Vec<_> = g.node_ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(g.node("a").unwrap().attrs.label, "A");
    }

    #[test]
    fn edges_are_keyed_by_ordered_pair() {
        let mut g = DiagramGraph::default();
        g.set_edge("a", "b", EdgeAttrs::basis("x"));
        g.set_edge("b", "a", EdgeAttrs::basis("y"));
        g.set_edge("a", "b", EdgeAttrs::basis("z"));

        assert_eq!(g.edges().len(), 2);
        assert_eq!(g.edge("a", "b").unwrap().attrs.label, "z");
        assert_eq!(g.edge("b", "a").unwrap().attrs.label, "y");
    }

    #[test]
    fn default_options_match_player_layout() {
        let o = GraphOptions::default();
        assert_eq!(o.rankdir, RankDir::LR);
        assert_eq!((o.marginx, o.marginy), (10.0, 20.0));
        assert_eq!((o.nodesep, o.ranksep), (40.0, 20.0));
    }
}
