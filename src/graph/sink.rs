/// Node outline used by the diagram renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    /// FSM states are drawn as ellipses.
    #[default]
    Ellipse,
}

/// Edge interpolation hint passed through to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCurve {
    /// B-spline through the layout's control points.
    #[default]
    Basis,
}

/// Display attributes of one node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeAttrs {
    /// Outline shape.
    pub shape: NodeShape,
    /// Text drawn inside the node.
    pub label: String,
}

impl NodeAttrs {
    /// Ellipse labelled with `label`.
    pub fn ellipse(label: impl Into<String>) -> Self {
        Self {
            shape: NodeShape::Ellipse,
            label: label.into(),
        }
    }
}

/// Display attributes of one directed edge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeAttrs {
    /// Text drawn along the edge.
    pub label: String,
    /// Interpolation hint.
    pub curve: EdgeCurve,
}

impl EdgeAttrs {
    /// Basis-interpolated edge labelled with `label`.
    pub fn basis(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            curve: EdgeCurve::Basis,
        }
    }
}

/// Mutable graph-build target.
///
/// Implementations decide what repeated registrations mean; [`super::diagram::DiagramGraph`]
/// replaces the attributes of an existing node or edge in place.
pub trait GraphSink {
    /// Register (or update) node `id`.
    fn set_node(&mut self, id: &str, attrs: NodeAttrs);
    /// Register (or update) the directed edge `from -> to`.
    fn set_edge(&mut self, from: &str, to: &str, attrs: EdgeAttrs);
}
