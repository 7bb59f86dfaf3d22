/// One labelled transition `from -> to`.
///
/// `to == None` marks a lone node; such an action never produces an edge.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Action {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Action {
    pub fn new(from: impl Into<String>, to: Option<String>, label: Option<String>) -> Self {
        Self {
            from: from.into(),
            to,
            label,
        }
    }

    /// Destination node, treating an empty string as absent.
    pub fn target(&self) -> Option<&str> {
        self.to.as_deref().filter(|s| !s.is_empty())
    }

    /// Edge label, treating an empty string as absent.
    pub fn edge_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|s| !s.is_empty())
    }
}

/// Top-level timeline element: a single action or a set of simultaneous ones.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Step {
    Group(Vec<Action>),
    Single(Action),
}

impl Step {
    /// Actions revealed by this step, in array order.
    pub fn actions(&self) -> &[Action] {
        match self {
            Self::Single(a) => std::slice::from_ref(a),
            Self::Group(g) => g,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}
