use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{FsmError, FsmResult},
    player::surface::Mount,
    timeline::{cursor::Timeline, model::Step},
};

/// JSON form of a timeline: an array whose items are either an action object or an array of
/// action objects (a group).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TimelineDoc {
    pub steps: Vec<Step>,
}

impl TimelineDoc {
    pub fn validate(&self) -> FsmResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if let Step::Group(actions) = step
                && actions.is_empty()
            {
                return Err(FsmError::validation(format!("step {i}: group has no actions")));
            }
            for a in step.actions() {
                if a.from.trim().is_empty() {
                    return Err(FsmError::validation(format!(
                        "step {i}: action 'from' must be non-empty"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Rewound timeline over the document's steps.
    pub fn to_timeline(&self) -> Timeline {
        Timeline::from_steps(self.steps.clone())
    }
}

impl From<&Timeline> for TimelineDoc {
    fn from(tl: &Timeline) -> Self {
        Self {
            steps: tl.steps().to_vec(),
        }
    }
}

/// One player on a page: where it mounts and what it plays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneEntry {
    pub mount: Mount,
    pub timeline: TimelineDoc,
}

/// Every player of one page.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub players: Vec<SceneEntry>,
}

impl Scene {
    pub fn from_reader<R: std::io::Read>(r: R) -> FsmResult<Self> {
        serde_json::from_reader(r).map_err(|e| FsmError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> FsmResult<Self> {
        serde_json::from_str(s).map_err(|e| FsmError::serde(format!("parse scene JSON: {e}")))
    }

    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> FsmResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene JSON '{}'", path.display()))?;
        let scene = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(players = scene.players.len(), "loaded scene");
        Ok(scene)
    }

    pub fn validate(&self) -> FsmResult<()> {
        for (i, entry) in self.players.iter().enumerate() {
            entry
                .mount
                .validate()
                .and_then(|()| entry.timeline.validate())
                .map_err(|e| FsmError::validation(format!("player {i}: {e}")))?;
        }
        Ok(())
    }

    pub fn find(&self, selector: &str) -> Option<&SceneEntry> {
        self.players.iter().find(|p| p.mount.selector == selector)
    }
}
