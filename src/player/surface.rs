use std::time::Duration;

use crate::{
    foundation::error::{FsmError, FsmResult},
    graph::diagram::DiagramGraph,
};

/// On-screen container a player is attached to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mount {
    /// Container selector, e.g. `#fsm-choice`.
    pub selector: String,
    /// Initial zoom factor of the drawing (the container's `data-zoom`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl Mount {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            zoom: None,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn validate(&self) -> FsmResult<()> {
        if self.selector.trim().is_empty() {
            return Err(FsmError::validation("mount selector must be non-empty"));
        }
        if let Some(z) = self.zoom
            && !(z.is_finite() && z > 0.0)
        {
            return Err(FsmError::validation(format!(
                "mount '{}': zoom must be finite and > 0",
                self.selector
            )));
        }
        Ok(())
    }

    /// File-name friendly form of the selector (`#fsm-choice` -> `fsm-choice`).
    pub fn slug(&self) -> String {
        let mut out = String::with_capacity(self.selector.len());
        for c in self.selector.chars() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                out.push(c.to_ascii_lowercase());
            } else if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }
        let trimmed = out.trim_end_matches('-');
        if trimmed.is_empty() {
            "player".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// What the play/pause toggle currently offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ToggleFace {
    Play,
    Pause,
}

/// The three-button control strip.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Controls {
    pub toggle: ToggleFace,
    pub forward_enabled: bool,
    pub backward_enabled: bool,
    pub brand: String,
}

impl Controls {
    pub fn idle(brand: impl Into<String>) -> Self {
        Self {
            toggle: ToggleFace::Play,
            forward_enabled: true,
            backward_enabled: true,
            brand: brand.into(),
        }
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.toggle = if playing {
            ToggleFace::Pause
        } else {
            ToggleFace::Play
        };
        self.forward_enabled = !playing;
        self.backward_enabled = !playing;
    }
}

/// Drawing collaborator behind a player.
///
/// `mount` is called once, eagerly, when the player is built. `draw` receives a freshly built
/// graph for every rendered frame and is responsible for layout; it is the only fallible call
/// and its errors surface unchanged from the player's event handlers.
pub trait Surface {
    fn mount(&mut self, mount: &Mount, controls: &Controls);
    fn update_controls(&mut self, controls: &Controls);
    /// `fill` is in `[0, 1]`.
    fn update_progress(&mut self, fill: f64);
    fn draw(&mut self, graph: &DiagramGraph, transition: Duration) -> FsmResult<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    Mount(Mount, Controls),
    Controls(Controls),
    Progress(f64),
    Draw(DiagramGraph, Duration),
}

/// Surface that records every call, for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    fail_draws: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose `draw` always fails.
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail_draws: true,
        }
    }

    /// Toggle draw failures on an existing surface.
    pub fn set_failing(&mut self, fail: bool) {
        self.fail_draws = fail;
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn draws(&self) -> impl Iterator<Item = &DiagramGraph> {
        self.calls.iter().filter_map(|c| match c {
            SurfaceCall::Draw(g, _) => Some(g),
            _ => None,
        })
    }

    pub fn last_draw(&self) -> Option<&DiagramGraph> {
        self.draws().last()
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::Progress(p) => Some(*p),
            _ => None,
        })
    }

    pub fn last_controls(&self) -> Option<&Controls> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::Controls(ctl) | SurfaceCall::Mount(_, ctl) => Some(ctl),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn mount(&mut self, mount: &Mount, controls: &Controls) {
        self.calls.push(SurfaceCall::Mount(mount.clone(), controls.clone()));
    }

    fn update_controls(&mut self, controls: &Controls) {
        self.calls.push(SurfaceCall::Controls(controls.clone()));
    }

    fn update_progress(&mut self, fill: f64) {
        self.calls.push(SurfaceCall::Progress(fill));
    }

    fn draw(&mut self, graph: &DiagramGraph, transition: Duration) -> FsmResult<()> {
        if self.fail_draws {
            return Err(FsmError::render("recording surface configured to fail"));
        }
        self.calls.push(SurfaceCall::Draw(graph.clone(), transition));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_selector_punctuation() {
        assert_eq!(Mount::new("#fsm-choice").slug(), "fsm-choice");
        assert_eq!(Mount::new("div.Player #a b").slug(), "div-player-a-b");
        assert_eq!(Mount::new("#").slug(), "player");
    }

    #[test]
    fn zoom_must_be_positive() {
        assert!(Mount::new("#a").with_zoom(1.5).validate().is_ok());
        assert!(Mount::new("#a").with_zoom(0.0).validate().is_err());
        assert!(Mount::new("#a").with_zoom(f64::NAN).validate().is_err());
        assert!(Mount::new("  ").validate().is_err());
    }

    #[test]
    fn playing_controls_disable_steps() {
        let mut c = Controls::idle("x");
        c.set_playing(true);
        assert_eq!(c.toggle, ToggleFace::Pause);
        assert!(!c.forward_enabled && !c.backward_enabled);
        c.set_playing(false);
        assert_eq!(c, Controls::idle("x"));
    }
}
