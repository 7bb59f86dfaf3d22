use std::{fs::File, io::BufReader, path::Path, time::Duration};

use crate::{
    foundation::error::{FsmError, FsmResult},
    graph::diagram::GraphOptions,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Delay between auto-play ticks.
    pub tick_interval_ms: u64,
    /// Duration of the draw transition between frames.
    pub transition_ms: u64,
    pub layout: GraphOptions,
    /// Label shown next to the controls.
    pub brand: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1200,
            transition_ms: 800,
            layout: GraphOptions::default(),
            brand: "FSM player".to_string(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json_str(s: &str) -> FsmResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FsmError::config(format!("parse player config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FsmResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FsmError::config(format!("open player config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FsmError::config(format!("parse player config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FsmResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(FsmError::config("tick_interval_ms must be > 0"));
        }
        let l = &self.layout;
        for (name, v) in [
            ("marginx", l.marginx),
            ("marginy", l.marginy),
            ("nodesep", l.nodesep),
            ("ranksep", l.ranksep),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FsmError::config(format!(
                    "layout.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::diagram::RankDir;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = PlayerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, PlayerConfig::default());
        assert_eq!(cfg.tick_interval(), Duration::from_millis(1200));
        assert_eq!(cfg.transition(), Duration::from_millis(800));
    }

    #[test]
    fn partial_layout_keeps_other_defaults() {
        let cfg =
            PlayerConfig::from_json_str(r#"{"tick_interval_ms": 50, "layout": {"rankdir": "TB"}}"#)
                .unwrap();
        assert_eq!(cfg.tick_interval_ms, 50);
        assert_eq!(cfg.layout.rankdir, RankDir::TB);
        assert_eq!(cfg.layout.nodesep, 40.0);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = PlayerConfig::from_json_str(r#"{"tick_interval_ms": 0}"#).unwrap_err();
        assert!(err.to_string().starts_with("config error:"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(PlayerConfig::from_json_str(r#"{"tick_ms": 5}"#).is_err());
    }
}
