use std::path::Path;

use anyhow::Context;

use crate::animation::reveal::RevealConfig;
use crate::foundation::error::{ReelError, ReelResult};

/// Env var forcing reduced motion (`1`/`true`/`yes` or `0`/`false`/`no`).
pub const ENV_REDUCED_MOTION: &str = "SCROLLREEL_REDUCED_MOTION";
/// Env var overriding the ambient ticker rate in Hz.
pub const ENV_TICK_HZ: &str = "SCROLLREEL_TICK_HZ";

/// Page-wide options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageOpts {
    /// Reveal constants shared by every block.
    pub reveal: RevealConfig,
    /// Visitor prefers reduced motion: scenes show their static description.
    pub reduced_motion: bool,
    /// Ambient ticker rate.
    pub tick_hz: u32,
}

impl Default for PageOpts {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::DEFAULT,
            reduced_motion: false,
            tick_hz: 30,
        }
    }
}

impl PageOpts {
    /// Check ranges.
    pub fn validate(&self) -> ReelResult<()> {
        self.reveal.validate()?;
        if self.tick_hz == 0 || self.tick_hz > 240 {
            return Err(ReelError::validation("tick_hz must be in 1..=240"));
        }
        Ok(())
    }

    /// Seconds per ambient tick.
    pub fn tick_dt(&self) -> f64 {
        1.0 / f64::from(self.tick_hz.max(1))
    }

    /// Parse and validate options from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read, parse and validate an options file.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read page options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Apply `SCROLLREEL_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|k| std::env::var(k).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Unparsable values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_REDUCED_MOTION).and_then(|v| parse_flag(&v)) {
            self.reduced_motion = v;
        }
        if let Some(hz) = lookup(ENV_TICK_HZ)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| (1..=240).contains(&n))
        {
            self.tick_hz = hz;
        }
        self
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
