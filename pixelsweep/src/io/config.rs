//! Sweep configuration stored in `pixelsweep.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pixelsweep.toml";

/// Sweep configuration (TOML).
///
/// Every field is optional in the file; missing fields fall back to the
/// values the harness has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SweepConfig {
    /// Program (and leading arguments) that performs the pixel sort,
    /// e.g. `["python", "pixelsort.py"]`.
    pub tool: Vec<String>,

    /// Directory the dated sweep directories are created under.
    pub output_root: PathBuf,

    /// Independent parameter draws per interval algorithm.
    pub trials: u32,

    /// Extension of generated images, without the dot.
    pub extension: String,

    /// Wall-clock budget for a single tool invocation.
    pub timeout_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            tool: vec!["pixelsort".to_string()],
            output_root: PathBuf::from("output_images"),
            trials: 5,
            extension: "png".to_string(),
            timeout_secs: 30 * 60,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tool.is_empty() || self.tool[0].trim().is_empty() {
            return Err(anyhow!("tool must be a non-empty array"));
        }
        if self.output_root.as_os_str().is_empty() {
            return Err(anyhow!("output_root must not be empty"));
        }
        if self.trials == 0 {
            return Err(anyhow!("trials must be > 0"));
        }
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(anyhow!(
                "extension must be a bare extension like \"png\", got {:?}",
                self.extension
            ));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be > 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SweepConfig::default()`.
pub fn load_config(path: &Path) -> Result<SweepConfig> {
    if !path.exists() {
        let cfg = SweepConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SweepConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Load the config named on the command line, or the default file in `dir`.
///
/// An explicitly named file must exist; the default file is optional.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<SweepConfig> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                bail!("config file {} not found", path.display());
            }
            load_config(path)
        }
        None => load_config(&dir.join(DEFAULT_CONFIG_FILE)),
    }
}
