//! Naming rules for the output tree.
//!
//! ```text
//! <output_root>/<base>_<YYYYMMDD>/<interval>/<base>_<interval>_<sorting>_<flag>_<value>....<ext>
//! ```
//!
//! Names are built as `OsString` so an input whose file name is not valid
//! UTF-8 still maps to a usable output path.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

use crate::catalog::{SampledParam, SortingAlgorithm};

/// File name of `input` without directory components or its last extension.
pub fn base_name(input: &Path) -> Result<OsString> {
    let stem = input
        .file_stem()
        .ok_or_else(|| anyhow!("input path has no file name: {}", input.display()))?;
    Ok(stem.to_os_string())
}

pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Root directory for one sweep: `<output_root>/<base>_<YYYYMMDD>`.
pub fn sweep_root(output_root: &Path, base: &OsStr, date: NaiveDate) -> PathBuf {
    let mut name = base.to_os_string();
    name.push("_");
    name.push(date_stamp(date));
    output_root.join(name)
}

/// File stem encoding every choice made for one invocation.
pub fn output_stem(
    base: &OsStr,
    interval: &str,
    sorting: SortingAlgorithm,
    params: &[SampledParam],
) -> OsString {
    let mut stem = base.to_os_string();
    stem.push(format!("_{interval}_{sorting}"));
    for param in params {
        stem.push(format!("_{}_{}", param.flag, param.value));
    }
    stem
}

/// Stem used when [`output_stem`] collides with a path already planned in
/// the same sweep.
pub fn trial_stem(stem: &OsStr, trial: u32) -> OsString {
    let mut renamed = stem.to_os_string();
    renamed.push(format!("_trial{trial}"));
    renamed
}

pub fn file_name(stem: &OsStr, extension: &str) -> OsString {
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    name
}
