//! A single planned invocation of the image tool.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::catalog::{IntervalAlgorithm, SampledParam, SortingAlgorithm};

/// Everything needed to run the tool once. Built per loop iteration and
/// dropped after the invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest<'a> {
    pub input: &'a Path,
    pub output: PathBuf,
    pub sorting: SortingAlgorithm,
    pub interval: &'a IntervalAlgorithm,
    /// Values drawn for this trial, in declaration order.
    pub params: &'a [SampledParam],
}

impl RunRequest<'_> {
    /// Arguments after the program name:
    /// `<input> -o <output> -s <sorting> -i <interval> [<flag> <value>]...`
    ///
    /// Paths are passed through untouched, whatever their encoding.
    pub fn tool_args(&self) -> Vec<OsString> {
        let mut args = vec![
            self.input.as_os_str().to_os_string(),
            OsString::from("-o"),
            self.output.as_os_str().to_os_string(),
            OsString::from("-s"),
            OsString::from(self.sorting.as_str()),
            OsString::from("-i"),
            OsString::from(self.interval.name),
        ];
        for param in self.params {
            args.push(OsString::from(param.flag));
            args.push(OsString::from(param.value.to_string()));
        }
        args
    }

    /// Full argument vector: the configured tool prefix followed by
    /// [`RunRequest::tool_args`].
    pub fn command_line(&self, tool: &[String]) -> Vec<OsString> {
        let mut command: Vec<OsString> = tool.iter().map(OsString::from).collect();
        command.extend(self.tool_args());
        command
    }
}

/// Space-joined rendering of `command` for console output. Non-UTF-8 bytes
/// show as U+FFFD here only.
pub fn display_command(command: &[OsString]) -> String {
    command
        .iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
