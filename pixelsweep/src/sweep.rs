//! Sweep orchestration.
//!
//! Walks every interval algorithm, draws `trials` parameter sets for each and
//! runs the tool once per sorting algorithm. A failed invocation is reported
//! and skipped; only directory creation and console writes can abort a sweep.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{INTERVAL_ALGORITHMS, SortingAlgorithm};
use crate::io::config::SweepConfig;
use crate::io::process::ProcessRunner;
use crate::layout::{base_name, file_name, output_stem, sweep_root, trial_stem};
use crate::request::{RunRequest, display_command};
use crate::sampler::{Sampler, draw_params};

/// Inputs for one sweep.
#[derive(Debug)]
pub struct SweepOptions<'a> {
    /// Existing image file handed to the tool.
    pub input: &'a Path,
    /// Day stamped into the sweep directory name.
    pub date: NaiveDate,
    pub config: &'a SweepConfig,
}

/// One invocation that did not produce an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    pub output: PathBuf,
    pub diagnostic: String,
}

/// What a finished sweep did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    /// `<output_root>/<base>_<YYYYMMDD>`.
    pub root: PathBuf,
    pub attempted: usize,
    pub generated: Vec<PathBuf>,
    pub failures: Vec<SweepFailure>,
}

/// Run the full sweep, writing progress lines to `out`.
#[instrument(skip_all, fields(input = %options.input.display(), trials = options.config.trials))]
pub fn run_sweep<S, R, W>(
    options: &SweepOptions<'_>,
    sampler: &mut S,
    runner: &R,
    out: &mut W,
) -> Result<SweepSummary>
where
    S: Sampler + ?Sized,
    R: ProcessRunner + ?Sized,
    W: Write + ?Sized,
{
    let config = options.config;
    let base = base_name(options.input)?;
    let root = sweep_root(&config.output_root, &base, options.date);
    fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;
    info!(root = %root.display(), "sweep started");

    let mut summary = SweepSummary {
        root: root.clone(),
        attempted: 0,
        generated: Vec::new(),
        failures: Vec::new(),
    };
    let mut planned: HashSet<PathBuf> = HashSet::new();

    for interval in INTERVAL_ALGORITHMS {
        let interval_dir = root.join(interval.name);
        fs::create_dir_all(&interval_dir)
            .with_context(|| format!("create {}", interval_dir.display()))?;

        for trial in 1..=config.trials {
            let params = draw_params(interval, sampler);
            debug!(interval = interval.name, trial, ?params, "parameters drawn");

            for sorting in SortingAlgorithm::ALL {
                let stem = output_stem(&base, interval.name, sorting, &params);
                let mut output = interval_dir.join(file_name(&stem, &config.extension));
                if !planned.insert(output.clone()) {
                    warn!(
                        path = %output.display(),
                        trial,
                        "output name collides with an earlier trial, adding trial suffix"
                    );
                    let renamed = trial_stem(&stem, trial);
                    output = interval_dir.join(file_name(&renamed, &config.extension));
                    planned.insert(output.clone());
                }

                let request = RunRequest {
                    input: options.input,
                    output,
                    sorting,
                    interval,
                    params: &params,
                };
                let command = request.command_line(&config.tool);
                writeln!(out, "Running command: {}", display_command(&command))
                    .context("write progress")?;

                summary.attempted += 1;
                match runner.run(&command) {
                    Ok(()) => {
                        writeln!(out, "Generated: {}", request.output.display())
                            .context("write progress")?;
                        summary.generated.push(request.output);
                    }
                    Err(err) => {
                        warn!(
                            output = %request.output.display(),
                            err = %format!("{err:#}"),
                            "tool invocation failed"
                        );
                        writeln!(
                            out,
                            "Error generating {}: {:#}",
                            request.output.display(),
                            err
                        )
                        .context("write progress")?;
                        summary.failures.push(SweepFailure {
                            output: request.output,
                            diagnostic: format!("{err:#}"),
                        });
                    }
                }
            }
        }
    }

    info!(
        attempted = summary.attempted,
        generated = summary.generated.len(),
        failed = summary.failures.len(),
        "sweep finished"
    );
    writeln!(
        out,
        "Generated {} of {} images ({} failed)",
        summary.generated.len(),
        summary.attempted,
        summary.failures.len()
    )
    .context("write progress")?;
    writeln!(out, "Processing complete!").context("write progress")?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedSampler, ScriptedRunner};

    fn config_in(dir: &Path) -> SweepConfig {
        SweepConfig {
            output_root: dir.join("output_images"),
            ..SweepConfig::default()
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    /// Sampler whose values never repeat, so no collisions occur.
    fn counting_sampler() -> FixedSampler {
        let reals = (1..=200).map(|i| f64::from(i) / 1000.0).collect();
        let ints = (10..=100).collect();
        FixedSampler::new(reals, ints)
    }

    #[test]
    fn attempts_every_combination_in_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_in(temp.path());
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::new();
        let mut out = Vec::new();

        let summary =
            run_sweep(&options, &mut counting_sampler(), &runner, &mut out).expect("sweep");

        assert_eq!(summary.attempted, 100);
        assert_eq!(summary.generated.len(), 100);
        assert!(summary.failures.is_empty());

        let calls = runner.calls();
        assert_eq!(calls.len(), 100);
        for (index, interval) in ["threshold", "random", "waves", "edges"].iter().enumerate() {
            let block = &calls[index * 25..(index + 1) * 25];
            assert!(block.iter().all(|call| call[7] == *interval));
            let sortings: Vec<&str> = block[..5].iter().map(|call| call[5].as_str()).collect();
            assert_eq!(
                sortings,
                vec!["lightness", "hue", "saturation", "intensity", "minimum"]
            );
        }
    }

    #[test]
    fn first_command_matches_calling_convention() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_in(temp.path());
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::new();
        let mut sampler = FixedSampler::new(vec![0.42, 0.77], vec![50]);

        run_sweep(&options, &mut sampler, &runner, &mut Vec::new()).expect("sweep");

        let expected_output = temp
            .path()
            .join("output_images/photo_20240601/threshold/photo_threshold_lightness_-t_0.42_-u_0.77.png");
        let first = &runner.calls()[0];
        assert_eq!(
            first,
            &vec![
                "pixelsort".to_string(),
                "photo.jpg".to_string(),
                "-o".to_string(),
                expected_output.to_string_lossy().into_owned(),
                "-s".to_string(),
                "lightness".to_string(),
                "-i".to_string(),
                "threshold".to_string(),
                "-t".to_string(),
                "0.42".to_string(),
                "-u".to_string(),
                "0.77".to_string(),
            ]
        );
    }

    #[test]
    fn one_draw_is_shared_by_all_sorting_algorithms() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_in(temp.path());
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::new();

        run_sweep(&options, &mut counting_sampler(), &runner, &mut Vec::new()).expect("sweep");

        let calls = runner.calls();
        for trial in calls.chunks(5) {
            let params: Vec<&[String]> = trial.iter().map(|call| &call[8..]).collect();
            assert!(params.windows(2).all(|pair| pair[0] == pair[1]));
        }
        assert_ne!(calls[0][8..], calls[5][8..]);
    }

    #[test]
    fn failures_do_not_stop_the_sweep() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_in(temp.path());
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::failing_on([0, 42]);
        let mut out = Vec::new();

        let summary =
            run_sweep(&options, &mut counting_sampler(), &runner, &mut out).expect("sweep");

        assert_eq!(runner.calls().len(), 100);
        assert_eq!(summary.generated.len(), 98);
        assert_eq!(summary.failures.len(), 2);
        assert!(summary.failures[0].diagnostic.contains("scripted failure #0"));

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("Error generating ").count(), 2);
        assert_eq!(text.matches("Generated: ").count(), 98);
        assert!(text.contains("Generated 98 of 100 images (2 failed)"));
        assert!(text.ends_with("Processing complete!\n"));
    }

    #[test]
    fn creates_interval_directories_and_reruns_cleanly() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_in(temp.path());
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };

        for _ in 0..2 {
            let runner = ScriptedRunner::new();
            let summary = run_sweep(&options, &mut counting_sampler(), &runner, &mut Vec::new())
                .expect("sweep");
            assert_eq!(
                summary.root,
                temp.path().join("output_images").join("photo_20240601")
            );
        }

        for interval in ["threshold", "random", "waves", "edges"] {
            let dir = temp
                .path()
                .join("output_images/photo_20240601")
                .join(interval);
            assert!(dir.is_dir(), "{}", dir.display());
        }
    }

    #[test]
    fn colliding_draws_get_trial_suffix() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_in(temp.path());
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::new();
        let mut sampler = FixedSampler::new(vec![0.5], vec![20]);

        let summary = run_sweep(&options, &mut sampler, &runner, &mut Vec::new()).expect("sweep");

        let unique: HashSet<&PathBuf> = summary.generated.iter().collect();
        assert_eq!(unique.len(), 100);

        let edges_dir = temp.path().join("output_images/photo_20240601/edges");
        assert!(
            summary
                .generated
                .contains(&edges_dir.join("photo_edges_hue_-t_0.5.png"))
        );
        assert!(
            summary
                .generated
                .contains(&edges_dir.join("photo_edges_hue_-t_0.5_trial4.png"))
        );
    }

    #[test]
    fn honors_configured_trials_tool_and_extension() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = SweepConfig {
            tool: vec!["python".to_string(), "pixelsort.py".to_string()],
            trials: 2,
            extension: "jpg".to_string(),
            ..config_in(temp.path())
        };
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::new();

        let summary =
            run_sweep(&options, &mut counting_sampler(), &runner, &mut Vec::new()).expect("sweep");

        assert_eq!(summary.attempted, 4 * 2 * 5);
        let calls = runner.calls();
        assert!(calls.iter().all(|call| call[0] == "python" && call[1] == "pixelsort.py"));
        assert!(calls.iter().all(|call| call[4].ends_with(".jpg")));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_input_is_passed_through_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let config = config_in(temp.path());
        let input = Path::new(OsStr::from_bytes(b"ph\xffoto.jpg"));
        let options = SweepOptions {
            input,
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::new();
        let mut out = Vec::new();

        let summary =
            run_sweep(&options, &mut counting_sampler(), &runner, &mut out).expect("sweep");

        let root_name = OsStr::from_bytes(b"ph\xffoto_20240601");
        assert_eq!(summary.root.file_name(), Some(root_name));
        let calls = runner.raw_calls();
        assert_eq!(calls.len(), 100);
        for call in &calls {
            assert_eq!(call[1].as_bytes(), b"ph\xffoto.jpg");
            let output = Path::new(&call[3]);
            assert!(output.starts_with(&summary.root));
            let name = output.file_name().expect("file name").as_bytes();
            assert!(name.starts_with(b"ph\xffoto_"));
        }
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Running command: pixelsort ph\u{fffd}oto.jpg -o "));
    }

    #[test]
    fn unwritable_root_is_fatal_before_any_invocation() {
        let temp = tempfile::tempdir().expect("tempdir");
        let blocker = temp.path().join("output_images");
        fs::write(&blocker, "not a directory").expect("write");
        let config = config_in(temp.path());
        let options = SweepOptions {
            input: Path::new("photo.jpg"),
            date: june_first(),
            config: &config,
        };
        let runner = ScriptedRunner::new();

        let err = run_sweep(&options, &mut counting_sampler(), &runner, &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("create"));
        assert!(runner.calls().is_empty());
    }
}
