//! Writing a batch of table reports to an output directory.

use crate::error::PipelineError;
use crate::request::TableRequest;
use crate::{ReportEngine, ReportHeader, ReportJob};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Output file for each input: `<stem>.pages.json` in `output_dir`. A stem already taken
/// by an earlier input gets `-2`, `-3`, ... appended.
pub fn batch_output_paths(inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "report".to_string());
            let mut name = stem.clone();
            let mut n = 1;
            while !taken.insert(name.clone()) {
                n += 1;
                name = format!("{}-{}", stem, n);
            }
            if n > 1 {
                log::warn!(
                    "{} shares the stem '{}' with an earlier input; writing {}.pages.json",
                    path.display(),
                    stem,
                    name
                );
            }
            output_dir.join(format!("{}.pages.json", name))
        })
        .collect()
}

/// Lays out every input request and writes the pages of each one that succeeds.
///
/// `header` builds the title band from the request's own title. Failed inputs are logged
/// after the others are written and reported together as [`PipelineError::Batch`].
pub fn write_report_batch<F>(
    engine: &ReportEngine,
    inputs: &[PathBuf],
    output_dir: &Path,
    header: F,
) -> Result<Vec<PathBuf>, PipelineError>
where
    F: Fn(Option<String>) -> ReportHeader,
{
    let targets = batch_output_paths(inputs, output_dir);
    let mut failures = Vec::new();
    let mut pending = Vec::new();
    let mut jobs = Vec::new();
    for (path, target) in inputs.iter().zip(targets) {
        match TableRequest::from_file(path) {
            Ok(request) => {
                let header = header(request.title.clone());
                jobs.push(ReportJob {
                    table: request.into_table(),
                    header,
                });
                pending.push((path, target));
            }
            Err(e) => failures.push((path, e)),
        }
    }

    fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();
    for ((path, target), result) in pending.into_iter().zip(engine.report_batch(jobs)) {
        let outcome = result.and_then(|pages| {
            fs::write(&target, serde_json::to_string_pretty(&pages)?)?;
            Ok(())
        });
        match outcome {
            Ok(()) => {
                log::info!("Wrote {}", target.display());
                written.push(target);
            }
            Err(e) => failures.push((path, e)),
        }
    }

    if failures.is_empty() {
        return Ok(written);
    }
    for (path, e) in &failures {
        log::error!("{}: {}", path.display(), e);
    }
    Err(PipelineError::Batch {
        failed: failures.len(),
        total: inputs.len(),
    })
}
