use crate::error::{ForcesError, Result};
use crate::model::{ForceRecord, ForceSeries};
use crate::parser::parse_file;
use glob::{Pattern, glob};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with records sharing a timestamp after merging fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep every record, in discovery order among ties.
    #[default]
    Keep,
    /// Keep the first discovered record of each timestamp.
    First,
    /// Keep the last discovered record of each timestamp.
    Last,
}

/// Resolve `input` into the list of force files to load.
///
/// A file resolves to itself. A directory resolves to every `force*.dat`
/// file inside its numerically named sub-directories, visited in ascending
/// numeric order.
///
/// # Errors
/// Returns [`ForcesError::NotFound`] if `input` does not exist.
pub fn discover_fragments<P: AsRef<Path>>(input: P, verbose: bool) -> Result<Vec<PathBuf>> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(ForcesError::NotFound(input.to_path_buf()));
    }
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut time_dirs: Vec<(f64, PathBuf)> = glob_paths(input, "*")?
        .into_iter()
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let time = path.file_name()?.to_str()?.parse::<f64>().ok()?;
            time.is_finite().then_some((time, path))
        })
        .collect();
    time_dirs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut fragments = Vec::new();
    for (_, time_dir) in time_dirs {
        progress(verbose, &format!("processing time dir {time_dir:?}"));
        fragments.extend(glob_paths(&time_dir, "force*.dat")?.into_iter().filter(|p| p.is_file()));
    }
    Ok(fragments)
}

fn glob_paths(dir: &Path, file_pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern_err = |source| ForcesError::Pattern {
        path: dir.to_path_buf(),
        source,
    };
    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join(file_pattern);
    let paths = glob(&pattern.to_string_lossy())
        .map_err(pattern_err)?
        .filter_map(|entry| entry.ok())
        .collect();
    Ok(paths)
}

/// Parse and merge `fragments` into one series.
///
/// Fragments are concatenated in order. With `sort` the result is
/// stable-sorted by time, otherwise it is taken in file order. `policy` is
/// applied last.
pub fn load_fragments<P: AsRef<Path>>(
    fragments: &[P],
    sort: bool,
    policy: DuplicatePolicy,
    verbose: bool,
) -> Result<ForceSeries> {
    let mut records = Vec::new();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        progress(verbose, &format!("processing: {fragment:?}"));
        records.extend(parse_file(fragment)?);
    }

    if sort {
        records.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
    let records = apply_policy(records, policy);

    progress(
        verbose,
        &format!("loaded {} records from {} files", records.len(), fragments.len()),
    );
    Ok(ForceSeries::new(records))
}

/// Discover and load all force fragments under `input`.
///
/// A single force file is taken in file order; a case directory is always
/// sorted by time, even when it holds one fragment.
pub fn load<P: AsRef<Path>>(input: P, policy: DuplicatePolicy, verbose: bool) -> Result<ForceSeries> {
    let input = input.as_ref();
    let fragments = discover_fragments(input, verbose)?;
    load_fragments(&fragments, input.is_dir(), policy, verbose)
}

fn apply_policy(mut records: Vec<ForceRecord>, policy: DuplicatePolicy) -> Vec<ForceRecord> {
    match policy {
        DuplicatePolicy::Keep => {}
        DuplicatePolicy::First => records.dedup_by(|next, kept| next.time == kept.time),
        DuplicatePolicy::Last => {
            records.reverse();
            records.dedup_by(|next, kept| next.time == kept.time);
            records.reverse();
        }
    }
    records
}

pub(crate) fn progress(verbose: bool, message: &str) {
    if verbose {
        log::info!("{message}");
    } else {
        log::debug!("{message}");
    }
}
