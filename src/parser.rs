use crate::error::{ForcesError, Result};
use crate::model::ForceRecord;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    num::ParseFloatError,
    path::Path,
};

/// Parse one line of a force file.
///
/// Returns `Ok(None)` for blank lines, comments and lines without exactly
/// [`ForceRecord::N_FIELDS`] tokens. Parenthesis around vector groups are ignored.
///
/// # Errors
/// Returns an error if a token of a 10-token line is not a number.
pub fn parse_line(line: &str) -> std::result::Result<Option<ForceRecord>, ParseFloatError> {
    let tokens: Vec<&str> = line
        .split_whitespace()
        .map(|tok| tok.trim_matches(|c| c == '(' || c == ')'))
        .collect();

    match tokens.first() {
        None => return Ok(None),
        Some(&"#") => return Ok(None),
        Some(_) => {}
    }
    if tokens.len() != ForceRecord::N_FIELDS {
        return Ok(None);
    }

    let mut fields = [0.0; ForceRecord::N_FIELDS];
    for (field, tok) in fields.iter_mut().zip(&tokens) {
        *field = tok.parse()?;
    }
    Ok(Some(ForceRecord::from_fields(fields)))
}

/// Parse every line of `reader`, dropping lines that are not records.
///
/// Lines that look like records but fail to parse, and lines that are not
/// valid UTF-8, are reported as warnings against `source` and skipped.
pub fn parse_reader<R: BufRead>(reader: R, source: &Path) -> Result<Vec<ForceRecord>> {
    let mut records = Vec::new();
    for (i_line, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|source_err| ForcesError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes);
        let line = match std::str::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => {
                log::warn!(
                    "could not decode line ({err}) in {source:?} line {}: {:?}",
                    i_line + 1,
                    String::from_utf8_lossy(bytes)
                );
                continue;
            }
        };
        match parse_line(line) {
            Ok(Some(rec)) => records.push(rec),
            Ok(None) => {}
            Err(err) => {
                log::warn!(
                    "could not convert string to float ({err}) in {source:?} line {}: {line:?}",
                    i_line + 1
                );
            }
        }
    }
    Ok(records)
}

/// Open and parse a force file.
pub fn parse_file<P: AsRef<Path>>(file: P) -> Result<Vec<ForceRecord>> {
    let file = file.as_ref();
    let handle = File::open(file).map_err(|source| ForcesError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    parse_reader(BufReader::new(handle), file)
}
