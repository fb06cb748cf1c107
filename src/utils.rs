use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{LabelParseError, SortError};
use crate::types::RawLabel;

// Optional sign followed by digits, with single underscores allowed
// between digits (`6_0` is 60). Returns the token without underscores.
fn integer_digits(token: &str) -> Option<String> {
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    if body.is_empty()
        || body.starts_with('_')
        || body.ends_with('_')
        || body.contains("__")
        || !body.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return None;
    }
    let digits: String = body.chars().filter(|&c| c != '_').collect();
    Some(if negative { format!("-{}", digits) } else { digits })
}

/// Parse the raw label from the first line of a YOLO annotation.
///
/// The label is the first whitespace-delimited token, e.g. `6` in
/// `6 0.1 0.2 0.3 0.4`. A well-formed integer too large for [`RawLabel`]
/// yields [`LabelParseError::OutOfRange`].
pub fn parse_label_line(line: &str) -> Result<RawLabel, LabelParseError> {
    if line.is_empty() {
        return Err(LabelParseError::Empty);
    }
    let token = line
        .split_whitespace()
        .next()
        .ok_or(LabelParseError::NoTokens)?;
    let digits =
        integer_digits(token).ok_or_else(|| LabelParseError::InvalidInteger(token.to_string()))?;
    digits
        .parse::<RawLabel>()
        .map_err(|_| LabelParseError::OutOfRange(digits))
}

/// Read only the first line of an annotation file and extract its raw label
pub fn read_first_label(path: &Path) -> Result<RawLabel, SortError> {
    let file = File::open(path).map_err(|e| SortError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut first_line = String::new();

    let malformed = |reason: LabelParseError| SortError::MalformedAnnotation {
        path: path.to_path_buf(),
        reason,
    };

    match reader.read_line(&mut first_line) {
        Ok(_) => parse_label_line(&first_line).map_err(malformed),
        Err(e) if e.kind() == ErrorKind::InvalidData => Err(malformed(LabelParseError::NotUtf8)),
        Err(e) => Err(SortError::io(path, e)),
    }
}

/// File name of a path as an owned string, for status lines
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(&format!(
        "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
        label
    )) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
