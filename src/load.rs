use crate::aggregate::group_commits;
use crate::error::{LocvizError, Result};
use crate::model::{CommitSet, LineChange};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Deserialize)]
struct RawRow {
    commit: String,
    author: String,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
    file: String,
    #[serde(rename = "type")]
    language: String,
    line: String,
    depth: String,
    length: String,
}

/// Load every line record from a CSV file, or from stdin when `path` is `-`.
pub fn load_line_changes<P: AsRef<Path>>(path: P) -> Result<Vec<LineChange>> {
    let path = path.as_ref();
    if path.as_os_str() == "-" {
        read_line_changes(io::stdin().lock())
    } else {
        read_line_changes(File::open(path)?)
    }
}

/// Same as [`load_line_changes`], with a spinner on stderr while parsing.
pub fn load_with_progress<P: AsRef<Path>>(path: P, show_progress: bool) -> Result<Vec<LineChange>> {
    if !show_progress {
        return load_line_changes(path);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Loading {}...", path.as_ref().display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = load_line_changes(path);
    match &result {
        Ok(lines) => pb.finish_with_message(format!("Loaded {} line records", lines.len())),
        Err(_) => pb.abandon_with_message("Load failed"),
    }
    result
}

/// Load and group in one step, so callers never hold a partially built commit set.
pub fn load_commits<P: AsRef<Path>>(
    path: P,
    url_base: Option<&str>,
    show_progress: bool,
) -> Result<CommitSet> {
    let lines = load_with_progress(path, show_progress)?;
    Ok(group_commits(lines, url_base))
}

pub fn read_line_changes<R: Read>(reader: R) -> Result<Vec<LineChange>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let mut out = Vec::new();
    for (idx, record) in rdr.deserialize::<RawRow>().enumerate() {
        // header is row 1
        let row = idx + 2;
        out.push(type_row(record?, row)?);
    }

    log::debug!("parsed {} line records", out.len());
    Ok(out)
}

fn type_row(raw: RawRow, row: usize) -> Result<LineChange> {
    let datetime = parse_datetime(&raw.datetime, &raw.timezone).ok_or_else(|| {
        LocvizError::InvalidDate {
            row,
            value: raw.datetime.clone(),
        }
    })?;

    Ok(LineChange {
        line_number: parse_int(&raw.line, "line", row)?,
        nesting_depth: parse_int(&raw.depth, "depth", row)?,
        length: parse_int(&raw.length, "length", row)?,
        commit_id: raw.commit,
        author: raw.author,
        date: raw.date,
        time: raw.time,
        timezone: raw.timezone,
        datetime,
        file: raw.file,
        language: raw.language,
    })
}

fn parse_int(value: &str, field: &'static str, row: usize) -> Result<u32> {
    value.parse().map_err(|_| LocvizError::InvalidField {
        row,
        field,
        value: value.to_string(),
    })
}

/// Parse an ISO timestamp. Naive timestamps take the offset from `timezone`, else UTC.
pub fn parse_datetime(raw: &str, timezone: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f %z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;
    let offset = parse_offset(timezone).or_else(|| FixedOffset::east_opt(0))?;
    naive.and_local_timezone(offset).single()
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HHMM` or `+HH` into a fixed offset.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    if tz.eq_ignore_ascii_case("z") || tz.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
