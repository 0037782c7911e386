use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::foundation::error::{SnowError, SnowResult};
use crate::grid::activity::ActivityGrid;
use crate::source::{ActivityQuery, ActivitySource};

const CALENDAR_ROWS: usize = 7;
const CALENDAR_MIN_COLUMNS: usize = 53;

/// Reads a previously fetched activity document from disk.
///
/// Accepted shapes: a plain matrix `[[n, ...], ...]`, an object `{"contributions": [[...]]}`, or a
/// contribution-calendar GraphQL response, with or without its `data` envelope.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Source reading `path` on every fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActivitySource for JsonFileSource {
    fn fetch(&self, query: &ActivityQuery) -> SnowResult<ActivityGrid> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            SnowError::data_unavailable(format!("read '{}': {e}", self.path.display()))
        })?;
        let grid = parse_activity_json(&text)?;
        tracing::debug!(
            login = %query.login,
            year = query.year,
            rows = grid.rows(),
            cols = grid.cols(),
            "activity loaded"
        );
        Ok(grid)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityDocument {
    Matrix(Vec<Vec<u32>>),
    Wrapped { contributions: Vec<Vec<u32>> },
    Envelope { data: UserPayload },
    Bare(UserPayload),
}

#[derive(Deserialize)]
struct UserPayload {
    user: UserNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: Collection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Collection {
    contribution_calendar: Calendar,
}

#[derive(Deserialize)]
struct Calendar {
    weeks: Vec<Week>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Week {
    contribution_days: Vec<Day>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Day {
    contribution_count: u32,
}

/// Parse any accepted activity document into a grid.
pub fn parse_activity_json(text: &str) -> SnowResult<ActivityGrid> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| SnowError::data_unavailable(format!("invalid activity JSON: {e}")))?;

    if let Some(errors) = value.get("errors").and_then(|e| e.as_array())
        && let Some(first) = errors.first()
    {
        let msg = first
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error");
        return Err(SnowError::data_unavailable(format!(
            "provider reported an error: {msg}"
        )));
    }

    let doc: ActivityDocument = serde_json::from_value(value).map_err(|_| {
        SnowError::data_unavailable(
            "unrecognized activity document (expected a matrix, {\"contributions\": ...}, or a contribution calendar)",
        )
    })?;

    match doc {
        ActivityDocument::Matrix(rows) | ActivityDocument::Wrapped {
            contributions: rows,
        } => ActivityGrid::from_rows(rows),
        ActivityDocument::Envelope { data: payload } | ActivityDocument::Bare(payload) => {
            calendar_to_grid(payload.user.contributions_collection.contribution_calendar)
        }
    }
}

/// Week `w`, weekday `d` lands at row `d`, column `w`.
fn calendar_to_grid(calendar: Calendar) -> SnowResult<ActivityGrid> {
    if calendar.weeks.is_empty() {
        return Err(SnowError::data_unavailable("contribution calendar has no weeks"));
    }
    let cols = calendar.weeks.len().max(CALENDAR_MIN_COLUMNS);
    let mut rows = vec![vec![0u32; cols]; CALENDAR_ROWS];
    for (w, week) in calendar.weeks.iter().enumerate() {
        if week.contribution_days.len() > CALENDAR_ROWS {
            return Err(SnowError::data_unavailable(format!(
                "calendar week {w} has {} days",
                week.contribution_days.len()
            )));
        }
        for (d, day) in week.contribution_days.iter().enumerate() {
            rows[d][w] = day.contribution_count;
        }
    }
    ActivityGrid::from_rows(rows)
}

#[cfg(test)]
#[path = "../../tests/unit/source/json.rs"]
mod tests;
