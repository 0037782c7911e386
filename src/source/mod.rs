//! Activity data providers.
//!
//! A provider turns "whose activity, which year" into an [`ActivityGrid`]. Retrieval over the
//! network stays outside the crate; [`ActivityQuery::graphql_request_body`] produces the request
//! to send, and [`JsonFileSource`] reads what came back.

use crate::foundation::error::SnowResult;
use crate::grid::activity::ActivityGrid;

/// JSON-file provider.
pub mod json;

pub use json::{JsonFileSource, parse_activity_json};

const CONTRIBUTIONS_QUERY: &str = "query($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}";

/// Whose activity to fetch, and for which calendar year.
///
/// The default query is empty; file-backed sources such as [`JsonFileSource`] read the same
/// document whatever the query says.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    /// Account login.
    pub login: String,
    /// Calendar year.
    pub year: i32,
}

impl ActivityQuery {
    /// Query for `login` in `year`.
    pub fn new(login: impl Into<String>, year: i32) -> Self {
        Self {
            login: login.into(),
            year,
        }
    }

    /// Inclusive start of the range, as an RFC 3339 timestamp.
    pub fn from(&self) -> String {
        format!("{}-01-01T00:00:00Z", self.year)
    }

    /// Inclusive end of the range, as an RFC 3339 timestamp.
    pub fn to(&self) -> String {
        format!("{}-12-31T23:59:59Z", self.year)
    }

    /// GraphQL request body (`{"query", "variables"}`) for the contribution calendar.
    pub fn graphql_request_body(&self) -> serde_json::Value {
        serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": {
                "username": self.login,
                "from": self.from(),
                "to": self.to(),
            },
        })
    }
}

/// Source of activity grids.
pub trait ActivitySource {
    /// Produce the grid for `query`; failures are [`crate::SnowError::DataUnavailable`].
    fn fetch(&self, query: &ActivityQuery) -> SnowResult<ActivityGrid>;
}
