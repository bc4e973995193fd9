//! Storage label convention for submitted rosters.
//!
//! Convention: `{team}-{variant}-{DDMMYY}-{HHmm}`
//!
//! - `team` = team name lowercased with every non-alphanumeric character removed
//! - `variant` = lowercase competition variant
//! - the timestamp is taken in whatever time zone the caller passes (local time
//!   in the server)

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::ruleset::CompetitionVariant;

/// Lowercase `team_name` and strip everything that is not an ASCII letter or digit.
///
/// ```
/// use pronostiek_core::naming::sanitize_team_name;
///
/// assert_eq!(sanitize_team_name("De Flandriens!"), "deflandriens");
/// ```
pub fn sanitize_team_name(team_name: &str) -> String {
    team_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Build the label a submitted roster is stored under.
pub fn roster_label<Tz>(team_name: &str, variant: CompetitionVariant, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}-{}-{}",
        sanitize_team_name(team_name),
        variant.as_str(),
        at.format("%d%m%y-%H%M")
    )
}
