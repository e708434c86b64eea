//! Poster domain record and Catalan presentation strings.
//!
//! A `Poster` is immutable once parsed from the webhook. The derived
//! `when`/`where_line` strings are computed here and handed to the
//! composition pipeline as plain line text.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::error::CartellError;

/// Venue shared by every event in the series.
const VENUE: &str = "a l'Orfeó Catalònia";

/// Event data distilled from one webhook submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Poster {
    pub title: String,
    pub guest: String,
    pub date: NaiveDate,
    pub time: String,
    pub pic_url: String,
    pub event_type: String,
}

/// Event category key to venue phrase lookup.
///
/// Passed into the formatter explicitly so tests can substitute categories.
pub type VenueMap = HashMap<String, String>;

/// The two event categories the form offers today.
pub fn default_venues() -> VenueMap {
    VenueMap::from([
        (
            "Cena".to_string(),
            "sopar tertúlia amb l'autor".to_string(),
        ),
        (
            "Cuentos".to_string(),
            "copa de vi i montaditos".to_string(),
        ),
    ])
}

/// Formats a calendar date for display on the poster.
pub trait DateFormatter {
    /// Weekday, day number and month, e.g. "Dijous 14 de març".
    fn format_long(&self, date: NaiveDate) -> Result<String, CartellError>;
}

/// Catalan date formatter with "de"/"d'" month elision.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalanDateFormatter;

const WEEKDAYS: [&str; 7] = [
    "Dilluns",
    "Dimarts",
    "Dimecres",
    "Dijous",
    "Divendres",
    "Dissabte",
    "Diumenge",
];

const MONTHS: [&str; 12] = [
    "gener",
    "febrer",
    "març",
    "abril",
    "maig",
    "juny",
    "juliol",
    "agost",
    "setembre",
    "octubre",
    "novembre",
    "desembre",
];

impl DateFormatter for CatalanDateFormatter {
    fn format_long(&self, date: NaiveDate) -> Result<String, CartellError> {
        let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
        let month = MONTHS[date.month0() as usize];

        Ok(format!(
            "{} {:02} {}",
            weekday,
            date.day(),
            month_phrase(month)
        ))
    }
}

/// Months starting with a vowel elide the preposition: "d'abril", "de març".
fn month_phrase(month: &str) -> String {
    if month.starts_with(['a', 'e', 'i', 'o', 'u']) {
        format!("d'{}", month)
    } else {
        format!("de {}", month)
    }
}

impl Poster {
    /// Formatted date/time line, e.g. "Dijous 14 de març a les 20:00".
    pub fn when(&self, formatter: &dyn DateFormatter) -> Result<String, CartellError> {
        Ok(format!(
            "{} a les {}",
            formatter.format_long(self.date)?,
            self.time
        ))
    }

    /// Formatted venue line, e.g. "a l'Orfeó Catalònia, sopar tertúlia amb
    /// l'autor". An event type missing from the map yields the bare venue
    /// with no category phrase.
    pub fn where_line(&self, venues: &VenueMap) -> String {
        match venues.get(&self.event_type) {
            Some(phrase) => format!("{}, {}", VENUE, phrase),
            None => VENUE.to_string(),
        }
    }
}
