//! Date source for new score entries

use chrono::{NaiveDate, Utc};

/// Format of the `date` field on stored entries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Clock {
    /// Current UTC calendar date
    fn today(&self) -> NaiveDate;

    /// Today's date as stored on an entry (`YYYY-MM-DD`)
    fn date_stamp(&self) -> String {
        self.today().format(DATE_FORMAT).to_string()
    }
}

/// Wall clock. On wasm32 chrono reads the browser's `Date`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
