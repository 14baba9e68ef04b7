//! Input sources
//!
//! What the analysis code needs from the outside world: intake events and the
//! current person. Implementations must hand out a consistent snapshot per
//! call.

use std::convert::Infallible;

use chrono::NaiveDate;

use crate::models::{IntakeEvent, Person};

/// Supplies intake events by date
pub trait EventSource {
    type Error;

    /// Events dated within `start..=end`
    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<IntakeEvent>, Self::Error>;

    fn events_on(&self, date: NaiveDate) -> Result<Vec<IntakeEvent>, Self::Error> {
        self.events_between(date, date)
    }
}

/// Supplies the person intake is evaluated for
pub trait ProfileSource {
    type Error;

    /// The person as of `on`; None when no profile has been recorded
    fn current_person(&self, on: NaiveDate) -> Result<Option<Person>, Self::Error>;
}

impl EventSource for [IntakeEvent] {
    type Error = Infallible;

    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<IntakeEvent>, Infallible> {
        Ok(self
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect())
    }
}

impl EventSource for Vec<IntakeEvent> {
    type Error = Infallible;

    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<IntakeEvent>, Infallible> {
        self.as_slice().events_between(start, end)
    }
}

impl ProfileSource for Person {
    type Error = Infallible;

    fn current_person(&self, _on: NaiveDate) -> Result<Option<Person>, Infallible> {
        Ok(Some(*self))
    }
}
