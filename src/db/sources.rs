//! Record-store implementations of the input sources

use chrono::NaiveDate;

use super::{Database, DbError};
use crate::models::{IntakeEvent, IntakeRecord, Person, Profile};
use crate::sources::{EventSource, ProfileSource};

impl EventSource for Database {
    type Error = DbError;

    fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<IntakeEvent>, DbError> {
        self.with_conn(|conn| {
            let records = IntakeRecord::list_between(conn, start, end)?;
            Ok(records.iter().map(IntakeRecord::to_event).collect())
        })
    }
}

impl ProfileSource for Database {
    type Error = DbError;

    fn current_person(&self, on: NaiveDate) -> Result<Option<Person>, DbError> {
        self.with_conn(|conn| Ok(Profile::get(conn)?.map(|p| p.kind.person_on(on))))
    }
}
