//! SQLite conversions for domain enums

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::models::NutrientKind;

impl ToSql for NutrientKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for NutrientKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let key = value.as_str()?;
        NutrientKind::from_str(key)
            .ok_or_else(|| FromSqlError::Other(format!("unknown nutrient '{}'", key).into()))
    }
}
