use super::Source;
use crate::{Error, LocalTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, Null, ToSql, ToSqlOutput, ValueRef};

impl<'a> From<ValueRef<'a>> for Source<'a> {
    fn from(value: ValueRef<'a>) -> Self {
        match value {
            ValueRef::Null => Source::Null,
            ValueRef::Integer(v) => Source::Integer(v),
            ValueRef::Real(v) => Source::Real(v),
            ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Source::Text(text),
                Err(_) => Source::Bytes(bytes),
            },
            ValueRef::Blob(bytes) => Source::Bytes(bytes),
        }
    }
}

impl ToSql for LocalTime {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.value() {
            Some(text) => ToSqlOutput::from(text),
            None => ToSqlOutput::from(Null),
        })
    }
}

/// `NULL` is an incompatible type here; read `Option<LocalTime>` for
/// nullable columns.
impl FromSql for LocalTime {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let mut time = LocalTime::zero();
        time.scan(value).map_err(|err| match err {
            Error::IncompatibleType => FromSqlError::InvalidType,
            other => FromSqlError::Other(Box::new(other)),
        })?;
        Ok(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rusqlite::{Connection, OptionalExtension, params};

    fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE events (
                id INTEGER PRIMARY KEY,
                happened_at TEXT
            )",
        )
        .unwrap();
        conn
    }

    fn sample() -> LocalTime {
        LocalTime::from(Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap())
    }

    #[test]
    fn stores_default_layout_text() {
        let conn = open();
        conn.execute(
            "INSERT INTO events (id, happened_at) VALUES (?1, ?2)",
            params![1, sample()],
        )
        .unwrap();

        let raw: String = conn
            .query_row("SELECT happened_at FROM events WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(raw, "2024-01-15 12:30:45");

        let read: LocalTime = conn
            .query_row("SELECT happened_at FROM events WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(read.to_string(), "2024-01-15 12:30:45");
    }

    #[test]
    fn zero_is_stored_as_null() {
        let conn = open();
        conn.execute(
            "INSERT INTO events (id, happened_at) VALUES (?1, ?2)",
            params![1, LocalTime::zero()],
        )
        .unwrap();

        let is_null: bool = conn
            .query_row(
                "SELECT happened_at IS NULL FROM events WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(is_null);

        let read: Option<LocalTime> = conn
            .query_row("SELECT happened_at FROM events WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(read, None);
    }

    #[test]
    fn blob_column_is_read_as_bytes() {
        let conn = open();
        let read: LocalTime = conn
            .query_row("SELECT CAST('2024-01-15 12:30:45' AS BLOB)", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(read.to_string(), "2024-01-15 12:30:45");
    }

    #[test]
    fn integer_column_is_invalid_type() {
        let conn = open();
        let err = conn
            .query_row("SELECT 1705321845", [], |row| row.get::<_, LocalTime>(0))
            .unwrap_err();
        assert!(matches!(
            err,
            rusqlite::Error::InvalidColumnType(0, _, rusqlite::types::Type::Integer)
        ));
    }

    #[test]
    fn malformed_text_is_invalid_string() {
        let conn = open();
        let err = conn
            .query_row("SELECT '2024-01-15T12:30:45Z'", [], |row| {
                row.get::<_, LocalTime>(0)
            })
            .unwrap_err();
        match err {
            rusqlite::Error::FromSqlConversionFailure(0, _, source) => {
                assert_eq!(source.to_string(), "Invalid string for LocalTime");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_row_is_none() {
        let conn = open();
        let read: Option<LocalTime> = conn
            .query_row("SELECT happened_at FROM events WHERE id = 99", [], |row| {
                row.get(0)
            })
            .optional()
            .unwrap();
        assert!(read.is_none());
    }
}
