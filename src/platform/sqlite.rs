// Discount Card - platform/sqlite.rs
//
// SQLite-backed provider store.
//
// A fresh read-only connection is opened for every query and dropped when
// the query returns; nothing is pooled and nothing is ever written.
// Column names come only from `Dimension::column`, values are always bound
// parameters.

use crate::core::filter::Predicate;
use crate::core::model::{Dimension, ProviderRecord};
use crate::core::store::ProviderStore;
use crate::util::constants::PROVIDERS_TABLE;
use crate::util::error::StoreError;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};

/// Columns read for every provider row, in `ProviderRecord` field order.
const RECORD_COLUMNS: [&str; 10] = [
    "provider_name",
    "address",
    "phone",
    "hotline",
    "agreed_prices",
    "governorate",
    "area",
    "provider_type",
    "main_specialty",
    "sub_specialty",
];

/// Provider store backed by a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open the store at `path`, checking that the file can be opened and
    /// holds a providers table.
    ///
    /// The file is never created: a missing database is `Unreachable`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;

        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1)",
                [PROVIDERS_TABLE],
                |row| row.get(0),
            )
            .map_err(|e| store.query_error(e))?;

        if !exists {
            return Err(StoreError::MissingTable {
                path: store.path.clone(),
                table: PROVIDERS_TABLE,
            });
        }

        tracing::info!(path = %store.path.display(), "Provider database opened");
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Unreachable {
            path: self.path.clone(),
            source: e,
        })
    }

    fn query_error(&self, source: rusqlite::Error) -> StoreError {
        StoreError::Query {
            path: self.path.clone(),
            source,
        }
    }
}

/// Append ` AND column = ?` for each predicate.
fn push_predicates(sql: &mut String, predicates: &[Predicate<'_>]) {
    for p in predicates {
        sql.push_str(" AND ");
        sql.push_str(p.dimension.column());
        sql.push_str(" = ?");
    }
}

/// `SELECT DISTINCT` over one filter column, skipping NULL and empty values.
fn distinct_sql(dimension: Dimension, predicates: &[Predicate<'_>]) -> String {
    let column = dimension.column();
    let mut sql = format!(
        "SELECT DISTINCT {column} FROM {PROVIDERS_TABLE} \
         WHERE {column} IS NOT NULL AND {column} != ''"
    );
    push_predicates(&mut sql, predicates);
    sql
}

/// Row query in storage order; `1=1` anchors the AND chain.
fn rows_sql(predicates: &[Predicate<'_>]) -> String {
    let mut sql = format!(
        "SELECT {} FROM {PROVIDERS_TABLE} WHERE 1=1",
        RECORD_COLUMNS.join(", ")
    );
    push_predicates(&mut sql, predicates);
    sql
}

/// Render any SQLite value as text. NULL is absent; numbers keep their
/// decimal form so phone numbers stored as integers survive.
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(format!("{f:?}")),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}

fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    row.get::<_, Value>(idx).map(value_to_text)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ProviderRecord> {
    Ok(ProviderRecord {
        provider_name: text_at(row, 0)?,
        address: text_at(row, 1)?,
        phone: text_at(row, 2)?,
        hotline: text_at(row, 3)?,
        agreed_prices: text_at(row, 4)?,
        governorate: text_at(row, 5)?,
        area: text_at(row, 6)?,
        provider_type: text_at(row, 7)?,
        main_specialty: text_at(row, 8)?,
        sub_specialty: text_at(row, 9)?,
    })
}

impl ProviderStore for SqliteStore {
    fn distinct_values(
        &self,
        dimension: Dimension,
        predicates: &[Predicate<'_>],
    ) -> Result<Vec<String>, StoreError> {
        let sql = distinct_sql(dimension, predicates);
        tracing::debug!(%sql, params = predicates.len(), "Distinct query");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql).map_err(|e| self.query_error(e))?;
        let values = stmt
            .query_map(params_from_iter(predicates.iter().map(|p| p.value)), |row| {
                text_at(row, 0)
            })
            .map_err(|e| self.query_error(e))?
            .filter_map(|r| r.transpose())
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(|e| self.query_error(e))?;

        Ok(values)
    }

    fn rows(&self, predicates: &[Predicate<'_>]) -> Result<Vec<ProviderRecord>, StoreError> {
        let sql = rows_sql(predicates);
        tracing::debug!(%sql, params = predicates.len(), "Row query");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql).map_err(|e| self.query_error(e))?;
        let rows = stmt
            .query_map(
                params_from_iter(predicates.iter().map(|p| p.value)),
                record_from_row,
            )
            .map_err(|e| self.query_error(e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| self.query_error(e))?;

        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
