//! Name repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map each supported access pattern onto one parameterized statement
//!   against the `names` table.
//! - Classify store failures into semantic errors.
//!
//! # Invariants
//! - Every operation issues exactly one statement.
//! - Name, country and density comparisons use `COLLATE NOCASE`; stored
//!   values are never normalized.
//! - `get_between_*` return rows OUTSIDE `[min, max]` (`NOT BETWEEN`).
//! - `length` is written on insert but never read back.

use crate::db::DbError;
use crate::model::name::{Geography, Name, Popularity};
use log::{debug, error};
use rusqlite::{ffi, params, Connection, ErrorCode, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NAME_SELECT_SQL: &str = "SELECT
    name,
    rank_world,
    rank_country,
    usage_world,
    usage_country,
    origin,
    continent,
    country,
    country_density
FROM names";

const CREATE_NAMES_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS names (
    id INTEGER NOT NULL,
    name TEXT NOT NULL,
    length INTEGER NOT NULL,
    rank_world INTEGER NOT NULL,
    rank_country INTEGER NOT NULL,
    usage_world INTEGER NOT NULL,
    usage_country INTEGER NOT NULL,
    origin TEXT NOT NULL,
    continent TEXT NOT NULL,
    country TEXT NOT NULL,
    country_density TEXT NOT NULL,
    PRIMARY KEY (id),
    UNIQUE (name)
);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for name persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Exact lookup found no row.
    NameNotFound(String),
    /// Insert violated the uniqueness of `names.name`.
    DuplicateName { name: String, source: DbError },
    /// Any other store failure, including an unavailable store.
    DatabaseOperationFailed(DbError),
}

impl RepoError {
    /// Returns whether the error comes from a store that could not be opened.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOperationFailed(DbError::StorageUnavailable { .. })
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameNotFound(name) => write!(f, "name not found: `{name}`"),
            Self::DuplicateName { name, .. } => write!(f, "name already exists: `{name}`"),
            Self::DatabaseOperationFailed(err) => write!(f, "database operation failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NameNotFound(_) => None,
            Self::DuplicateName { source, .. } => Some(source),
            Self::DatabaseOperationFailed(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::DatabaseOperationFailed(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::DatabaseOperationFailed(DbError::Sqlite(value))
    }
}

/// Repository interface for the names dataset.
pub trait NameRepository {
    fn count(&self) -> RepoResult<i64>;
    fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
    /// Case-insensitive lookup of one row.
    ///
    /// Values differing only in case may coexist, so the returned row may be
    /// a case variant of `name`.
    fn get_by_name(&self, name: &str) -> RepoResult<Name>;
    fn get_by_country(&self, country: &str) -> RepoResult<Vec<Name>>;
    fn get_by_country_density(&self, country: &str) -> RepoResult<Vec<Name>>;
    fn get_all(&self) -> RepoResult<Vec<Name>>;
    /// Names whose `usage_world` lies outside `[min, max]`.
    fn get_between_usage_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>>;
    /// Names whose `usage_country` lies outside `[min, max]`.
    fn get_between_usage_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>>;
    /// Names whose `rank_world` lies outside `[min, max]`.
    fn get_between_rank_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>>;
    /// Names whose `rank_country` lies outside `[min, max]`.
    fn get_between_rank_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>>;
    fn add(&self, name: &Name) -> RepoResult<()>;
    /// Case-insensitive delete; removes every case variant of `name`.
    /// Deleting an absent name is a no-op.
    fn delete_by_name(&self, name: &str) -> RepoResult<()>;
    fn create(&self) -> RepoResult<()>;
}

/// Numeric columns usable by the interval filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericColumn {
    UsageWorld,
    UsageCountry,
    RankWorld,
    RankCountry,
}

impl NumericColumn {
    fn as_sql(self) -> &'static str {
        match self {
            Self::UsageWorld => "usage_world",
            Self::UsageCountry => "usage_country",
            Self::RankWorld => "rank_world",
            Self::RankCountry => "rank_country",
        }
    }
}

/// Text columns usable by the equality filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextColumn {
    Country,
    CountryDensity,
}

impl TextColumn {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::CountryDensity => "country_density",
        }
    }
}

/// SQLite-backed name repository.
pub struct SqliteNameRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNameRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn select_where(&self, column: TextColumn, value: &str) -> RepoResult<Vec<Name>> {
        let sql = format!(
            "{NAME_SELECT_SQL} WHERE {} = ?1 COLLATE NOCASE;",
            column.as_sql()
        );
        self.select_many(&sql, params![value])
    }

    fn select_outside(&self, column: NumericColumn, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        let sql = format!(
            "{NAME_SELECT_SQL} WHERE {} NOT BETWEEN ?1 AND ?2;",
            column.as_sql()
        );
        self.select_many(&sql, params![min, max])
    }

    fn select_many(&self, sql: &str, params: impl Params) -> RepoResult<Vec<Name>> {
        query_names(self.conn, sql, params).map_err(|err| {
            error!("event=name_select module=repo status=error error={err}");
            err.into()
        })
    }
}

impl NameRepository for SqliteNameRepository<'_> {
    fn count(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM names;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM names WHERE name = ?1 COLLATE NOCASE);",
            params![name],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn get_by_name(&self, name: &str) -> RepoResult<Name> {
        let mut stmt = self.conn.prepare(&format!(
            "{NAME_SELECT_SQL} WHERE name = ?1 COLLATE NOCASE LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![name])?;
        if let Some(row) = rows.next()? {
            return parse_name_row(row).map_err(RepoError::from);
        }

        Err(RepoError::NameNotFound(name.to_string()))
    }

    fn get_by_country(&self, country: &str) -> RepoResult<Vec<Name>> {
        self.select_where(TextColumn::Country, country)
    }

    fn get_by_country_density(&self, country: &str) -> RepoResult<Vec<Name>> {
        self.select_where(TextColumn::CountryDensity, country)
    }

    fn get_all(&self) -> RepoResult<Vec<Name>> {
        self.select_many(&format!("{NAME_SELECT_SQL};"), [])
    }

    fn get_between_usage_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.select_outside(NumericColumn::UsageWorld, min, max)
    }

    fn get_between_usage_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.select_outside(NumericColumn::UsageCountry, min, max)
    }

    fn get_between_rank_world(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.select_outside(NumericColumn::RankWorld, min, max)
    }

    fn get_between_rank_country(&self, min: i64, max: i64) -> RepoResult<Vec<Name>> {
        self.select_outside(NumericColumn::RankCountry, min, max)
    }

    fn add(&self, name: &Name) -> RepoResult<()> {
        let length = i64::try_from(name.length()).unwrap_or(i64::MAX);
        let inserted = self.conn.execute(
            "INSERT INTO names (
                name,
                length,
                rank_world,
                rank_country,
                usage_world,
                usage_country,
                origin,
                continent,
                country,
                country_density
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                name.value(),
                length,
                name.rank_world(),
                name.rank_country(),
                name.usage_world(),
                name.usage_country(),
                name.origin(),
                name.continent(),
                name.country(),
                name.country_density(),
            ],
        );

        match inserted {
            Ok(_) => {
                debug!("event=name_insert module=repo status=ok length={length}");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                debug!("event=name_insert module=repo status=duplicate length={length}");
                Err(RepoError::DuplicateName {
                    name: name.value().to_string(),
                    source: DbError::Sqlite(err),
                })
            }
            Err(err) => {
                error!("event=name_insert module=repo status=error error={err}");
                Err(err.into())
            }
        }
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<()> {
        let deleted = self.conn.execute(
            "DELETE FROM names WHERE name = ?1 COLLATE NOCASE;",
            params![name],
        )?;
        debug!("event=name_delete module=repo status=ok deleted={deleted}");
        Ok(())
    }

    fn create(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_NAMES_TABLE_SQL)?;
        debug!("event=schema_create module=repo status=ok table=names");
        Ok(())
    }
}

fn query_names(conn: &Connection, sql: &str, params: impl Params) -> rusqlite::Result<Vec<Name>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, parse_name_row)?;
    rows.collect()
}

fn parse_name_row(row: &Row<'_>) -> rusqlite::Result<Name> {
    Ok(Name::new(
        row.get::<_, String>("name")?,
        Popularity {
            rank_world: row.get("rank_world")?,
            rank_country: row.get("rank_country")?,
            usage_world: row.get("usage_world")?,
            usage_country: row.get("usage_country")?,
        },
        Geography {
            origin: row.get("origin")?,
            continent: row.get("continent")?,
            country: row.get("country")?,
            country_density: row.get("country_density")?,
        },
    ))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
