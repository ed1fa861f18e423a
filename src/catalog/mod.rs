//! Annotating catalog query results with file locations.
//!
//! The database itself is reached through [`QueryExecutor`]. [`queries`]
//! builds the SQL; the lookups run it and attach resolved paths to the rows
//! that come back.

mod lookup;
pub mod queries;

pub use lookup::{
    CoaddLookup, MAX_SOURCE_DEPTH, RedLookup, coadd_lookup, coadd_srclist, coadd_urls, expnames,
    red_info, red_info_by_exposure, red_source_urls, red_urls,
};
pub use queries::{check_identifier, escape_literal};

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::error::DesError;
use crate::files::DesFiles;
use crate::params::ParameterBag;

/// One result row: column name to value.
pub type Record = BTreeMap<String, serde_json::Value>;

/// Most CCD rows one exposure can contribute (chips on the camera).
pub const MAX_CCDS_PER_EXPOSURE: usize = 62;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Invalid identifier '{name}'")]
    InvalidIdentifier { name: String },

    #[error("Expected {expected} result(s), found {found}")]
    UnexpectedRowCount { expected: usize, found: usize },

    #[error("{expname} grown beyond {max} rows")]
    TooManyRows { expname: String, max: usize },

    #[error("Result row has no usable '{column}' column")]
    MissingColumn { column: String },

    #[error("Reached {max} iterations before finding 'red' images, last type was '{last}'")]
    SourceDepthExceeded { max: usize, last: String },

    #[error("Row {index}: {source}")]
    Annotate {
        index: usize,
        #[source]
        source: DesError,
    },

    #[error(transparent)]
    Resolve(#[from] DesError),
}

/// Runs SQL against the catalog database.
pub trait QueryExecutor {
    fn query(&self, sql: &str) -> Result<Vec<Record>, QueryError>;
}

/// Integer column, accepting numbers or numeric strings.
pub(crate) fn int_column(record: &Record, column: &str) -> Result<i64, QueryError> {
    let value = match record.get(column) {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    value.ok_or_else(|| QueryError::MissingColumn {
        column: column.to_string(),
    })
}

pub(crate) fn str_column<'a>(record: &'a Record, column: &str) -> Result<&'a str, QueryError> {
    record
        .get(column)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| QueryError::MissingColumn {
            column: column.to_string(),
        })
}

/// Resolve `tag` for every record and store the result under `column`.
///
/// Each record's columns form the parameter bag. Stops at the first record
/// that cannot be resolved; earlier records keep their new column.
pub fn annotate(
    files: &DesFiles,
    tag: &str,
    records: &mut [Record],
    column: &str,
) -> Result<(), QueryError> {
    for (index, record) in records.iter_mut().enumerate() {
        let bag = ParameterBag::from_record(record);
        let url = files
            .url(tag, &bag)
            .map_err(|source| QueryError::Annotate { index, source })?;
        record.insert(column.to_string(), serde_json::Value::String(url));
    }
    debug!(tag, column, rows = records.len(), "annotated records");
    Ok(())
}

/// Group red info rows by exposure name.
pub fn group_by_exposure(records: Vec<Record>) -> Result<BTreeMap<String, Vec<Record>>, QueryError> {
    let mut grouped: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for record in records {
        let expname = match record.get("expname") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let group = grouped.entry(expname.clone()).or_default();
        group.push(record);
        if group.len() > MAX_CCDS_PER_EXPOSURE {
            return Err(QueryError::TooManyRows {
                expname,
                max: MAX_CCDS_PER_EXPOSURE,
            });
        }
    }
    Ok(grouped)
}
