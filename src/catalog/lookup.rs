//! Catalog lookups that return rows with resolved file URLs attached.

use tracing::debug;

use super::queries::{
    LOCAL_ROOT_PLACEHOLDER, coadd_by_dataset_query, coadd_by_id_query, coadd_by_run_band_query,
    coadd_src_parents_query, escape_literal, expnames_query, image_parents_query,
    red_by_dataset_query, red_by_id_query, red_info_query, red_sources_query,
};
use super::{QueryError, QueryExecutor, Record, annotate, group_by_exposure, int_column, str_column};
use crate::files::DesFiles;
use crate::params::ParameterBag;
use crate::roots::FileSystemMode;
use std::collections::BTreeMap;

/// Parent steps walked from a coadd's inputs before giving up on finding
/// red images.
pub const MAX_SOURCE_DEPTH: usize = 5;

/// How a single red image and its catalog are identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedLookup {
    Id(i64),
    Dataset {
        dataset: String,
        expname: String,
        ccd: i64,
    },
}

/// How a single coadd image and its catalog are identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoaddLookup {
    Id(i64),
    RunBand {
        run: String,
        band: String,
    },
    Dataset {
        dataset: String,
        tilename: String,
        band: String,
    },
}

fn single_row(mut rows: Vec<Record>) -> Result<Record, QueryError> {
    if rows.len() != 1 {
        return Err(QueryError::UnexpectedRowCount {
            expected: 1,
            found: rows.len(),
        });
    }
    Ok(rows.remove(0))
}

/// Bag over `record` with `$RUN` and `$COADD_RUN` both taken from
/// `run_column`.
fn run_bag(record: &Record, run_column: &str) -> Result<ParameterBag, QueryError> {
    let run = str_column(record, run_column)?;
    Ok(ParameterBag::from_record(record)
        .with("run", run)
        .with("coadd_run", run))
}

/// Look up one red image and catalog and attach `image_url` and `cat_url`.
///
/// The lookup inputs are kept in the returned record; columns from the row
/// win on conflict. Image and catalog may come from different runs, so each
/// URL is built with its own run column.
pub fn red_urls(
    executor: &dyn QueryExecutor,
    files: &DesFiles,
    lookup: &RedLookup,
) -> Result<Record, QueryError> {
    let mut record = Record::new();
    let sql = match lookup {
        RedLookup::Id(id) => {
            record.insert("image_id".to_string(), (*id).into());
            red_by_id_query(*id)
        }
        RedLookup::Dataset {
            dataset,
            expname,
            ccd,
        } => {
            record.insert("dataset".to_string(), dataset.as_str().into());
            record.insert("expname".to_string(), expname.as_str().into());
            record.insert("ccd".to_string(), (*ccd).into());
            red_by_dataset_query(dataset, expname, *ccd)?
        }
    };
    record.extend(single_row(executor.query(&sql)?)?);

    let image_url = files.url("red_image", &run_bag(&record, "image_run")?)?;
    let cat_url = files.url("red_cat", &run_bag(&record, "cat_run")?)?;
    record.insert("image_url".to_string(), image_url.into());
    record.insert("cat_url".to_string(), cat_url.into());
    Ok(record)
}

/// Look up one coadd image and catalog and attach `image_url` and `cat_url`.
pub fn coadd_lookup(
    executor: &dyn QueryExecutor,
    files: &DesFiles,
    lookup: &CoaddLookup,
) -> Result<Record, QueryError> {
    let mut record = Record::new();
    let sql = match lookup {
        CoaddLookup::Id(id) => {
            record.insert("image_id".to_string(), (*id).into());
            coadd_by_id_query(*id)
        }
        CoaddLookup::RunBand { run, band } => {
            record.insert("run".to_string(), run.as_str().into());
            record.insert("band".to_string(), band.as_str().into());
            coadd_by_run_band_query(run, band)
        }
        CoaddLookup::Dataset {
            dataset,
            tilename,
            band,
        } => {
            record.insert("dataset".to_string(), dataset.as_str().into());
            record.insert("tilename".to_string(), tilename.as_str().into());
            record.insert("band".to_string(), band.as_str().into());
            coadd_by_dataset_query(dataset, tilename, band)?
        }
    };
    record.extend(single_row(executor.query(&sql)?)?);

    // v1 layouts key coadds by $RUN, later ones by $COADD_RUN
    let bag = run_bag(&record, "run")?;
    for (tag, column) in [("coadd_image", "image_url"), ("coadd_cat", "cat_url")] {
        let url = files.url(tag, &bag)?;
        record.insert(column.to_string(), url.into());
    }
    Ok(record)
}

/// Look up one coadd by run and band.
pub fn coadd_urls(
    executor: &dyn QueryExecutor,
    files: &DesFiles,
    run: &str,
    band: &str,
) -> Result<Record, QueryError> {
    coadd_lookup(
        executor,
        files,
        &CoaddLookup::RunBand {
            run: run.to_string(),
            band: band.to_string(),
        },
    )
}

/// Red images for the given ids with their URLs under `url`.
pub fn red_source_urls(
    executor: &dyn QueryExecutor,
    files: &DesFiles,
    ids: &[i64],
) -> Result<Vec<Record>, QueryError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut rows = executor.query(&red_sources_query(ids))?;
    annotate(files, "red_image", &mut rows, "url")?;
    Ok(rows)
}

fn parent_ids(rows: &[Record]) -> Result<Vec<i64>, QueryError> {
    rows.iter().map(|row| int_column(row, "parentid")).collect()
}

/// Red images that went into a coadd, with their URLs under `url`.
///
/// Coadd inputs are remapped products; their parents are walked upward
/// until the images are of type `red`, at most [`MAX_SOURCE_DEPTH`] times.
/// The image type of the first row stands for the whole level.
pub fn coadd_srclist(
    executor: &dyn QueryExecutor,
    files: &DesFiles,
    coadd_image_id: i64,
) -> Result<Vec<Record>, QueryError> {
    let mut ids = parent_ids(&executor.query(&coadd_src_parents_query(coadd_image_id))?)?;
    let mut last = String::new();

    for depth in 0..MAX_SOURCE_DEPTH {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = executor.query(&image_parents_query(&ids))?;
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        last = str_column(first, "imagetype")?.to_string();
        debug!(coadd_image_id, depth, imagetype = %last, ids = ids.len(), "walked source level");
        if last == "red" {
            return red_source_urls(executor, files, &ids);
        }
        ids = parent_ids(&rows)?;
    }

    Err(QueryError::SourceDepthExceeded {
        max: MAX_SOURCE_DEPTH,
        last,
    })
}

/// Red exposure names in a release for one band.
pub fn expnames(
    executor: &dyn QueryExecutor,
    release: &str,
    band: &str,
) -> Result<Vec<String>, QueryError> {
    executor
        .query(&expnames_query(release, band)?)?
        .iter()
        .map(|row| str_column(row, "expname").map(str::to_string))
        .collect()
}

/// Red image and catalog rows for a release and band with local and remote
/// URLs.
///
/// The remote root must be configured. Without a local root the local URLs
/// keep a literal `$DESDATA` prefix.
pub fn red_info(
    executor: &dyn QueryExecutor,
    files: &DesFiles,
    release: &str,
    band: &str,
) -> Result<Vec<Record>, QueryError> {
    let remote = files.root_with_mode(FileSystemMode::Remote)?;
    let mut sql = red_info_query(release, band, remote)?;
    if let Ok(local) = files.root_with_mode(FileSystemMode::Local) {
        let local = escape_literal(local.trim_end_matches('/'));
        sql = sql.replace(&format!("'{LOCAL_ROOT_PLACEHOLDER}/'"), &format!("'{local}/'"));
    }
    executor.query(&sql)
}

/// [`red_info`] grouped by exposure name.
pub fn red_info_by_exposure(
    executor: &dyn QueryExecutor,
    files: &DesFiles,
    release: &str,
    band: &str,
) -> Result<BTreeMap<String, Vec<Record>>, QueryError> {
    group_by_exposure(red_info(executor, files, release, band)?)
}
