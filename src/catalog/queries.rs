//! SQL for the catalog lookups.
//!
//! Values pasted into SQL go through [`escape_literal`], table prefixes
//! (release names) through [`check_identifier`]. Numeric ids are formatted
//! from integers and need neither.

use super::QueryError;

/// Stands in for the local root in [`red_info_query`]; replaced by the
/// caller when a local root is configured.
pub const LOCAL_ROOT_PLACEHOLDER: &str = "$DESDATA";

/// Escape a value for use inside a single-quoted SQL string literal.
pub fn escape_literal(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\'' => result.push_str("''"),
            '\0' => {}
            c => result.push(c),
        }
    }
    result
}

/// Release names are pasted unquoted, so they are restricted to letters,
/// digits and underscores.
pub fn check_identifier(name: &str) -> Result<&str, QueryError> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(name)
    } else {
        Err(QueryError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

fn id_list(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct red exposure names in a release for one band.
///
/// Exposures at zero declination are duplicated in the archive and skipped.
pub fn expnames_query(release: &str, band: &str) -> Result<String, QueryError> {
    let release = check_identifier(release)?;
    let band = escape_literal(band);
    Ok(format!(
        "select
    distinct(file_exposure_name) as expname
from
    {release}_files
where
    filetype='red'
    and band='{band}'
    and file_exposure_name not like '%-0-{band}%'
"
    ))
}

/// Red image and catalog pairs for a release and band.
///
/// Remote URLs are built against `remote_root`; local URLs keep
/// [`LOCAL_ROOT_PLACEHOLDER`] in front of the archive path.
pub fn red_info_query(release: &str, band: &str, remote_root: &str) -> Result<String, QueryError> {
    let release = check_identifier(release)?;
    let band = escape_literal(band);
    let remote = escape_literal(remote_root.trim_end_matches('/'));
    let local = LOCAL_ROOT_PLACEHOLDER;
    Ok(format!(
        "select
    im.file_exposure_name as expname,
    im.band,
    im.ccd,
    im.id as image_id,
    '{local}/' || im.path as image_url,
    '{remote}/' || im.path as image_url_remote,
    cat.id as cat_id,
    '{local}/' || cat.path as cat_url,
    '{remote}/' || cat.path as cat_url_remote
from
    {release}_files cat,
    {release}_files im
where
    cat.filetype='red_cat'
    and cat.band='{band}'
    and cat.catalog_parentid = im.id
    and cat.file_exposure_name not like '%-0-{band}%'
order by
    cat_id
"
    ))
}

/// Catalog id, runs, exposure and ccd for one red image id.
pub fn red_by_id_query(image_id: i64) -> String {
    format!(
        "select
    cat.id as cat_id,
    im.run as image_run,
    cat.run as cat_run,
    im.exposurename as expname,
    im.ccd as ccd,
    im.band
from
    location im,
    catalog cat
where
    cat.catalogtype='red_cat'
    and cat.parentid = im.id
    and im.id = {image_id}
"
    )
}

/// Image and catalog ids and runs for an exposure and ccd in a release.
pub fn red_by_dataset_query(dataset: &str, expname: &str, ccd: i64) -> Result<String, QueryError> {
    let release = check_identifier(dataset)?;
    let expname = escape_literal(expname);
    Ok(format!(
        "select
    im.id as image_id,
    cat.id as cat_id,
    im.run as image_run,
    cat.run as cat_run,
    im.band
from
    {release}_files cat,
    {release}_files im
where
    cat.filetype='red_cat'
    and cat.catalog_parentid = im.id
    and cat.file_exposure_name = '{expname}'
    and cat.ccd = {ccd}
"
    ))
}

/// The coadd image and catalog ids and tile for a coadd run and band.
pub fn coadd_by_run_band_query(run: &str, band: &str) -> String {
    format!(
        "select
    im.id as image_id,
    cat.id as cat_id,
    im.tilename
from
    coadd im,
    catalog cat
where
    cat.catalogtype='coadd_cat'
    and cat.parentid = im.id
    and im.run = '{}'
    and im.band = '{}'
",
        escape_literal(run),
        escape_literal(band)
    )
}

/// Catalog id, run, band and tile for one coadd image id.
pub fn coadd_by_id_query(image_id: i64) -> String {
    format!(
        "select
    cat.id as cat_id,
    im.run,
    im.band,
    im.tilename
from
    coadd im,
    catalog cat
where
    cat.catalogtype='coadd_cat'
    and cat.parentid = im.id
    and im.id = {image_id}
"
    )
}

/// Coadd image and catalog ids and run for a tile and band in a release.
pub fn coadd_by_dataset_query(dataset: &str, tilename: &str, band: &str) -> Result<String, QueryError> {
    let release = check_identifier(dataset)?;
    let tilename = escape_literal(tilename);
    let band = escape_literal(band);
    Ok(format!(
        "select
    im.id as image_id,
    cat.id as cat_id,
    im.run
from
    {release}_files cat,
    {release}_files im
where
    cat.filetype='coadd_cat'
    and cat.catalog_parentid = im.id
    and cat.tilename = '{tilename}'
    and cat.band='{band}'
"
    ))
}

/// Parents of the images that went into a coadd.
pub fn coadd_src_parents_query(coadd_image_id: i64) -> String {
    format!(
        "select
    image.parentid
from
    image, coadd_src
where
    coadd_src.coadd_imageid = {coadd_image_id}
    and coadd_src.src_imageid = image.id
"
    )
}

/// Type and parent of each image id, one step up the processing chain.
pub fn image_parents_query(ids: &[i64]) -> String {
    format!(
        "select
    id, imagetype, parentid
from
    image
where
    id in ({})
",
        id_list(ids)
    )
}

/// Run, exposure and ccd for a set of red image ids.
pub fn red_sources_query(ids: &[i64]) -> String {
    format!(
        "select
    id, run, exposurename as expname, ccd
from
    location
where
    id in ({})
order by id
",
        id_list(ids)
    )
}
