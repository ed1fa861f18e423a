//! End-to-end resolution through the public API.

use desdb::config::{Config, ConfigFile};
use desdb::roots::Roots;
use desdb::vars::Variable;
use desdb::{DesError, DesFiles, FileSystemMode, ParameterBag, SchemaVersion};
use rstest::{fixture, rstest};

#[fixture]
fn config() -> Config {
    let file: ConfigFile = serde_json::from_str(
        r#"{
            "roots": {
                "desdata": "/data/des",
                "desremote": "https://desar.example.org/DESFiles",
                "scratch": "/scratch"
            }
        }"#,
    )
    .unwrap();
    Config::from_sources(Some(file), |_| None).unwrap()
}

#[fixture]
fn files(config: Config) -> DesFiles {
    DesFiles::new(&config)
}

/// A bag that satisfies every variable any builtin template uses.
fn full_bag() -> ParameterBag {
    ParameterBag::new()
        .with("run", "20130101000000_20121124")
        .with("coadd_run", "20140101000000_DES0010+0001")
        .with("expname", "decam--24--15-i-6")
        .with("tilename", "DES0010+0001")
        .with("band", "i")
        .with("medsconf", "013")
        .with("filetype", "lensfit")
        .with("ext", "fits")
        .with("ccd", 7)
        .with("expnum", 229326)
        .with("reqnum", 1)
        .with("attnum", 1)
        .with("start", 0)
        .with("end", 999)
}

#[rstest]
fn test_coadd_image_end_to_end(files: DesFiles) {
    let bag = ParameterBag::new()
        .with("coadd_run", "20140101")
        .with("tilename", "DES0010+0001")
        .with("band", "i");
    assert_eq!(
        files.url("coadd_image", &bag).unwrap(),
        "/data/des/OPS/coadd/20140101/coadd/DES0010+0001_i.fits.fz"
    );
}

#[rstest]
fn test_resolution_is_deterministic(files: DesFiles) {
    let bag = full_bag();
    for tag in files.registry().tags() {
        let first = files.url(tag, &bag).unwrap();
        let second = files.url(tag, &bag).unwrap();
        assert_eq!(first, second, "{tag}");
    }
}

#[rstest]
#[case(SchemaVersion::V1, FileSystemMode::Local)]
#[case(SchemaVersion::V1, FileSystemMode::Remote)]
#[case(SchemaVersion::V2Beta, FileSystemMode::Local)]
#[case(SchemaVersion::V2Beta, FileSystemMode::Remote)]
#[case(SchemaVersion::V2Beta, FileSystemMode::AlternateStorage)]
fn test_no_dollar_survives(
    files: DesFiles,
    #[case] schema: SchemaVersion,
    #[case] mode: FileSystemMode,
) {
    let files = files.with_schema(schema).with_mode(mode);
    let bag = full_bag();
    for tag in files.registry().tags() {
        let url = files.url(tag, &bag).unwrap();
        assert!(!url.contains('$'), "{tag} resolved to {url}");
    }
}

#[rstest]
fn test_ccd_and_ccdnum_never_collide(files: DesFiles) {
    let bag = ParameterBag::new()
        .with("run", "R")
        .with("expnum", 229326)
        .with("band", "r")
        .with("ccd", 5)
        .with("ccdnum", 12)
        .with("reqnum", 3)
        .with("attnum", 1);
    let url = files.url("finalcut_image", &bag).unwrap();
    assert_eq!(
        url,
        "/data/des/OPS/finalcut/R/D00229326/p01/red/immask/D00229326_r_c12_r03p01_immasked.fits.fz"
    );
}

#[rstest]
fn test_missing_parameters_fail_without_partial_result(files: DesFiles) {
    let err = files.url("red_image", &ParameterBag::new()).unwrap_err();
    match err {
        DesError::MissingVariable { token, template, .. } => {
            assert_eq!(token, Variable::Run.token());
            assert!(template.contains("$RUN"));
        }
        other => panic!("expected MissingVariable, got {other:?}"),
    }
}

#[rstest]
fn test_unknown_type(files: DesFiles) {
    assert!(matches!(
        files.url("raw_image", &full_bag()),
        Err(DesError::UnknownFileType { tag }) if tag == "raw_image"
    ));
}

#[rstest]
fn test_derived_expname_matches_supplied(files: DesFiles) {
    let base = ParameterBag::new().with("run", "R").with("ccd", 1);
    let derived = base
        .clone()
        .with("pointing", "decam--24--15")
        .with("band", "i")
        .with("visit", "6");
    let direct = base.with("expname", "decam--24--15-i-6");
    assert_eq!(
        files.url("red_image", &derived).unwrap(),
        files.url("red_image", &direct).unwrap()
    );
}

#[rstest]
#[case(1, "01")]
#[case(9, "09")]
#[case(62, "62")]
fn test_ccd_padding(files: DesFiles, #[case] ccd: i64, #[case] padded: &str) {
    let bag = ParameterBag::new()
        .with("run", "R")
        .with("expname", "E")
        .with("ccd", ccd);
    let url = files.url("red_image", &bag).unwrap();
    assert!(url.ends_with(&format!("E_{padded}.fits.fz")), "{url}");
}

#[rstest]
fn test_mode_override_is_per_call(files: DesFiles) {
    let bag = full_bag();
    let remote = files
        .url_with_mode("coadd_cat", &bag, FileSystemMode::Remote)
        .unwrap();
    let local = files.url("coadd_cat", &bag).unwrap();
    assert!(remote.starts_with("https://desar.example.org/DESFiles/"));
    assert!(local.starts_with("/data/des/"));
}

#[rstest]
fn test_scratch_layout(files: DesFiles) {
    let url = files.url("wlpipe_scratch", &full_bag()).unwrap();
    assert_eq!(url, "/scratch/wlpipe/20130101000000_20121124/decam--24--15-i-6");
}

#[rstest]
fn test_unset_root_is_configuration_error() {
    let config = Config::from_sources(None, |_| None).unwrap();
    assert_eq!(config.roots, Roots::default());
    let err = DesFiles::new(&config)
        .url("red_run", &ParameterBag::new().with("run", "R"))
        .unwrap_err();
    assert_eq!(err.to_string(), "The DESDATA environment variable is not set");
}
