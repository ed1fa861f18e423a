//! Builtin file layouts, one independent registry per schema version.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DesError, RegistryError, Result};
use crate::registry::{TemplateDescriptor, TemplateRegistry};

/// Naming convention generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Original layout: `$DESDATA/red/$RUN/red`, coadds keyed by run
    V1,
    /// Project-scoped layout with finalcut, MEDS and weak lensing outputs
    #[default]
    #[value(name = "v2beta")]
    #[serde(rename = "v2beta")]
    V2Beta,
}

impl SchemaVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2Beta => "v2beta",
        }
    }

    /// The builtin registry for this version, built on first use.
    ///
    /// # Panics
    ///
    /// If the builtin table fails validation. That is a defect in the table
    /// and surfaces on the first lookup after startup.
    pub fn registry(self) -> &'static TemplateRegistry {
        match self {
            SchemaVersion::V1 => &V1,
            SchemaVersion::V2Beta => &V2BETA,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = DesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "v1" => Ok(SchemaVersion::V1),
            "v2beta" | "v2" => Ok(SchemaVersion::V2Beta),
            other => Err(DesError::Configuration {
                key: "DES_SCHEMA".to_string(),
                message: format!("schema should be 'v1' or 'v2beta', got '{}'", other),
            }),
        }
    }
}

static V1: LazyLock<TemplateRegistry> = LazyLock::new(|| {
    v1_registry().unwrap_or_else(|e| panic!("builtin v1 file table is invalid: {}", e))
});

static V2BETA: LazyLock<TemplateRegistry> = LazyLock::new(|| {
    v2beta_registry().unwrap_or_else(|e| panic!("builtin v2beta file table is invalid: {}", e))
});

fn v1_registry() -> std::result::Result<TemplateRegistry, RegistryError> {
    let mut reg = TemplateRegistry::new();

    reg.register(
        "red_run",
        TemplateDescriptor::new("$DESDATA/red/$RUN/red").with_remote("$DESREMOTE/red/$RUN/red"),
    )?;
    reg.register_derived("red_exp", "red_run", "/$EXPNAME", None)?;
    reg.register_derived("red_image", "red_exp", "", Some("$EXPNAME_$CCD.fits.fz"))?;
    reg.register_derived("red_cat", "red_exp", "", Some("$EXPNAME_$CCD_cat.fits"))?;

    reg.register(
        "coadd_run",
        TemplateDescriptor::new("$DESDATA/coadd/$RUN/coadd")
            .with_remote("$DESREMOTE/coadd/$RUN/coadd"),
    )?;
    reg.register_derived("coadd_image", "coadd_run", "", Some("$TILENAME_$BAND.fits.fz"))?;
    reg.register_derived("coadd_cat", "coadd_run", "", Some("$TILENAME_$BAND_cat.fits"))?;

    Ok(reg)
}

fn v2beta_registry() -> std::result::Result<TemplateRegistry, RegistryError> {
    let mut reg = TemplateRegistry::new();

    // single epoch
    reg.register(
        "red_run",
        TemplateDescriptor::new("$DESDATA/$PROJECT/red/$RUN/red")
            .with_remote("$DESREMOTE/$PROJECT/red/$RUN/red"),
    )?;
    reg.register_derived("red_exp", "red_run", "/$EXPNAME", None)?;
    reg.register_derived("red_image", "red_exp", "", Some("$EXPNAME_$CCD.fits.fz"))?;
    reg.register_derived("red_cat", "red_exp", "", Some("$EXPNAME_$CCD_cat.fits"))?;
    reg.register_derived("red_bkg", "red_exp", "", Some("$EXPNAME_$CCD_bkg.fits.fz"))?;
    reg.register_derived("red_seg", "red_exp", "", Some("$EXPNAME_$CCD_seg.fits.fz"))?;

    // DECam finalcut naming: D<expnum>_<band>_c<ccdnum>_r<reqnum>p<attnum>
    reg.register(
        "finalcut_exp",
        TemplateDescriptor::new("$DESDATA/$PROJECT/finalcut/$RUN/D$EXPNUM/p$ATTNUM")
            .with_remote("$DESREMOTE/$PROJECT/finalcut/$RUN/D$EXPNUM/p$ATTNUM"),
    )?;
    reg.register_derived(
        "finalcut_image",
        "finalcut_exp",
        "/red/immask",
        Some("D$EXPNUM_$BAND_c$CCDNUM_r$REQNUMp$ATTNUM_immasked.fits.fz"),
    )?;
    reg.register_derived(
        "finalcut_cat",
        "finalcut_exp",
        "/cat",
        Some("D$EXPNUM_$BAND_c$CCDNUM_r$REQNUMp$ATTNUM_red-fullcat.fits"),
    )?;

    // coadds
    reg.register(
        "coadd_run",
        TemplateDescriptor::new("$DESDATA/$PROJECT/coadd/$COADD_RUN/coadd")
            .with_remote("$DESREMOTE/$PROJECT/coadd/$COADD_RUN/coadd"),
    )?;
    reg.register_derived("coadd_image", "coadd_run", "", Some("$TILENAME_$BAND.fits.fz"))?;
    reg.register_derived("coadd_cat", "coadd_run", "", Some("$TILENAME_$BAND_cat.fits"))?;
    reg.register_derived("coadd_seg", "coadd_run", "", Some("$TILENAME_$BAND_seg.fits.fz"))?;
    reg.register_derived("coadd_psf", "coadd_run", "", Some("$TILENAME_$BAND_psfcat.psf"))?;

    // multi-epoch data structures
    reg.register(
        "meds_dir",
        TemplateDescriptor::new("$DESDATA/meds/$MEDSCONF/$COADD_RUN")
            .with_remote("$DESREMOTE/meds/$MEDSCONF/$COADD_RUN"),
    )?;
    reg.register_derived(
        "meds",
        "meds_dir",
        "",
        Some("$TILENAME-$BAND-meds-$MEDSCONF.fits.fz"),
    )?;
    reg.register_derived(
        "meds_srclist",
        "meds_dir",
        "",
        Some("$TILENAME-$BAND-meds-srclist-$MEDSCONF.dat"),
    )?;

    // weak lensing pipeline outputs; local only
    reg.register("wlpipe", TemplateDescriptor::new("$DESDATA/wlpipe"))?;
    reg.register_derived("wlpipe_run", "wlpipe", "/$RUN", None)?;
    reg.register_derived("wlpipe_exp", "wlpipe_run", "/$EXPNAME", None)?;
    reg.register_derived(
        "wlpipe_se_meta",
        "wlpipe_exp",
        "",
        Some("$RUN-$EXPNAME-$CCD-meta.yaml"),
    )?;
    reg.register_derived(
        "wlpipe_se_split",
        "wlpipe_exp",
        "",
        Some("$RUN-$EXPNAME-$CCD-$START-$END-$FILETYPE.$EXT"),
    )?;
    reg.register_derived(
        "wlpipe_me_split",
        "wlpipe_run",
        "/$TILENAME",
        Some("$RUN-$TILENAME-$BAND-$START-$END-$FILETYPE.$EXT"),
    )?;
    reg.register_derived(
        "wlpipe_collated",
        "wlpipe_run",
        "/collated",
        Some("$RUN-$FILETYPE.$EXT"),
    )?;
    reg.register(
        "wlpipe_scratch",
        TemplateDescriptor::new("$TMPDIR/wlpipe/$RUN/$EXPNAME"),
    )?;

    Ok(reg)
}
