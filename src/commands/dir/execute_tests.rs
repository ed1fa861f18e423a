//! Execute tests for dir command.

#[cfg(test)]
mod tests {
    use super::super::DirCmd;
    use crate::commands::Execute;
    use crate::files::DesFiles;
    use crate::roots::FileSystemMode;
    use crate::schema::SchemaVersion;
    use crate::test_utils::test_files;
    use rstest::{fixture, rstest};

    #[fixture]
    fn files() -> DesFiles {
        test_files()
    }

    fn cmd(filetype: &str, params: &[&str]) -> DirCmd {
        DirCmd {
            filetype: filetype.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[rstest]
    fn test_dir_ignores_name_template(files: DesFiles) {
        let result = cmd("red_image", &["run=R1", "expname=E1"])
            .execute(&files)
            .unwrap();
        assert_eq!(result.dir, "/data/des/OPS/red/R1/red/E1");
    }

    #[rstest]
    fn test_dir_derived_expname(files: DesFiles) {
        let result = cmd(
            "red_exp",
            &["run=R1", "pointing=decam--24--15", "band=i", "visit=6"],
        )
        .execute(&files)
        .unwrap();
        assert_eq!(result.dir, "/data/des/OPS/red/R1/red/decam--24--15-i-6");
    }

    #[rstest]
    fn test_dir_v1(files: DesFiles) {
        let result = cmd("coadd_run", &["run=20120101_DES0010+0001"])
            .execute(&files.with_schema(SchemaVersion::V1))
            .unwrap();
        assert_eq!(result.dir, "/data/des/coadd/20120101_DES0010+0001/coadd");
    }

    #[rstest]
    fn test_dir_alternate_storage(files: DesFiles) {
        let result = cmd("finalcut_exp", &["run=Y1", "expnum=229326", "attnum=1"])
            .execute(&files.with_mode(FileSystemMode::AlternateStorage))
            .unwrap();
        assert_eq!(
            result.dir,
            "hdfs:///user/esheldon/DES/OPS/finalcut/Y1/D00229326/p01"
        );
        assert_eq!(result.fs, "hdfs");
    }

    #[rstest]
    fn test_dir_scratch(files: DesFiles) {
        let result = cmd("wlpipe_scratch", &["run=wl1", "expname=E1"])
            .execute(&files)
            .unwrap();
        assert_eq!(result.dir, "/scratch/wlpipe/wl1/E1");
    }
}
