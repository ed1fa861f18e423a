use std::error::Error;

use serde::Serialize;

use super::DirCmd;
use crate::commands::Execute;
use crate::files::DesFiles;
use crate::params::ParameterBag;

/// Result of the dir command execution
#[derive(Debug, Clone, Serialize)]
pub struct DirResult {
    pub filetype: String,
    pub fs: String,
    pub dir: String,
}

impl Execute for DirCmd {
    type Output = DirResult;

    fn execute(self, files: &DesFiles) -> Result<Self::Output, Box<dyn Error>> {
        let bag = ParameterBag::from_pairs(&self.params)?;
        let dir = files.dir(&self.filetype, &bag)?;

        Ok(DirResult {
            filetype: self.filetype,
            fs: files.mode().to_string(),
            dir,
        })
    }
}
