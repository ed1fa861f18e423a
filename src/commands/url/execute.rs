use std::error::Error;

use serde::Serialize;

use super::UrlCmd;
use crate::commands::Execute;
use crate::files::DesFiles;
use crate::params::ParameterBag;

/// Result of the url command execution
#[derive(Debug, Clone, Serialize)]
pub struct UrlResult {
    pub filetype: String,
    pub fs: String,
    pub schema: String,
    pub url: String,
}

impl Execute for UrlCmd {
    type Output = UrlResult;

    fn execute(self, files: &DesFiles) -> Result<Self::Output, Box<dyn Error>> {
        let bag = ParameterBag::from_pairs(&self.params)?;
        let url = files.url(&self.filetype, &bag)?;

        Ok(UrlResult {
            filetype: self.filetype,
            fs: files.mode().to_string(),
            schema: files.schema().to_string(),
            url,
        })
    }
}
