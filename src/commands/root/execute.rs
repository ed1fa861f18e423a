use std::error::Error;

use serde::Serialize;

use super::RootCmd;
use crate::commands::Execute;
use crate::files::DesFiles;

/// Result of the root command execution
#[derive(Debug, Clone, Serialize)]
pub struct RootResult {
    pub fs: String,
    pub scratch: bool,
    pub root: String,
}

impl Execute for RootCmd {
    type Output = RootResult;

    fn execute(self, files: &DesFiles) -> Result<Self::Output, Box<dyn Error>> {
        let root = if self.scratch {
            files.scratch()?
        } else {
            files.root()?
        };

        Ok(RootResult {
            fs: files.mode().to_string(),
            scratch: self.scratch,
            root: root.to_string(),
        })
    }
}
