use std::error::Error;

use serde::Serialize;

use super::TypesCmd;
use crate::commands::Execute;
use crate::files::DesFiles;

/// One registered file type, with the templates used in the active mode
#[derive(Debug, Clone, Serialize)]
pub struct FileTypeEntry {
    pub filetype: String,
    pub dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Result of the types command execution
#[derive(Debug, Default, Serialize)]
pub struct TypesResult {
    pub schema: String,
    pub fs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub types: Vec<FileTypeEntry>,
}

impl Execute for TypesCmd {
    type Output = TypesResult;

    fn execute(self, files: &DesFiles) -> Result<Self::Output, Box<dyn Error>> {
        let mode = files.mode();
        let types = files
            .registry()
            .entries()
            .filter(|(tag, _)| match &self.filter {
                Some(filter) => tag.contains(filter.as_str()),
                None => true,
            })
            .map(|(tag, descriptor)| FileTypeEntry {
                filetype: tag.to_string(),
                dir: descriptor.dir_template(mode).to_string(),
                name: descriptor.name.clone(),
            })
            .collect();

        Ok(TypesResult {
            schema: files.schema().to_string(),
            fs: mode.to_string(),
            filter: self.filter,
            types,
        })
    }
}
