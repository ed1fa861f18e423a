//! Output formatting for dir command results.

use super::execute::DirResult;
use crate::output::Outputable;

impl Outputable for DirResult {
    fn to_table(&self) -> String {
        self.dir.clone()
    }
}
