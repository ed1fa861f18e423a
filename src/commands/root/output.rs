//! Output formatting for root command results.

use super::execute::RootResult;
use crate::output::Outputable;

impl Outputable for RootResult {
    fn to_table(&self) -> String {
        self.root.clone()
    }
}
