//! Output formatting for types command results.

use super::execute::TypesResult;
use crate::output::Outputable;

impl Outputable for TypesResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        let header = match &self.filter {
            Some(filter) => format!("File types ({}, {}) matching '{}'", self.schema, self.fs, filter),
            None => format!("File types ({}, {})", self.schema, self.fs),
        };
        lines.push(header);
        lines.push(String::new());

        if self.types.is_empty() {
            lines.push("No file types found.".to_string());
            return lines.join("\n");
        }

        let width = self.types.iter().map(|t| t.filetype.len()).max().unwrap_or(0);
        for entry in &self.types {
            let template = match &entry.name {
                Some(name) => format!("{}/{}", entry.dir, name),
                None => format!("{}/", entry.dir),
            };
            lines.push(format!("  {:<width$}  {}", entry.filetype, template, width = width));
        }

        lines.join("\n")
    }
}
