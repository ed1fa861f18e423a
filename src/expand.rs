//! Variable expansion: template plus parameters to a concrete string.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{DesError, Result};
use crate::params::{ParamValue, ParameterBag};
use crate::roots::{FileSystemMode, RootResolver};
use crate::vars::{FormatRule, Variable, first_dollar, referenced, substitute};

/// Expands templates against a fixed root configuration.
#[derive(Debug, Clone, Default)]
pub struct Expander {
    roots: RootResolver,
    default_project: Option<String>,
}

impl Expander {
    pub fn new(roots: RootResolver, default_project: Option<String>) -> Self {
        Self {
            roots,
            default_project,
        }
    }

    pub fn roots(&self) -> &RootResolver {
        &self.roots
    }

    /// Substitute every variable in `template`.
    ///
    /// Variables are resolved in the fixed order of [`Variable::ALL`], so the
    /// first missing one reported is deterministic. The result never contains
    /// a `$`: anything left over is an [`DesError::UnresolvedVariable`].
    pub fn expand(
        &self,
        template: &str,
        bag: &ParameterBag,
        mode: FileSystemMode,
    ) -> Result<String> {
        let mut values: BTreeMap<Variable, String> = BTreeMap::new();
        for variable in referenced(template) {
            let value = self.value_for(variable, template, bag, mode)?;
            trace!(variable = variable.token(), value = %value, "resolved variable");
            values.insert(variable, value);
        }

        let expanded = substitute(template, |v| values.get(&v).cloned().unwrap_or_default());

        if let Some(remaining) = first_dollar(&expanded) {
            return Err(DesError::UnresolvedVariable {
                remaining,
                template: template.to_string(),
            });
        }

        debug!(template, mode = %mode, expanded = %expanded, "expanded template");
        Ok(expanded)
    }

    fn value_for(
        &self,
        variable: Variable,
        template: &str,
        bag: &ParameterBag,
        mode: FileSystemMode,
    ) -> Result<String> {
        match variable {
            Variable::DesData => return self.roots.root(mode).map(str::to_string),
            Variable::DesRemote => {
                return self.roots.root(FileSystemMode::Remote).map(str::to_string);
            }
            Variable::TmpDir => return self.roots.scratch().map(str::to_string),
            _ => {}
        }

        let value = supplied(bag, variable.param_name())
            .cloned()
            .or_else(|| self.derive(variable, bag))
            .ok_or_else(|| DesError::MissingVariable {
                token: variable.token().to_string(),
                hint: variable.missing_hint(),
                template: template.to_string(),
            })?;

        format_value(variable, &value)
    }

    fn derive(&self, variable: Variable, bag: &ParameterBag) -> Option<ParamValue> {
        match variable {
            Variable::ExpName => {
                let pointing = supplied(bag, "pointing")?;
                let band = supplied(bag, "band")?;
                let visit = supplied(bag, "visit")?;
                Some(ParamValue::Str(format!(
                    "{}-{}-{}",
                    pointing.render_plain(),
                    band.render_plain(),
                    visit.render_plain()
                )))
            }
            Variable::Project => self
                .default_project
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(ParamValue::from),
            Variable::Ccd => supplied(bag, Variable::CcdNum.param_name()).cloned(),
            Variable::CcdNum => supplied(bag, Variable::Ccd.param_name()).cloned(),
            _ => None,
        }
    }
}

/// A parameter counts as supplied only if it has content.
fn supplied<'a>(bag: &'a ParameterBag, key: &str) -> Option<&'a ParamValue> {
    bag.get(key).filter(|value| match value {
        ParamValue::Str(s) => !s.trim().is_empty(),
        ParamValue::List(items) => !items.is_empty(),
        ParamValue::Int(_) => true,
    })
}

fn format_value(variable: Variable, value: &ParamValue) -> Result<String> {
    match variable.format_rule() {
        FormatRule::ZeroPad(width) => {
            let n = value.as_int(variable.param_name())?;
            Ok(format!("{:0width$}", n, width = width))
        }
        FormatRule::Concat => Ok(value.render_plain()),
        FormatRule::Identity => {
            if value.is_list() {
                return Err(DesError::InvalidValue {
                    param: variable.param_name().to_string(),
                    value: value.render_plain(),
                    reason: "expected a single value, got a list".to_string(),
                });
            }
            Ok(value.render_plain())
        }
    }
}
