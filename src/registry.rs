//! File type registry: tag to directory and name templates.
//!
//! Registries are filled once, validated as they are filled, and only read
//! afterwards. Derived entries copy their parent's template strings at
//! registration time, so each entry is self-contained.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{DesError, RegistryError, Result};
use crate::roots::FileSystemMode;
use crate::vars::unknown_token;

/// Directory and file name templates for one file type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub local_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TemplateDescriptor {
    /// A directory-only descriptor.
    pub fn new(local_dir: &str) -> Self {
        Self {
            local_dir: local_dir.to_string(),
            remote_dir: None,
            name: None,
        }
    }

    pub fn with_remote(mut self, remote_dir: &str) -> Self {
        self.remote_dir = Some(remote_dir.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// A directory-only child whose templates extend this one's by `suffix`.
    pub fn subdir(&self, suffix: &str) -> Self {
        Self {
            local_dir: format!("{}{}", self.local_dir, suffix),
            remote_dir: self
                .remote_dir
                .as_ref()
                .map(|remote| format!("{}{}", remote, suffix)),
            name: None,
        }
    }

    /// The directory template used in `mode`; remote falls back to local.
    pub fn dir_template(&self, mode: FileSystemMode) -> &str {
        match (mode, &self.remote_dir) {
            (FileSystemMode::Remote, Some(remote)) => remote,
            _ => &self.local_dir,
        }
    }

    fn templates(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.local_dir)
            .chain(self.remote_dir.iter())
            .chain(self.name.iter())
    }
}

/// Tag to descriptor map for one schema version.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: BTreeMap<String, TemplateDescriptor>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file type. Rejects duplicate tags and templates that reference
    /// anything outside the known variable set.
    pub fn register(
        &mut self,
        tag: &str,
        descriptor: TemplateDescriptor,
    ) -> std::result::Result<(), RegistryError> {
        if self.entries.contains_key(tag) {
            return Err(RegistryError::DuplicateTag {
                tag: tag.to_string(),
            });
        }

        for template in descriptor.templates() {
            if let Some(token) = unknown_token(template) {
                return Err(RegistryError::UnknownToken {
                    tag: tag.to_string(),
                    token,
                    template: template.clone(),
                });
            }
        }

        if let Some(name) = &descriptor.name {
            if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
                return Err(RegistryError::SeparatorInName {
                    tag: tag.to_string(),
                    template: name.clone(),
                });
            }
        }

        self.entries.insert(tag.to_string(), descriptor);
        Ok(())
    }

    /// Register `tag` as `parent`'s directory extended by `suffix`, with an
    /// optional file name. The parent's strings are copied now.
    pub fn register_derived(
        &mut self,
        tag: &str,
        parent: &str,
        suffix: &str,
        name: Option<&str>,
    ) -> std::result::Result<(), RegistryError> {
        let parent_descriptor =
            self.entries
                .get(parent)
                .ok_or_else(|| RegistryError::UnknownParent {
                    tag: tag.to_string(),
                    parent: parent.to_string(),
                })?;

        let mut child = parent_descriptor.subdir(suffix);
        if let Some(name) = name {
            child = child.with_name(name);
        }
        self.register(tag, child)
    }

    pub fn lookup(&self, tag: &str) -> Result<&TemplateDescriptor> {
        self.entries
            .get(tag)
            .ok_or_else(|| DesError::UnknownFileType {
                tag: tag.to_string(),
            })
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TemplateDescriptor)> {
        self.entries.iter().map(|(tag, d)| (tag.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn red_registry() -> TemplateRegistry {
        let mut reg = TemplateRegistry::new();
        reg.register(
            "red_run",
            TemplateDescriptor::new("$DESDATA/red/$RUN/red")
                .with_remote("$DESREMOTE/red/$RUN/red"),
        )
        .unwrap();
        reg.register_derived("red_exp", "red_run", "/$EXPNAME", None)
            .unwrap();
        reg.register_derived("red_image", "red_exp", "", Some("$EXPNAME_$CCD.fits.fz"))
            .unwrap();
        reg
    }

    #[rstest]
    fn test_lookup_known(red_registry: TemplateRegistry) {
        let d = red_registry.lookup("red_image").unwrap();
        assert_eq!(d.local_dir, "$DESDATA/red/$RUN/red/$EXPNAME");
        assert_eq!(
            d.remote_dir.as_deref(),
            Some("$DESREMOTE/red/$RUN/red/$EXPNAME")
        );
        assert_eq!(d.name.as_deref(), Some("$EXPNAME_$CCD.fits.fz"));
    }

    #[rstest]
    fn test_lookup_unknown(red_registry: TemplateRegistry) {
        let err = red_registry.lookup("not_a_real_type").unwrap_err();
        assert_eq!(
            err,
            DesError::UnknownFileType {
                tag: "not_a_real_type".to_string()
            }
        );
    }

    #[rstest]
    fn test_duplicate_tag_rejected(mut red_registry: TemplateRegistry) {
        let err = red_registry
            .register("red_run", TemplateDescriptor::new("$DESDATA/other"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag { .. }));
        assert_eq!(
            red_registry.lookup("red_run").unwrap().local_dir,
            "$DESDATA/red/$RUN/red"
        );
    }

    #[rstest]
    fn test_unknown_token_rejected() {
        let mut reg = TemplateRegistry::new();
        let err = reg
            .register("bad", TemplateDescriptor::new("$DESDATA/$NIGHT"))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownToken {
                tag: "bad".to_string(),
                token: "$NIGHT".to_string(),
                template: "$DESDATA/$NIGHT".to_string(),
            }
        );
        assert!(reg.is_empty());
    }

    #[rstest]
    fn test_unknown_token_in_name_rejected() {
        let mut reg = TemplateRegistry::new();
        let err = reg
            .register(
                "bad",
                TemplateDescriptor::new("$DESDATA").with_name("$EXPNAME_$chip.fits"),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownToken { token, .. } if token == "$chip"));
    }

    #[rstest]
    fn test_separator_in_name_rejected() {
        let mut reg = TemplateRegistry::new();
        let err = reg
            .register(
                "bad",
                TemplateDescriptor::new("$DESDATA").with_name("sub/$RUN.fits"),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::SeparatorInName { .. }));
    }

    #[rstest]
    fn test_derived_needs_registered_parent() {
        let mut reg = TemplateRegistry::new();
        let err = reg
            .register_derived("red_exp", "red_run", "/$EXPNAME", None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownParent { parent, .. } if parent == "red_run"));
    }

    #[rstest]
    fn test_child_is_fixed_at_registration() {
        let mut parent = TemplateDescriptor::new("$DESDATA/red/$RUN/red");
        let child = parent.subdir("/$EXPNAME");
        parent.local_dir = "$DESDATA/changed".to_string();
        assert_eq!(child.local_dir, "$DESDATA/red/$RUN/red/$EXPNAME");
    }

    #[rstest]
    fn test_dir_template_falls_back_to_local() {
        let d = TemplateDescriptor::new("$DESDATA/wlpipe");
        assert_eq!(d.dir_template(FileSystemMode::Remote), "$DESDATA/wlpipe");
        let d = d.with_remote("$DESREMOTE/wlpipe");
        assert_eq!(d.dir_template(FileSystemMode::Remote), "$DESREMOTE/wlpipe");
        assert_eq!(
            d.dir_template(FileSystemMode::AlternateStorage),
            "$DESDATA/wlpipe"
        );
    }

    #[rstest]
    fn test_tags_sorted(red_registry: TemplateRegistry) {
        let tags: Vec<&str> = red_registry.tags().collect();
        assert_eq!(tags, vec!["red_exp", "red_image", "red_run"]);
        assert_eq!(red_registry.len(), 3);
    }
}
