use crate::config::Config;
use crate::error::{InitAgentError, Result};
use crate::template::builtin;
use crate::template::source::{Template, TemplateManifest, MANIFEST_FILE};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    User,
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateOrigin::Builtin => write!(f, "builtin"),
            TemplateOrigin::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateSummary {
    pub name: String,
    pub origin: TemplateOrigin,
    pub description: String,
}

/// Name -> template resolution over the embedded catalog and the
/// configured user templates directory. A user template shadows a
/// builtin of the same name.
pub struct Registry {
    user_dir: Option<PathBuf>,
}

impl Registry {
    pub fn new(config: &Config) -> Self {
        Self {
            user_dir: config.templates_dir(),
        }
    }

    pub fn with_user_dir(user_dir: Option<PathBuf>) -> Self {
        Self { user_dir }
    }

    pub fn resolve(&self, name: &str) -> Result<Template> {
        validate_template_name(name)?;

        if let Some(dir) = &self.user_dir {
            let candidate = dir.join(name);
            if candidate.is_dir() {
                return Template::from_dir(name, &candidate);
            }
        }

        if let Some(def) = builtin::find(name) {
            return Ok(Template::from_builtin(def));
        }

        Err(InitAgentError::TemplateNotFound(name.to_string()))
    }

    /// All templates visible to this invocation, user templates first,
    /// shadowed builtins omitted.
    pub fn available(&self) -> Vec<TemplateSummary> {
        let mut summaries = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        if let Some(dir) = &self.user_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                let mut user: Vec<TemplateSummary> = entries
                    .flatten()
                    .filter(|e| e.path().is_dir())
                    .filter_map(|e| {
                        let name = e.file_name().to_str()?.to_string();
                        let description = read_description(&e.path());
                        Some(TemplateSummary {
                            name,
                            origin: TemplateOrigin::User,
                            description,
                        })
                    })
                    .collect();
                user.sort_by(|a, b| a.name.cmp(&b.name));

                for summary in user {
                    seen.insert(summary.name.clone());
                    summaries.push(summary);
                }
            }
        }

        for def in builtin::BUILTIN_TEMPLATES {
            if seen.contains(def.name) {
                continue;
            }
            summaries.push(TemplateSummary {
                name: def.name.to_string(),
                origin: TemplateOrigin::Builtin,
                description: def.description.to_string(),
            });
        }

        summaries
    }
}

/// Template names come from the command line and get joined onto the
/// templates directory; reject anything that could leave it.
fn validate_template_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(InitAgentError::InvalidTemplate(format!(
            "invalid template name '{}'",
            name
        )));
    }
    Ok(())
}

fn read_description(dir: &std::path::Path) -> String {
    let manifest_path = dir.join(MANIFEST_FILE);
    fs::read_to_string(manifest_path)
        .ok()
        .and_then(|contents| toml::from_str::<TemplateManifest>(&contents).ok())
        .map(|m| m.description)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_builtin() {
        let registry = Registry::with_user_dir(None);
        let template = registry.resolve("web-app").unwrap();
        assert_eq!(template.name, "web-app");
        assert!(template.file_count() > 0);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = Registry::with_user_dir(None);
        let err = registry.resolve("no-such-template").unwrap_err();
        assert!(matches!(err, InitAgentError::TemplateNotFound(_)));
    }

    #[test]
    fn test_resolve_rejects_traversal_names() {
        let registry = Registry::with_user_dir(Some(PathBuf::from("/tmp")));
        for bad in ["..", "a/b", "a\\b", "", "."] {
            let err = registry.resolve(bad).unwrap_err();
            assert!(matches!(err, InitAgentError::InvalidTemplate(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_user_template_shadows_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("web-app");
        fs::create_dir_all(&custom).unwrap();
        fs::write(custom.join("README.md"), "custom {{PROJECT_NAME}}\n").unwrap();
        fs::write(
            custom.join(MANIFEST_FILE),
            "description = \"customized web app\"\n",
        )
        .unwrap();

        let registry = Registry::with_user_dir(Some(dir.path().to_path_buf()));
        let template = registry.resolve("web-app").unwrap();
        assert_eq!(template.description, "customized web app");
        assert_eq!(template.file_count(), 1);

        // The listing shows it once, as a user template
        let available = registry.available();
        let web_apps: Vec<_> = available.iter().filter(|s| s.name == "web-app").collect();
        assert_eq!(web_apps.len(), 1);
        assert_eq!(web_apps[0].origin, TemplateOrigin::User);
    }

    #[test]
    fn test_available_without_user_dir_lists_builtins() {
        let registry = Registry::with_user_dir(None);
        let available = registry.available();
        let names: Vec<&str> = available.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"web-app"));
        assert!(names.contains(&"python"));
        assert!(available
            .iter()
            .all(|s| s.origin == TemplateOrigin::Builtin));
    }

    #[test]
    fn test_available_with_missing_user_dir() {
        let registry = Registry::with_user_dir(Some(PathBuf::from("/nonexistent/templates")));
        // Missing user dir is fine, builtins still list
        assert!(!registry.available().is_empty());
    }
}
