use std::collections::BTreeMap;

// Token names recognized by the built-in templates
pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const DATE: &str = "DATE";
pub const AUTHOR: &str = "AUTHOR";

/// Token -> value bindings for one scaffolding invocation.
///
/// Built once from CLI flags, config and environment, read-only while a
/// render runs, discarded after.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: BTreeMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard binding set every scaffold gets
    pub fn standard(project_name: &str, date: &str, author: &str) -> Self {
        let mut subs = Self::new();
        subs.set(PROJECT_NAME, project_name);
        subs.set(DATE, date);
        subs.set(AUTHOR, author);
        subs
    }

    pub fn set(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.values.insert(token.into(), value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.values.contains_key(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
