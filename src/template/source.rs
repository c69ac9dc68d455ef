use crate::error::{InitAgentError, Result};
use crate::template::builtin::BuiltinTemplate;
use crate::template::scanner;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional manifest at a user template's root. Describes the template
/// and is never rendered into the output.
pub const MANIFEST_FILE: &str = "template.toml";

/// Extensions always copied byte-for-byte, never scanned for tokens
const STATIC_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "icns", "pdf", "woff", "woff2", "ttf", "otf", "eot",
    "zip", "gz", "tar", "jar", "wasm",
];

#[derive(Debug, Clone)]
pub enum FileContents {
    /// UTF-8 text, scanned for tokens at render time
    Text(String),
    /// Opaque bytes, copied verbatim
    Static(Vec<u8>),
}

/// One file in a template tree, addressed by its path relative to the
/// template root.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub rel_path: PathBuf,
    pub contents: FileContents,
}

impl TemplateFile {
    pub fn is_static(&self) -> bool {
        matches!(self.contents, FileContents::Static(_))
    }

    pub fn size(&self) -> u64 {
        match &self.contents {
            FileContents::Text(text) => text.len() as u64,
            FileContents::Static(bytes) => bytes.len() as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TemplateManifest {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub next_steps: Vec<String>,
}

/// A template tree loaded into memory: the embedded catalog or a user
/// directory, normalized to the same shape.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub next_steps: Vec<String>,
    files: Vec<TemplateFile>,
}

impl Template {
    pub fn from_builtin(def: &BuiltinTemplate) -> Self {
        let files = def
            .files
            .iter()
            .map(|f| TemplateFile {
                rel_path: PathBuf::from(f.path),
                contents: FileContents::Text(f.contents.to_string()),
            })
            .collect();

        Self {
            name: def.name.to_string(),
            description: def.description.to_string(),
            next_steps: def.next_steps.iter().map(|s| s.to_string()).collect(),
            files,
        }
    }

    /// Load a template from a directory tree on disk.
    pub fn from_dir(name: &str, root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(InitAgentError::TemplateUnreadable {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "not a directory",
                ),
            });
        }

        let manifest = read_manifest(root)?;

        let mut paths = Vec::new();
        collect_files(root, root, &mut paths)?;
        // Deterministic file order regardless of directory iteration order
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let rel_path = path
                .strip_prefix(root)
                .map_err(|_| InitAgentError::TemplateUnreadable {
                    path: path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "file outside template root",
                    ),
                })?
                .to_path_buf();

            if rel_path == Path::new(MANIFEST_FILE) {
                continue;
            }

            let bytes = fs::read(&path).map_err(|e| InitAgentError::TemplateUnreadable {
                path: path.clone(),
                source: e,
            })?;

            let contents = if is_static_path(&rel_path) {
                FileContents::Static(bytes)
            } else {
                match String::from_utf8(bytes) {
                    Ok(text) => FileContents::Text(text),
                    Err(e) => FileContents::Static(e.into_bytes()),
                }
            };

            files.push(TemplateFile { rel_path, contents });
        }

        Ok(Self {
            name: name.to_string(),
            description: manifest.description,
            next_steps: manifest.next_steps,
            files,
        })
    }

    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Every token the template requires, mapped to the first file it
    /// appears in (file contents or path segments).
    pub fn required_tokens(&self) -> BTreeMap<String, PathBuf> {
        let mut tokens = BTreeMap::new();

        for file in &self.files {
            let path_str = file.rel_path.to_string_lossy();
            for span in scanner::scan(&path_str) {
                tokens
                    .entry(span.name)
                    .or_insert_with(|| file.rel_path.clone());
            }

            if let FileContents::Text(text) = &file.contents {
                for span in scanner::scan(text) {
                    tokens
                        .entry(span.name)
                        .or_insert_with(|| file.rel_path.clone());
                }
            }
        }

        tokens
    }

    #[cfg(test)]
    pub(crate) fn from_files(name: &str, files: Vec<TemplateFile>) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            next_steps: Vec::new(),
            files,
        }
    }
}

fn is_static_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            STATIC_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn read_manifest(root: &Path) -> Result<TemplateManifest> {
    let path = root.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(TemplateManifest::default());
    }

    let contents = fs::read_to_string(&path).map_err(|e| InitAgentError::TemplateUnreadable {
        path: path.clone(),
        source: e,
    })?;
    let manifest = toml::from_str(&contents)?;
    Ok(manifest)
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| InitAgentError::TemplateUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| InitAgentError::TemplateUnreadable {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let meta = entry
            .metadata()
            .map_err(|e| InitAgentError::TemplateUnreadable {
                path: path.clone(),
                source: e,
            })?;

        if meta.is_dir() {
            collect_files(root, &path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }

    Ok(())
}
