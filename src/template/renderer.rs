//! The template renderer: one template tree plus one substitution map in,
//! one rendered project tree out.
//!
//! Rendering is a single-pass, stateless transform. Token coverage is
//! validated over the whole tree before the first write, so a render
//! either starts with every token resolvable or fails without touching
//! the destination.

use crate::error::{InitAgentError, Result};
use crate::template::scanner;
use crate::template::source::{FileContents, Template};
use crate::template::tokens::Substitutions;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render into an existing non-empty destination, overwriting files
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub rel_path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug)]
pub struct RenderReport {
    pub dest: PathBuf,
    pub files: Vec<RenderedFile>,
}

/// Render `template` under `dest`, replacing tokens in file contents and
/// path segments with the values in `subs`.
///
/// All errors abort the render; if the destination root was created by
/// this call it is removed again, so a failed render never leaves a tree
/// that looks complete.
pub fn render(
    template: &Template,
    subs: &Substitutions,
    dest: &Path,
    options: &RenderOptions,
) -> Result<RenderReport> {
    validate_coverage(template, subs)?;

    let created_root = !dest.exists();
    if !created_root {
        if !dest.is_dir() {
            return Err(InitAgentError::DestinationConflict(dest.to_path_buf()));
        }
        let occupied = fs::read_dir(dest)?.next().is_some();
        if occupied && !options.force {
            return Err(InitAgentError::DestinationConflict(dest.to_path_buf()));
        }
    }
    fs::create_dir_all(dest)?;

    match render_files(template, subs, dest) {
        Ok(files) => Ok(RenderReport {
            dest: dest.to_path_buf(),
            files,
        }),
        Err(e) => {
            if created_root {
                let _ = fs::remove_dir_all(dest);
            }
            Err(e)
        }
    }
}

/// Fail fast if any token in the tree (contents or paths) has no value
pub fn validate_coverage(template: &Template, subs: &Substitutions) -> Result<()> {
    for (token, file) in template.required_tokens() {
        if !subs.contains(&token) {
            return Err(InitAgentError::UnknownToken { token, file });
        }
    }
    Ok(())
}

fn render_files(
    template: &Template,
    subs: &Substitutions,
    dest: &Path,
) -> Result<Vec<RenderedFile>> {
    let mut written: BTreeSet<PathBuf> = BTreeSet::new();
    let mut files = Vec::with_capacity(template.file_count());

    for file in template.files() {
        let rel = expand_rel_path(&file.rel_path, subs)?;

        // Two source paths substituting to the same output path would
        // silently drop a file
        if !written.insert(rel.clone()) {
            return Err(InitAgentError::DestinationConflict(dest.join(&rel)));
        }

        let out_path = dest.join(&rel);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = match &file.contents {
            FileContents::Text(text) => {
                let rendered =
                    scanner::substitute(text, subs).map_err(|token| {
                        InitAgentError::UnknownToken {
                            token,
                            file: file.rel_path.clone(),
                        }
                    })?;
                fs::write(&out_path, &rendered)?;
                rendered.len() as u64
            }
            FileContents::Static(bytes) => {
                fs::write(&out_path, bytes)?;
                bytes.len() as u64
            }
        };

        files.push(RenderedFile {
            rel_path: rel,
            bytes,
        });
    }

    Ok(files)
}

/// Expand tokens in each component of a relative path.
///
/// Substituted values are sanitized so they cannot introduce separators
/// or dot-segments; the literal parts of the path came from walking a
/// real tree and pass through untouched.
pub(crate) fn expand_rel_path(rel: &Path, subs: &Substitutions) -> Result<PathBuf> {
    let mut out = PathBuf::new();

    for component in rel.components() {
        let part = match component {
            Component::Normal(p) => p.to_string_lossy().into_owned(),
            // Template-relative paths have no root, prefix or dot segments
            _ => return Err(InitAgentError::PathEscape(rel.to_path_buf())),
        };

        let expanded = scanner::substitute_with(&part, |name| {
            subs.get(name).map(sanitize_path_component)
        })
        .map_err(|token| InitAgentError::UnknownToken {
            token,
            file: rel.to_path_buf(),
        })?;

        if expanded.is_empty() || expanded == "." || expanded == ".." {
            return Err(InitAgentError::PathEscape(rel.to_path_buf()));
        }

        out.push(expanded);
    }

    if out.as_os_str().is_empty() {
        return Err(InitAgentError::PathEscape(rel.to_path_buf()));
    }

    Ok(out)
}

/// Sanitize a substituted value for use in a path component:
/// - `/` and `\` become `-`
/// - spaces and control characters become `_`
fn sanitize_path_component(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c == '/' || c == '\\' {
                '-'
            } else if c == ' ' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::source::TemplateFile;
    use std::collections::BTreeSet;

    fn subs() -> Substitutions {
        Substitutions::standard("demo", "2026-08-06", "Jane")
    }

    fn text_file(path: &str, contents: &str) -> TemplateFile {
        TemplateFile {
            rel_path: PathBuf::from(path),
            contents: FileContents::Text(contents.to_string()),
        }
    }

    fn static_file(path: &str, bytes: &[u8]) -> TemplateFile {
        TemplateFile {
            rel_path: PathBuf::from(path),
            contents: FileContents::Static(bytes.to_vec()),
        }
    }

    fn rel_paths(report: &RenderReport) -> BTreeSet<PathBuf> {
        report.files.iter().map(|f| f.rel_path.clone()).collect()
    }

    // ========== Path expansion ==========

    #[test]
    fn test_expand_rel_path_plain() {
        let rel = expand_rel_path(Path::new("src/main.py"), &subs()).unwrap();
        assert_eq!(rel, PathBuf::from("src/main.py"));
    }

    #[test]
    fn test_expand_rel_path_token_dir() {
        let rel = expand_rel_path(Path::new("src/{{PROJECT_NAME}}/main.py"), &subs()).unwrap();
        assert_eq!(rel, PathBuf::from("src/demo/main.py"));
    }

    #[test]
    fn test_expand_rel_path_sanitizes_values() {
        let mut subs = Substitutions::new();
        subs.set("PROJECT_NAME", "my app/../../etc");
        let rel = expand_rel_path(Path::new("{{PROJECT_NAME}}.md"), &subs).unwrap();
        // Separators become '-', spaces become '_', so the value cannot
        // navigate anywhere
        assert_eq!(rel, PathBuf::from("my_app-..-..-etc.md"));
    }

    #[test]
    fn test_expand_rel_path_rejects_dotdot_value() {
        let mut subs = Substitutions::new();
        subs.set("PROJECT_NAME", "..");
        let err = expand_rel_path(Path::new("{{PROJECT_NAME}}/file"), &subs).unwrap_err();
        assert!(matches!(err, InitAgentError::PathEscape(_)));
    }

    #[test]
    fn test_expand_rel_path_rejects_empty_component() {
        let mut subs = Substitutions::new();
        subs.set("PROJECT_NAME", "");
        let err = expand_rel_path(Path::new("{{PROJECT_NAME}}/file"), &subs).unwrap_err();
        assert!(matches!(err, InitAgentError::PathEscape(_)));
    }

    #[test]
    fn test_expand_rel_path_unknown_token() {
        let err = expand_rel_path(Path::new("{{NOPE}}/file"), &subs()).unwrap_err();
        match err {
            InitAgentError::UnknownToken { token, .. } => assert_eq!(token, "NOPE"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // ========== Coverage validation ==========

    #[test]
    fn test_validate_coverage_names_token_and_file() {
        let template = Template::from_files(
            "t",
            vec![text_file("a.txt", "ok"), text_file("b.txt", "{{MISSING}}")],
        );
        let err = validate_coverage(&template, &subs()).unwrap_err();
        match err {
            InitAgentError::UnknownToken { token, file } => {
                assert_eq!(token, "MISSING");
                assert_eq!(file, PathBuf::from("b.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // ========== Render ==========

    #[test]
    fn test_render_structure_preserved() {
        let template = Template::from_files(
            "t",
            vec![
                text_file("README.md", "# {{PROJECT_NAME}}"),
                text_file("src/app.ts", "// {{AUTHOR}}"),
                static_file("assets/logo.png", &[1, 2, 3]),
            ],
        );
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");

        let report = render(&template, &subs(), &dest, &RenderOptions::default()).unwrap();

        assert_eq!(report.files.len(), template.file_count());
        let expected: BTreeSet<PathBuf> = ["README.md", "src/app.ts", "assets/logo.png"]
            .iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(rel_paths(&report), expected);
        for path in &expected {
            assert!(dest.join(path).is_file());
        }
    }

    #[test]
    fn test_render_concrete_scenario() {
        let template = Template::from_files(
            "t",
            vec![text_file(
                "index.html",
                "<h1>{{PROJECT_NAME}}</h1>\nAuthor: {{AUTHOR}}",
            )],
        );
        let subs = Substitutions::standard("Demo App", "2026-08-06", "Jane");
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");

        render(&template, &subs, &dest, &RenderOptions::default()).unwrap();

        let out = fs::read_to_string(dest.join("index.html")).unwrap();
        assert!(out.contains("<h1>Demo App</h1>"));
        assert!(out.contains("Author: Jane"));
        assert!(scanner::scan(&out).is_empty());
    }

    #[test]
    fn test_render_static_passthrough() {
        let payload = [0u8, 159, 146, 150, 255];
        let template = Template::from_files("t", vec![static_file("data.bin", &payload)]);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");

        render(&template, &subs(), &dest, &RenderOptions::default()).unwrap();

        assert_eq!(fs::read(dest.join("data.bin")).unwrap(), payload);
    }

    #[test]
    fn test_render_is_idempotent() {
        let template = Template::from_files(
            "t",
            vec![
                text_file("a/b/c.txt", "{{PROJECT_NAME}} {{DATE}} {{AUTHOR}}"),
                static_file("blob", &[9, 8, 7]),
            ],
        );
        let dir = tempfile::tempdir().unwrap();

        let dest1 = dir.path().join("one");
        let dest2 = dir.path().join("two");
        render(&template, &subs(), &dest1, &RenderOptions::default()).unwrap();
        render(&template, &subs(), &dest2, &RenderOptions::default()).unwrap();

        for rel in ["a/b/c.txt", "blob"] {
            assert_eq!(
                fs::read(dest1.join(rel)).unwrap(),
                fs::read(dest2.join(rel)).unwrap()
            );
        }
    }

    #[test]
    fn test_render_unknown_token_touches_nothing() {
        let template = Template::from_files("t", vec![text_file("a.txt", "{{MISSING}}")]);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");

        let err = render(&template, &subs(), &dest, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, InitAgentError::UnknownToken { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_render_destination_conflict() {
        let template = Template::from_files("t", vec![text_file("a.txt", "hello")]);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("existing"), "x").unwrap();

        let err = render(&template, &subs(), &dest, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, InitAgentError::DestinationConflict(_)));
        // The pre-existing content is untouched
        assert!(dest.join("existing").exists());
        assert!(!dest.join("a.txt").exists());
    }

    #[test]
    fn test_render_force_into_existing() {
        let template = Template::from_files("t", vec![text_file("a.txt", "new {{AUTHOR}}")]);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("a.txt"), "old").unwrap();
        fs::write(dest.join("keep.me"), "x").unwrap();

        let options = RenderOptions { force: true };
        render(&template, &subs(), &dest, &options).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "new Jane");
        assert!(dest.join("keep.me").exists());
    }

    #[test]
    fn test_render_empty_existing_dir_is_fine() {
        let template = Template::from_files("t", vec![text_file("a.txt", "hello")]);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        fs::create_dir_all(&dest).unwrap();

        render(&template, &subs(), &dest, &RenderOptions::default()).unwrap();
        assert!(dest.join("a.txt").exists());
    }

    #[test]
    fn test_render_file_destination_is_conflict() {
        let template = Template::from_files("t", vec![text_file("a.txt", "hello")]);
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        fs::write(&dest, "a plain file").unwrap();

        let err = render(&template, &subs(), &dest, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, InitAgentError::DestinationConflict(_)));
    }

    #[test]
    fn test_render_path_collision_detected() {
        // Both names substitute to "demo.md"
        let template = Template::from_files(
            "t",
            vec![
                text_file("{{PROJECT_NAME}}.md", "one"),
                text_file("demo.md", "two"),
            ],
        );
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");

        let err = render(&template, &subs(), &dest, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, InitAgentError::DestinationConflict(_)));
        // Created root is cleaned up on failure
        assert!(!dest.exists());
    }

    #[test]
    fn test_render_token_dir_structure() {
        let template = Template::from_files(
            "t",
            vec![text_file("src/{{PROJECT_NAME}}/main.py", "print('{{PROJECT_NAME}}')")],
        );
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");

        render(&template, &subs(), &dest, &RenderOptions::default()).unwrap();

        let out = fs::read_to_string(dest.join("src/demo/main.py")).unwrap();
        assert_eq!(out, "print('demo')");
    }
}
