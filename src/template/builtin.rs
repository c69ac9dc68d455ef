//! Templates baked into the binary at compile time via include_str!.
//!
//! The release artifact installs a single executable, so the stock
//! templates have to travel inside it. Sources live under `templates/`
//! at the repository root.

/// One file of an embedded template. Paths may carry tokens in their
/// segments (the python template nests its package under
/// `src/{{PROJECT_NAME}}/`).
pub struct BuiltinFile {
    pub path: &'static str,
    pub contents: &'static str,
}

pub struct BuiltinTemplate {
    pub name: &'static str,
    pub description: &'static str,
    /// Shown after a successful scaffold; token-expanded like file contents
    pub next_steps: &'static [&'static str],
    pub files: &'static [BuiltinFile],
}

pub const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: "web-app",
        description: "Vite + React + TypeScript web app",
        next_steps: &["cd {{PROJECT_NAME}}", "npm install", "npm run dev"],
        files: &[
            BuiltinFile {
                path: ".gitignore",
                contents: include_str!("../../templates/web-app/.gitignore"),
            },
            BuiltinFile {
                path: "AGENTS.md",
                contents: include_str!("../../templates/web-app/AGENTS.md"),
            },
            BuiltinFile {
                path: "README.md",
                contents: include_str!("../../templates/web-app/README.md"),
            },
            BuiltinFile {
                path: "index.html",
                contents: include_str!("../../templates/web-app/index.html"),
            },
            BuiltinFile {
                path: "package.json",
                contents: include_str!("../../templates/web-app/package.json"),
            },
            BuiltinFile {
                path: "src/App.tsx",
                contents: include_str!("../../templates/web-app/src/App.tsx"),
            },
            BuiltinFile {
                path: "src/main.tsx",
                contents: include_str!("../../templates/web-app/src/main.tsx"),
            },
            BuiltinFile {
                path: "tsconfig.json",
                contents: include_str!("../../templates/web-app/tsconfig.json"),
            },
            BuiltinFile {
                path: "vite.config.ts",
                contents: include_str!("../../templates/web-app/vite.config.ts"),
            },
        ],
    },
    BuiltinTemplate {
        name: "python",
        description: "Python package with a src/ layout",
        next_steps: &[
            "cd {{PROJECT_NAME}}",
            "python -m venv .venv && source .venv/bin/activate",
            "pip install -e \".[dev]\"",
            "python -m {{PROJECT_NAME}}.main",
        ],
        files: &[
            BuiltinFile {
                path: ".gitignore",
                contents: include_str!("../../templates/python/.gitignore"),
            },
            BuiltinFile {
                path: "AGENTS.md",
                contents: include_str!("../../templates/python/AGENTS.md"),
            },
            BuiltinFile {
                path: "README.md",
                contents: include_str!("../../templates/python/README.md"),
            },
            BuiltinFile {
                path: "pyproject.toml",
                contents: include_str!("../../templates/python/pyproject.toml"),
            },
            BuiltinFile {
                path: "src/{{PROJECT_NAME}}/__init__.py",
                contents: include_str!("../../templates/python/src/{{PROJECT_NAME}}/__init__.py"),
            },
            BuiltinFile {
                path: "src/{{PROJECT_NAME}}/main.py",
                contents: include_str!("../../templates/python/src/{{PROJECT_NAME}}/main.py"),
            },
            BuiltinFile {
                path: "tests/test_main.py",
                contents: include_str!("../../templates/python/tests/test_main.py"),
            },
        ],
    },
];

/// Look up an embedded template by name
pub fn find(name: &str) -> Option<&'static BuiltinTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}
