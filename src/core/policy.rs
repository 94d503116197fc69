use log::debug;
use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::path::Path;

const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    ".git",
    ".vercel",
    "dist",
    "build",
    ".turbo",
    "__pycache__",
    ".cache",
    "coverage",
];

// Secrets and lockfiles never make it into a snapshot.
const IGNORED_FILES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".env.local",
    ".env",
    ".gitignore",
];

const INCLUDED_EXTENSIONS: &[&str] = &[
    ".ts",
    ".tsx",
    ".js",
    ".jsx",
    ".json",
    ".css",
    ".md",
    ".sql",
    ".env.example",
];

const ALWAYS_INCLUDE: &[&str] = &[
    "middleware.ts",
    "next.config.ts",
    "next.config.js",
    "tailwind.config.js",
    "tailwind.config.ts",
    "postcss.config.js",
    "postcss.config.mjs",
    "tsconfig.json",
    "package.json",
    ".env.example",
];

const LANGUAGE_LABELS: &[(&str, &str)] = &[
    (".ts", "typescript"),
    (".tsx", "tsx"),
    (".js", "javascript"),
    (".jsx", "jsx"),
    (".json", "json"),
    (".css", "css"),
    (".md", "markdown"),
    (".sql", "sql"),
    (".env", "env"),
    (".env.example", "env"),
];

/// Decides which directories are walked, which files are embedded and how
/// their fenced blocks are tagged.
///
/// Ignored file names are checked before the always-include list, so a name
/// present in both is never captured.
#[derive(Debug, Clone)]
pub struct InclusionPolicy {
    ignored_dirs: HashSet<OsString>,
    ignored_files: HashSet<OsString>,
    included_extensions: HashSet<String>,
    always_include: HashSet<OsString>,
    labels: HashMap<String, String>,
}

// Names stay OS strings so files whose names are not valid UTF-8 still match.
fn to_set(items: &[&str]) -> HashSet<OsString> {
    items.iter().map(|s| OsString::from(*s)).collect()
}

fn file_name(path: &Path) -> Option<&OsStr> {
    path.file_name()
}

/// Lowercased last dot-suffix, dot included. Dotfiles like `.env` have none.
fn suffix(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self::new(
            IGNORED_DIRS,
            IGNORED_FILES,
            INCLUDED_EXTENSIONS,
            ALWAYS_INCLUDE,
            LANGUAGE_LABELS,
        )
    }
}

impl InclusionPolicy {
    pub fn new(
        ignored_dirs: &[&str],
        ignored_files: &[&str],
        included_extensions: &[&str],
        always_include: &[&str],
        labels: &[(&str, &str)],
    ) -> Self {
        Self {
            ignored_dirs: to_set(ignored_dirs),
            ignored_files: to_set(ignored_files),
            included_extensions: included_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            always_include: to_set(always_include),
            labels: labels
                .iter()
                .map(|(ext, label)| (ext.to_lowercase(), label.to_string()))
                .collect(),
        }
    }

    pub fn with_ignored_file(mut self, name: &str) -> Self {
        debug!("Ignoring file name: {}", name);
        self.ignored_files.insert(OsString::from(name));
        self
    }

    pub fn should_include_dir(&self, path: &Path) -> bool {
        match file_name(path) {
            Some(name) => !self.ignored_dirs.contains(name),
            None => true,
        }
    }

    pub fn should_include_file(&self, path: &Path) -> bool {
        let Some(name) = file_name(path) else {
            return false;
        };

        if self.ignored_files.contains(name) {
            return false;
        }

        if self.always_include.contains(name) {
            return true;
        }

        suffix(path)
            .map(|ext| self.included_extensions.contains(&ext))
            .unwrap_or(false)
    }

    /// Fence tag for a file name, or an empty string when the suffix is unknown.
    pub fn language_label(&self, filename: &str) -> String {
        let path = Path::new(filename);

        if let Some(label) = suffix(path).and_then(|ext| self.labels.get(&ext)) {
            return label.clone();
        }

        // Whole-name fallback for dotfiles such as `.env.example`.
        file_name(path)
            .and_then(|name| self.labels.get(&name.to_string_lossy().to_lowercase()))
            .cloned()
            .unwrap_or_default()
    }
}
