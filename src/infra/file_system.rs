use crate::core::policy::InclusionPolicy;
use crate::domain::error::ReadError;
use crate::domain::models::CollectedFile;
use anyhow::Context;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::DirEntry;

// Scan counters for the recursive collection pass
struct ScanProgress {
    start_time: Instant,
    scanned_count: usize,
    matched_count: usize,
}

impl ScanProgress {
    fn new() -> Self {
        Self {
            start_time: Instant::now(),
            scanned_count: 0,
            matched_count: 0,
        }
    }

    fn update(&mut self, matched: bool) {
        self.scanned_count += 1;
        if matched {
            self.matched_count += 1;
        }
    }

    fn finish(&self) {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let files_per_sec = if elapsed > 0.0 {
            self.scanned_count as f32 / elapsed
        } else {
            0.0
        };

        info!(
            "Scan complete: {} files scanned, {} files matched in {:.1}s ({:.1} files/sec)",
            self.scanned_count, self.matched_count, elapsed, files_per_sec
        );
    }
}

/// Sorted entries of a single directory.
fn sorted_children(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(children)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Two-level listing of the root for the structure block.
///
/// Only the root's children and the direct children of included directories
/// are shown; deeper levels are never listed. A directory that cannot be read
/// simply contributes no lines.
pub fn project_structure(root: &Path, policy: &InclusionPolicy) -> anyhow::Result<Vec<String>> {
    info!("Generating project structure for: {}", root.display());
    let mut structure = Vec::new();

    let children = sorted_children(root)
        .with_context(|| format!("Failed to list directory {}", root.display()))?;

    for item in children {
        if item.is_dir() {
            if !policy.should_include_dir(&item) {
                continue;
            }
            structure.push(format!("├── {}/", entry_name(&item)));

            let subitems = match sorted_children(&item) {
                Ok(subitems) => subitems,
                Err(e) => {
                    debug!("Skipping listing of {}: {}", item.display(), e);
                    continue;
                }
            };

            for subitem in subitems {
                if subitem.is_dir() && policy.should_include_dir(&subitem) {
                    structure.push(format!("│   ├── {}/", entry_name(&subitem)));
                } else if subitem.is_file() && policy.should_include_file(&subitem) {
                    structure.push(format!("│   ├── {}", entry_name(&subitem)));
                }
            }
        } else if item.is_file() && policy.should_include_file(&item) {
            structure.push(format!("├── {}", entry_name(&item)));
        }
    }

    debug!("Generated structure with {} lines", structure.len());
    Ok(structure)
}

// Files before subdirectories, each group by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Recursively collects every file to embed, in a stable order.
///
/// Ignored directories are pruned at any depth. Within a directory, its files
/// come first, then each subdirectory in name order, fully traversed.
pub fn collect_files(root: &Path, policy: &InclusionPolicy) -> Vec<PathBuf> {
    info!("Collecting files in: {}", root.display());
    let mut result = Vec::new();
    let mut progress = ScanProgress::new();

    let walker = walkdir::WalkDir::new(root)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_type().is_dir() || policy.should_include_dir(e.path())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !is_file_like(&entry) {
            continue;
        }

        let matched = policy.should_include_file(entry.path());
        progress.update(matched);

        if matched {
            debug!("Found matching file: {}", entry.path().display());
            result.push(entry.into_path());
        }
    }

    progress.finish();
    info!("Found {} matching files", result.len());
    result
}

/// Reads a file as UTF-8 text with line endings normalized to `\n`.
pub fn read_file_contents(path: &Path) -> Result<String, ReadError> {
    debug!("Reading file contents: {}", path.display());
    let bytes = fs::read(path)?;
    let contents = String::from_utf8(bytes)?;
    debug!("Read {} bytes from file", contents.len());

    if contents.contains('\r') {
        return Ok(contents.replace("\r\n", "\n").replace('\r', "\n"));
    }
    Ok(contents)
}

pub fn load_files(root: &Path, paths: Vec<PathBuf>, policy: &InclusionPolicy) -> Vec<CollectedFile> {
    paths
        .into_iter()
        .map(|path| {
            let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            let label = policy.language_label(&entry_name(&path));
            let content = read_file_contents(&path);
            if let Err(e) = &content {
                warn!("Could not read {}: {}", path.display(), e);
            }

            CollectedFile {
                path,
                relative_path,
                label,
                content,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(path).unwrap();
        file.write_all(contents).unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn sample_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "package.json", b"{}");
        touch(root, "package-lock.json", b"{}");
        touch(root, "README.md", b"# readme");
        touch(root, "notes.txt", b"skip");
        touch(root, ".env", b"SECRET=1");
        touch(root, ".env.example", b"SECRET=");
        touch(root, "src/app/page.tsx", b"export default 1;");
        touch(root, "src/app/api/route.ts", b"export {};");
        touch(root, "src/index.ts", b"export {};");
        touch(root, "src/lib/claude.ts", b"export {};");
        touch(root, "node_modules/react/index.js", b"module.exports = {};");
        touch(root, "src/vendor/node_modules/x/deep.ts", b"x");
        touch(root, "supabase/schema.sql", b"create table t();");
        touch(root, ".next/cache/build.json", b"{}");
        temp_dir
    }

    #[test]
    fn test_collect_files_order_and_pruning() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();
        let files = collect_files(root, &InclusionPolicy::default());

        assert_eq!(
            relative(root, &files),
            vec![
                ".env.example",
                "README.md",
                "package.json",
                "src/index.ts",
                "src/app/page.tsx",
                "src/app/api/route.ts",
                "src/lib/claude.ts",
                "supabase/schema.sql",
            ]
        );
    }

    #[test]
    fn test_collect_files_never_enters_ignored_dirs() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();
        let files = collect_files(root, &InclusionPolicy::default());

        for file in relative(root, &files) {
            assert!(!file.contains("node_modules"), "{} was collected", file);
            assert!(!file.contains(".next"), "{} was collected", file);
        }
    }

    #[test]
    fn test_collect_files_is_stable() {
        let temp_dir = sample_tree();
        let policy = InclusionPolicy::default();
        let first = collect_files(temp_dir.path(), &policy);
        let second = collect_files(temp_dir.path(), &policy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_project_structure_two_levels() {
        let temp_dir = sample_tree();
        let structure = project_structure(temp_dir.path(), &InclusionPolicy::default()).unwrap();

        assert_eq!(
            structure,
            vec![
                "├── .env.example",
                "├── README.md",
                "├── package.json",
                "├── src/",
                "│   ├── app/",
                "│   ├── index.ts",
                "│   ├── lib/",
                "│   ├── vendor/",
                "├── supabase/",
                "│   ├── schema.sql",
            ]
        );
    }

    #[test]
    fn test_project_structure_empty_root() {
        let temp_dir = TempDir::new().unwrap();
        let structure = project_structure(temp_dir.path(), &InclusionPolicy::default()).unwrap();
        assert!(structure.is_empty());
    }

    #[test]
    fn test_read_file_contents() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "test.ts", b"const a = 1;\r\nconst b = 2;\n");

        let contents = read_file_contents(&temp_dir.path().join("test.ts")).unwrap();
        assert_eq!(contents, "const a = 1;\nconst b = 2;\n");
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "bad.ts", &[0x66, 0x6f, 0xff, 0xfe, 0x6f]);

        let err = read_file_contents(&temp_dir.path().join("bad.ts")).unwrap_err();
        assert!(matches!(err, ReadError::Decode { .. }));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_file_contents(&temp_dir.path().join("nonexistent.ts")).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let odd_name = root.join(OsStr::from_bytes(b"caf\xe9.ts"));
        if fs::write(&odd_name, b"export {};").is_err() {
            // Some filesystems reject names that are not valid UTF-8.
            return;
        }
        touch(root, "ok.ts", b"export {};");

        let files = collect_files(root, &InclusionPolicy::default());

        assert_eq!(files.len(), 2);
        assert!(files.contains(&odd_name));
        assert!(files.contains(&root.join("ok.ts")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "locked/inner.ts", b"export {};");
        touch(root, "page.tsx", b"<div />");
        touch(root, "src/ok.ts", b"export {};");

        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let restore = || fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Running as root ignores directory permissions.
        if fs::read_dir(&locked).is_ok() {
            restore();
            return;
        }

        let policy = InclusionPolicy::default();
        let structure = project_structure(root, &policy).unwrap();
        let files = collect_files(root, &policy);
        restore();

        assert_eq!(
            structure,
            vec!["├── locked/", "├── page.tsx", "├── src/", "│   ├── ok.ts"]
        );
        assert_eq!(relative(root, &files), vec!["page.tsx", "src/ok.ts"]);
    }

    #[test]
    fn test_load_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "src/page.tsx", b"<div />");
        touch(root, "src/broken.ts", &[0xc3, 0x28]);

        let policy = InclusionPolicy::default();
        let files = load_files(root, collect_files(root, &policy), &policy);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative_path, Path::new("src").join("broken.ts"));
        assert_eq!(files[0].label, "typescript");
        assert!(files[0].content.is_err());
        assert_eq!(files[1].label, "tsx");
        assert_eq!(files[1].content.as_deref().unwrap(), "<div />");
    }
}
