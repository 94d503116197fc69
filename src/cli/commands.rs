use crate::core::policy::InclusionPolicy;
use crate::core::snapshot_generator::build_snapshot;
use crate::core::template::{ROOT_LABEL, TIMESTAMP_FORMAT};
use crate::domain::models::{DEFAULT_OUTPUT_NAME, SnapshotConfig, SnapshotOutput};
use crate::infra::file_system::{collect_files, load_files, project_structure};
use crate::infra::logger::{print_banner, setup_logger};
use crate::infra::output::{copy_to_clipboard, create_writer, print_summary};
use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "clauseguard-snapshot")]
#[command(about = "Flatten the project into a single Markdown snapshot", long_about = None)]
pub struct Cli {
    /// Project root to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Snapshot file name, written at the project root
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME, value_parser = parse_output_name)]
    pub output: String,

    /// Print the snapshot to stdout instead of writing the file
    #[arg(long)]
    pub stdout: bool,

    /// Also copy the snapshot to the clipboard
    #[arg(long)]
    pub clipboard: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl From<Cli> for SnapshotConfig {
    fn from(cli: Cli) -> Self {
        SnapshotConfig {
            root_path: cli.root,
            output_name: cli.output,
            to_stdout: cli.stdout,
            clipboard: cli.clipboard,
        }
    }
}

// The name is also what keeps an earlier snapshot out of the scan, so it must
// be a bare file name.
fn parse_output_name(value: &str) -> Result<String, String> {
    let path = Path::new(value);
    match path.file_name() {
        Some(name) if name == path.as_os_str() => Ok(value.to_string()),
        _ => Err(format!(
            "`{}` must be a plain file name; the snapshot is always written at the project root",
            value
        )),
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;
    info!("Starting snapshot generation");

    generate_snapshot(&SnapshotConfig::from(cli))
}

fn resolve_root(path: &Path) -> anyhow::Result<PathBuf> {
    let root = fs::canonicalize(path)
        .with_context(|| format!("Project root {} does not exist", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Project root {} is not a directory", root.display());
    }
    Ok(root)
}

/// Scans `root` and renders the snapshot without writing anything.
pub fn render_snapshot(
    root: &Path,
    output_name: &str,
    generated_at: &str,
) -> anyhow::Result<SnapshotOutput> {
    let policy = InclusionPolicy::default().with_ignored_file(output_name);

    let structure = project_structure(root, &policy)?;
    let paths = collect_files(root, &policy);
    let files = load_files(root, paths, &policy);

    info!("Building snapshot document");
    Ok(build_snapshot(ROOT_LABEL, generated_at, &structure, &files))
}

fn generate_snapshot(config: &SnapshotConfig) -> anyhow::Result<()> {
    debug!("Snapshot config: {:?}", config);

    let root = resolve_root(&config.root_path)?;
    let output_path = root.join(&config.output_name);

    if !config.to_stdout {
        print_banner(&root.display().to_string())?;
    }

    let generated_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let output = render_snapshot(&root, &config.output_name, &generated_at)?;

    info!("Writing output");
    create_writer(&output_path, config.to_stdout).write(&output.document)?;

    if config.clipboard {
        copy_to_clipboard(&output.document)?;
    }

    if config.to_stdout {
        info!(
            "{} files included, {} characters",
            output.file_count, output.char_count
        );
    } else {
        print_summary(&output, Some(&output_path))?;
    }
    Ok(())
}
