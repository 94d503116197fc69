use crate::domain::models::SnapshotOutput;
use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub trait OutputWriter {
    fn write(&self, content: &str) -> anyhow::Result<()>;
}

/// Replaces the target file in one step: the document is written to a temp
/// file next to it, then renamed over it. A failed run leaves the previous
/// file untouched.
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing output to file: {}", self.path.display());
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!("Output written to file: {}", self.path.display());
        Ok(())
    }
}

pub struct ConsoleWriter;

impl OutputWriter for ConsoleWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing output to console");
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(feature = "clipboard-support")]
pub struct ClipboardWriter;

#[cfg(feature = "clipboard-support")]
impl OutputWriter for ClipboardWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        use clipboard::{ClipboardContext, ClipboardProvider};
        use log::warn;

        debug!("Writing output to clipboard");

        let mut ctx: ClipboardContext = ClipboardProvider::new().map_err(|e| {
            warn!("Failed to access clipboard: {}", e);
            anyhow::anyhow!("Failed to access clipboard: {}", e)
        })?;

        ctx.set_contents(content.to_owned()).map_err(|e| {
            warn!("Failed to copy to clipboard: {}", e);
            anyhow::anyhow!("Failed to copy to clipboard: {}", e)
        })?;

        info!("Output copied to clipboard (size: {} bytes)", content.len());
        Ok(())
    }
}

pub fn create_writer(output_path: &Path, to_stdout: bool) -> Box<dyn OutputWriter> {
    if to_stdout {
        return Box::new(ConsoleWriter);
    }
    Box::new(FileWriter::new(output_path.to_path_buf()))
}

#[cfg(feature = "clipboard-support")]
pub fn copy_to_clipboard(content: &str) -> anyhow::Result<()> {
    ClipboardWriter.write(content)
}

#[cfg(not(feature = "clipboard-support"))]
pub fn copy_to_clipboard(_content: &str) -> anyhow::Result<()> {
    anyhow::bail!("clipboard support is not enabled in this build (feature `clipboard-support`)")
}

pub fn print_summary(output: &SnapshotOutput, output_path: Option<&Path>) -> io::Result<()> {
    let mut stdout = io::stdout();

    stdout.execute(SetForegroundColor(Color::Green))?;
    match output_path {
        Some(path) => writeln!(stdout, "✅ Snapshot generated: {}", path.display())?,
        None => writeln!(stdout, "✅ Snapshot generated")?,
    }
    stdout.execute(ResetColor)?;

    writeln!(stdout, "   - {} files included", output.file_count)?;
    if output.unreadable_count > 0 {
        stdout.execute(SetForegroundColor(Color::Yellow))?;
        writeln!(stdout, "   - {} files could not be read", output.unreadable_count)?;
        stdout.execute(ResetColor)?;
    }
    writeln!(stdout, "   - {} characters", output.char_count)?;
    writeln!(stdout)?;
    writeln!(stdout, "💡 Paste this file into the Claude project memory!")?;
    Ok(())
}
