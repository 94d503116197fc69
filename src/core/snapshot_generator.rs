use crate::core::template;
use crate::domain::models::{CollectedFile, SnapshotOutput};
use log::debug;

const RULE: &str = "---";

fn file_body(file: &CollectedFile) -> String {
    match &file.content {
        Ok(content) => content.clone(),
        Err(e) => format!("# Read error: {}", e),
    }
}

fn extend(lines: &mut Vec<String>, block: &[&str]) {
    lines.extend(block.iter().map(|line| line.to_string()));
}

// Blank line, horizontal rule, blank line.
fn section_break(lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push(String::new());
}

/// Renders the whole snapshot document.
///
/// `generated_at` is inserted as-is so that identical inputs always produce
/// identical output.
pub fn build_snapshot(
    root_label: &str,
    generated_at: &str,
    structure: &[String],
    files: &[CollectedFile],
) -> SnapshotOutput {
    debug!("Building snapshot from {} files", files.len());
    let mut lines: Vec<String> = Vec::new();

    lines.push(template::TITLE.to_string());
    lines.push(String::new());
    lines.push(format!("> **Generated on**: {}", generated_at));
    lines.push(template::USAGE_NOTE.to_string());
    section_break(&mut lines);

    extend(&mut lines, template::PROJECT_CONTEXT);
    section_break(&mut lines);

    lines.push(template::STRUCTURE_HEADING.to_string());
    lines.push(String::new());
    lines.push("```".to_string());
    lines.push(format!("{}/", root_label));
    lines.extend(structure.iter().cloned());
    lines.push("```".to_string());
    section_break(&mut lines);

    extend(&mut lines, template::ENV_TEMPLATE);
    section_break(&mut lines);

    lines.push(template::FILES_HEADING.to_string());
    lines.push(String::new());

    let mut unreadable_count = 0;
    for file in files {
        if file.content.is_err() {
            unreadable_count += 1;
        }

        debug!("Adding file {}", file.path.display());
        lines.push(format!("### {}", file.relative_path.display()));
        lines.push(String::new());
        lines.push(format!("```{}", file.label));
        lines.push(file_body(file));
        lines.push("```".to_string());
        lines.push(String::new());
    }

    lines.push(RULE.to_string());
    lines.push(String::new());
    extend(&mut lines, template::FOOTER);
    lines.push(String::new());

    let document = lines.join("\n");
    let char_count = document.chars().count();

    SnapshotOutput {
        document,
        file_count: files.len(),
        unreadable_count,
        char_count,
    }
}
