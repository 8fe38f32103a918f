//! # PDF Toolchain
//!
//! Turns saved HTML pages into a single document and documents into Markdown.
//!
//! - `convert_html_dir`: renders every `*.html` in a folder with `wkhtmltopdf`
//! - `concatenate_pdfs`: merges every readable `*.pdf` in a folder with `pdfunite`
//! - `convert_and_concatenate`: both of the above, tolerating an empty result
//! - `pdf_to_markdown`: extracts text page by page with `pdf-extract`
//!
//! Rendering and merging shell out, so the binaries must be on `PATH` (or be
//! configured through `PdfTools`).

mod error;
mod markdown;
mod merge;
mod render;

pub use error::PdfError;
pub use markdown::{pages_to_markdown, pdf_to_markdown};
pub use merge::concatenate_pdfs;
pub use render::{PDF_OUTPUT_DIR, convert_html_dir};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// External programs used by the toolchain
#[derive(Debug, Clone)]
pub struct PdfTools {
    /// HTML to PDF renderer
    pub wkhtmltopdf: PathBuf,

    /// PDF merger
    pub pdfunite: PathBuf,

    /// PDF inspector, used to reject unreadable inputs before merging
    pub pdfinfo: PathBuf,
}

impl Default for PdfTools {
    fn default() -> Self {
        Self {
            wkhtmltopdf: PathBuf::from("wkhtmltopdf"),
            pdfunite: PathBuf::from("pdfunite"),
            pdfinfo: PathBuf::from("pdfinfo"),
        }
    }
}

/// Render the HTML pages in `html_dir` and merge the PDFs into `output_pdf`
///
/// Pages that fail to render or merge are logged and left out. When nothing
/// is left to merge a warning is logged and no output is written.
///
/// # Returns
///
/// The number of PDFs merged
#[instrument(skip(tools))]
pub async fn convert_and_concatenate(
    tools: &PdfTools,
    html_dir: &Path,
    output_pdf: &Path,
) -> Result<usize, PdfError> {
    let rendered = convert_html_dir(tools, html_dir).await?;
    if rendered.is_empty() {
        warn!("No PDFs were rendered from {}", html_dir.display());
    }

    match concatenate_pdfs(tools, &html_dir.join(PDF_OUTPUT_DIR), output_pdf).await {
        Err(PdfError::NoInputs(folder)) => {
            warn!("Nothing to merge in {}, {} not written", folder, output_pdf.display());
            Ok(0)
        }
        result => result,
    }
}

/// Files in `dir` with the given extension, sorted by file name
pub fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, PdfError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run an external program, mapping spawn errors and non-zero exits
async fn run_tool<I, S>(program: &Path, args: I) -> Result<(), PdfError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = program.display().to_string();
    debug!("Running {}", tool);

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| PdfError::ToolUnavailable {
            tool: tool.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(PdfError::ToolFailed {
            tool,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Write an executable shell script standing in for an external tool
#[cfg(all(test, unix))]
pub(crate) fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
