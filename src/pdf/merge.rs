//! PDF merging through `pdfunite`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, warn};

use super::{PdfError, PdfTools, files_with_extension, run_tool};

/// Concatenate every readable `*.pdf` in `folder`, in name order, into `output_pdf`
///
/// Each input is checked with `pdfinfo` first; unreadable files are logged and
/// left out. If `pdfinfo` is not installed the inputs are merged unchecked.
///
/// # Returns
///
/// The number of files merged
#[instrument(skip(tools))]
pub async fn concatenate_pdfs(
    tools: &PdfTools,
    folder: &Path,
    output_pdf: &Path,
) -> Result<usize, PdfError> {
    let inputs = readable_pdfs(tools, files_with_extension(folder, "pdf")?).await;
    if inputs.is_empty() {
        return Err(PdfError::NoInputs(folder.display().to_string()));
    }

    let mut args: Vec<OsString> = Vec::with_capacity(inputs.len() + 1);
    for input in &inputs {
        info!("Added {} to merge", input.display());
        args.push(input.clone().into_os_string());
    }
    args.push(output_pdf.as_os_str().to_os_string());

    if let Some(parent) = output_pdf.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    run_tool(&tools.pdfunite, args).await?;

    info!("Successfully created merged PDF: {}", output_pdf.display());
    Ok(inputs.len())
}

/// Keep the inputs `pdfinfo` can read
async fn readable_pdfs(tools: &PdfTools, inputs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut readable = Vec::with_capacity(inputs.len());
    let mut remaining = inputs.into_iter();

    while let Some(input) = remaining.next() {
        match run_tool(&tools.pdfinfo, [input.as_os_str()]).await {
            Ok(()) => readable.push(input),
            Err(PdfError::ToolUnavailable { tool, message }) => {
                warn!("Cannot check PDFs with {} ({}), merging unchecked", tool, message);
                readable.push(input);
                readable.extend(remaining);
                break;
            }
            Err(e) => error!("Error adding {}: {}", input.display(), e),
        }
    }

    readable
}
