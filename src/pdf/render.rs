//! HTML to PDF rendering through `wkhtmltopdf`

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument};

use super::{PdfError, PdfTools, files_with_extension, run_tool};

/// Folder, relative to the HTML folder, that receives rendered PDFs
pub const PDF_OUTPUT_DIR: &str = "pdf_output";

/// Render every `*.html` file in `folder` into `folder/pdf_output`
///
/// Files are processed in name order. A file that fails to render is logged
/// and skipped.
///
/// # Returns
///
/// The PDFs that were written
#[instrument(skip(tools))]
pub async fn convert_html_dir(tools: &PdfTools, folder: &Path) -> Result<Vec<PathBuf>, PdfError> {
    let output_folder = folder.join(PDF_OUTPUT_DIR);
    tokio::fs::create_dir_all(&output_folder).await?;

    let mut written = Vec::new();
    for html_file in files_with_extension(folder, "html")? {
        let Some(stem) = html_file.file_stem() else {
            continue;
        };
        let mut pdf_name = stem.to_os_string();
        pdf_name.push(".pdf");
        let pdf_file = output_folder.join(pdf_name);
        let name = html_file.file_name().unwrap_or_default().to_string_lossy().into_owned();

        match run_tool(&tools.wkhtmltopdf, [html_file.as_os_str(), pdf_file.as_os_str()]).await {
            Ok(()) => {
                info!("Successfully converted: {} to PDF", name);
                written.push(pdf_file);
            }
            Err(e) => error!("Failed to convert {}: {}", name, e),
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_convert_skips_failures_and_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("intro.html"), "<h1>Intro</h1>").unwrap();

        let tools = PdfTools {
            wkhtmltopdf: PathBuf::from("scrapedocs-missing-wkhtmltopdf"),
            ..PdfTools::default()
        };

        let written = convert_html_dir(&tools, dir.path()).await.unwrap();

        assert!(written.is_empty());
        assert!(dir.path().join(PDF_OUTPUT_DIR).is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_convert_keeps_dotted_stems() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api.v2.html"), "<h1>API</h1>").unwrap();

        let tools = PdfTools {
            wkhtmltopdf: PathBuf::from("true"),
            ..PdfTools::default()
        };

        let written = convert_html_dir(&tools, dir.path()).await.unwrap();
        assert_eq!(
            written,
            vec![dir.path().join(PDF_OUTPUT_DIR).join("api.v2.pdf")]
        );
    }
}
