//! PDF to Markdown conversion

use std::path::Path;

use tracing::{info, instrument, warn};

use super::PdfError;

/// Render extracted page texts as Markdown, one `# Page N` section per page
///
/// Pages without text are left out.
pub fn pages_to_markdown(pages: &[String]) -> String {
    let mut markdown = String::new();
    for (index, text) in pages.iter().enumerate() {
        let page_num = index + 1;
        let text = text.trim();
        if text.is_empty() {
            warn!("No text found on page {}", page_num);
            continue;
        }
        markdown.push_str(&format!("# Page {}\n\n{}\n\n", page_num, text));
    }
    markdown
}

/// Convert the PDF at `pdf_path` into a Markdown file at `output_md`
///
/// # Returns
///
/// The number of pages in the PDF
#[instrument]
pub async fn pdf_to_markdown(pdf_path: &Path, output_md: &Path) -> Result<usize, PdfError> {
    let path = pdf_path.to_path_buf();
    let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_by_pages(&path))
        .await?
        .map_err(|e| PdfError::Extraction(format!("{}: {}", pdf_path.display(), e)))?;

    let markdown = pages_to_markdown(&pages);
    tokio::fs::write(output_md, markdown).await?;

    info!(
        "Successfully converted {} to Markdown at {}",
        pdf_path.display(),
        output_md.display()
    );
    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_to_markdown_numbers_pages() {
        let pages = vec![
            "Introduction\n".to_string(),
            "   \n".to_string(),
            "Reference".to_string(),
        ];

        assert_eq!(
            pages_to_markdown(&pages),
            "# Page 1\n\nIntroduction\n\n# Page 3\n\nReference\n\n"
        );
    }

    #[test]
    fn test_pages_to_markdown_empty_document() {
        assert_eq!(pages_to_markdown(&[]), "");
    }

    #[tokio::test]
    async fn test_pdf_to_markdown_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.pdf");
        std::fs::write(&input, "this is not a pdf").unwrap();

        let result = pdf_to_markdown(&input, &dir.path().join("out.md")).await;
        assert!(result.is_err());
        assert!(!dir.path().join("out.md").exists());
    }
}
