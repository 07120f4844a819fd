//! PDF text extraction
//!
//! Extraction is total per file: failures become placeholder documents, and
//! a batch always yields exactly one output per input, in upload order.

use rfplens_domain::{ExtractedDocument, UploadedDocument};
use tracing::{debug, warn};

/// Extract text from one uploaded PDF.
///
/// Never fails: a parse error is captured into the returned document's
/// `extraction_error` and its text becomes the fixed placeholder.
pub fn extract_pdf(doc: &UploadedDocument) -> ExtractedDocument {
    match pdf_extract::extract_text_from_mem(&doc.bytes) {
        Ok(text) => {
            debug!(
                file = %doc.original_name,
                chars = text.len(),
                "extracted PDF text"
            );
            ExtractedDocument::ok(&doc.original_name, text)
        }
        Err(e) => {
            warn!(file = %doc.original_name, error = %e, "PDF parse failed");
            ExtractedDocument::failed(&doc.original_name, e.to_string())
        }
    }
}

/// Extract a whole batch concurrently, preserving upload order.
///
/// Each file is parsed on a blocking thread (parsing is CPU-bound and the
/// files are independent); results are rejoined in the original order, which
/// the corpus and its provenance labels depend on. A worker that panics on
/// pathological input is also folded into a placeholder document.
pub async fn extract_batch(docs: Vec<UploadedDocument>) -> Vec<ExtractedDocument> {
    let handles: Vec<_> = docs
        .into_iter()
        .map(|doc| {
            let name = doc.original_name.clone();
            let handle = tokio::task::spawn_blocking(move || extract_pdf(&doc));
            (name, handle)
        })
        .collect();

    let mut extracted = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        match handle.await {
            Ok(doc) => extracted.push(doc),
            Err(e) => {
                warn!(file = %name, error = %e, "PDF extraction worker failed");
                extracted.push(ExtractedDocument::failed(name, format!("worker failed: {e}")));
            }
        }
    }
    extracted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfplens_domain::PARSE_FAILURE_PLACEHOLDER;

    /// Minimal single-page PDF with the text "Hello" on it
    fn tiny_pdf() -> Vec<u8> {
        let mut pdf = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n");
        let objects: Vec<String> = vec![
            "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".into(),
            "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".into(),
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>\nendobj\n"
                .into(),
            {
                let stream = "BT /F1 12 Tf 72 720 Td (Hello) Tj ET";
                format!(
                    "4 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
                    stream.len(),
                    stream
                )
            },
            "5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".into(),
        ];

        let mut offsets = Vec::new();
        for obj in &objects {
            offsets.push(pdf.len());
            pdf.extend_from_slice(obj.as_bytes());
        }

        let xref_start = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_start
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_well_formed_pdf_extracts_text() {
        let doc = UploadedDocument::new("good.pdf", tiny_pdf());
        let extracted = extract_pdf(&doc);
        assert!(extracted.is_ok());
        assert!(extracted.text.contains("Hello"));
    }

    #[test]
    fn test_garbage_bytes_become_placeholder() {
        let doc = UploadedDocument::new("garbage.pdf", b"not a pdf at all".to_vec());
        let extracted = extract_pdf(&doc);
        assert_eq!(extracted.text, PARSE_FAILURE_PLACEHOLDER);
        assert!(extracted.extraction_error.is_some());
    }

    #[tokio::test]
    async fn test_batch_with_corrupt_middle_file_keeps_all_three() {
        let docs = vec![
            UploadedDocument::new("one.pdf", tiny_pdf()),
            UploadedDocument::new("two.pdf", b"corrupt".to_vec()),
            UploadedDocument::new("three.pdf", tiny_pdf()),
        ];

        let extracted = extract_batch(docs).await;

        assert_eq!(extracted.len(), 3);
        assert_eq!(extracted[0].original_name, "one.pdf");
        assert!(extracted[0].is_ok());
        assert_eq!(extracted[1].text, PARSE_FAILURE_PLACEHOLDER);
        assert_eq!(extracted[2].original_name, "three.pdf");
        assert!(extracted[2].is_ok());
    }

    #[tokio::test]
    async fn test_batch_preserves_upload_order() {
        let docs: Vec<_> = (0..5)
            .map(|i| UploadedDocument::new(format!("doc{i}.pdf"), tiny_pdf()))
            .collect();
        let names: Vec<_> = docs.iter().map(|d| d.original_name.clone()).collect();

        let extracted = extract_batch(docs).await;
        let extracted_names: Vec<_> =
            extracted.iter().map(|d| d.original_name.clone()).collect();
        assert_eq!(extracted_names, names);
    }
}
