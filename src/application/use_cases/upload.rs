use std::path::PathBuf;
use std::sync::Arc;

use crate::application::use_cases::excel_normalizer::ExcelNormalizer;
use crate::domain::company::CompanyRecord;
use crate::domain::error::{AppError, Result};
use crate::domain::upload::{UploadKind, UploadedFile};
use crate::infrastructure::pdf::{LinkExtractor, LinkMap};
use crate::infrastructure::temp_file::persist_to_temp;

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Companies(Vec<CompanyRecord>),
    Links(LinkMap),
}

/// Routes an upload by extension. Each branch hands the payload to its
/// processor through a temp file that is deleted when the branch returns.
pub struct UploadUseCase {
    normalizer: ExcelNormalizer,
    link_extractor: Arc<dyn LinkExtractor + Send + Sync>,
    temp_dir: Option<PathBuf>,
}

impl UploadUseCase {
    pub fn new(
        normalizer: ExcelNormalizer,
        link_extractor: Arc<dyn LinkExtractor + Send + Sync>,
        temp_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            normalizer,
            link_extractor,
            temp_dir,
        }
    }

    /// Blocking: parses the whole file on the calling thread
    pub fn execute(&self, file: &UploadedFile) -> Result<UploadOutcome> {
        let kind = file.kind()?;
        let temp = persist_to_temp(&file.bytes, kind.suffix(), self.temp_dir.as_deref())?;

        let outcome = match kind {
            UploadKind::Excel => self
                .normalizer
                .normalize_file(temp.path())
                .map(UploadOutcome::Companies),
            UploadKind::Pdf => self
                .link_extractor
                .extract_http_links_from_pdf(temp.path())
                .map(UploadOutcome::Links),
        };

        if let Err(e) = temp.close() {
            tracing::warn!(error = %e, "Failed to remove upload temp file");
        }

        outcome.map_err(|err| match err {
            AppError::ValidationError(_) | AppError::ProcessingError(_) => err,
            other => AppError::ProcessingError(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingExtractor {
        seen: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl LinkExtractor for RecordingExtractor {
        fn extract_http_links_from_pdf(&self, path: &Path) -> Result<LinkMap> {
            assert!(path.exists());
            assert!(path.to_string_lossy().ends_with(".pdf"));
            self.seen.lock().unwrap().push(path.to_path_buf());
            if self.fail {
                return Err(AppError::ProcessingError("corrupt".to_string()));
            }
            let mut links = LinkMap::new();
            links.insert("acme".to_string(), "https://acme.io".to_string());
            Ok(links)
        }
    }

    fn use_case(extractor: Arc<RecordingExtractor>, dir: &Path) -> UploadUseCase {
        UploadUseCase::new(
            ExcelNormalizer::default(),
            extractor,
            Some(dir.to_path_buf()),
        )
    }

    #[test]
    fn test_pdf_goes_to_link_extractor_and_temp_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = Arc::new(RecordingExtractor::default());
        let outcome = use_case(extractor.clone(), dir.path())
            .execute(&UploadedFile::new("deck.pdf", b"%PDF-1.5".to_vec()))
            .unwrap();

        match outcome {
            UploadOutcome::Links(links) => assert_eq!(links["acme"], "https://acme.io"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        let seen = extractor.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].exists());
    }

    #[test]
    fn test_temp_file_is_removed_when_processing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = Arc::new(RecordingExtractor {
            fail: true,
            ..Default::default()
        });
        let err = use_case(extractor.clone(), dir.path())
            .execute(&UploadedFile::new("deck.pdf", b"%PDF-1.5".to_vec()))
            .unwrap_err();

        assert_eq!(err.to_string(), "An error occurred: corrupt");
        assert!(!extractor.seen.lock().unwrap()[0].exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_malformed_excel_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = use_case(Arc::new(RecordingExtractor::default()), dir.path())
            .execute(&UploadedFile::new("companies.xlsx", b"not a workbook".to_vec()))
            .unwrap_err();

        assert!(matches!(err, AppError::ProcessingError(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unsupported_type_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let err = use_case(Arc::new(RecordingExtractor::default()), dir.path())
            .execute(&UploadedFile::new("report.csv", b"a,b".to_vec()))
            .unwrap_err();

        assert_eq!(err, AppError::UnsupportedFileType);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
