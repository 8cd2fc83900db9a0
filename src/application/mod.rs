pub mod use_cases;

pub use use_cases::company_lookup::CompanyLookupUseCase;
pub use use_cases::excel_normalizer::ExcelNormalizer;
pub use use_cases::upload::{UploadOutcome, UploadUseCase};
