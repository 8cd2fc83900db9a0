pub mod company_lookup;
pub mod excel_normalizer;
pub mod upload;
