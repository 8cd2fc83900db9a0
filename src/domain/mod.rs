pub mod company;
pub mod error;
pub mod upload;
pub mod workbook;
