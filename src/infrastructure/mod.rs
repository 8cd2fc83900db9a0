pub mod config;
pub mod data_sources;
pub mod enrichment;
pub mod excel;
pub mod id;
pub mod pdf;
pub mod temp_file;
