//! Contract data structures and JSON loading

mod data;
pub mod loader;

pub use data::{ContractType, ProcessingStatus, ContractExtractedData, ContractDataResponse};
pub use loader::{load_contracts, load_contracts_from_reader, load_extracted_data, load_extracted_data_from_reader};
