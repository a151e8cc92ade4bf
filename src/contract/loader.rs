//! Load contract payloads saved from the extraction backend

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{ContractDataResponse, ContractExtractedData};
use crate::error::Result;

/// Load a JSON array of contract payloads
pub fn load_contracts<P: AsRef<Path>>(path: P) -> Result<Vec<ContractDataResponse>> {
    let file = File::open(path)?;
    load_contracts_from_reader(BufReader::new(file))
}

/// Load a JSON array of contract payloads from any reader
pub fn load_contracts_from_reader<R: Read>(reader: R) -> Result<Vec<ContractDataResponse>> {
    let contracts: Vec<ContractDataResponse> = serde_json::from_reader(reader)?;
    log::info!("Loaded {} contracts", contracts.len());
    Ok(contracts)
}

/// Load extracted data from either a contract payload or a bare `extracted_data` object
pub fn load_extracted_data<P: AsRef<Path>>(path: P) -> Result<ContractExtractedData> {
    let file = File::open(path)?;
    load_extracted_data_from_reader(BufReader::new(file))
}

/// Load extracted data from any reader
///
/// An object with an `extracted_data` key is read as a contract payload;
/// anything else is read as the extracted data itself.
pub fn load_extracted_data_from_reader<R: Read>(reader: R) -> Result<ContractExtractedData> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    if value.get("extracted_data").is_some() {
        let contract: ContractDataResponse = serde_json::from_value(value)?;
        Ok(contract.extracted_data)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}
