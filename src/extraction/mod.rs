//! Contract classification and field extraction from plain text
//!
//! Produces the same `extracted_data` shape the backend serves, so contract
//! text files can be fed straight into the calculators.

mod classifier;
mod fields;

use std::fs;
use std::path::Path;

use crate::contract::{ContractExtractedData, ContractType};
use crate::error::Result;

pub use classifier::{classify_contract_type, keyword_scores};
pub use fields::extract_contract_data;

/// Classify text and extract the fields for its type
///
/// Blank text yields `Unknown` with no extracted data.
pub fn process_document(text: &str) -> (ContractType, ContractExtractedData) {
    if text.trim().is_empty() {
        return (ContractType::Unknown, ContractExtractedData::default());
    }

    let contract_type = classify_contract_type(text);
    let data = extract_contract_data(text, contract_type);
    (contract_type, data)
}

/// Read a text file as UTF-8, falling back to Latin-1
pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = fs::read(path.as_ref())?;
    Ok(decode_text(bytes))
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("Text is not valid UTF-8, decoding as Latin-1");
            // Latin-1 maps each byte to the code point of the same value
            err.into_bytes().iter().map(|&b| b as char).collect()
        }
    }
}
