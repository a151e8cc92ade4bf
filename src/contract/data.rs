//! Contract data structures matching the extraction backend's JSON format

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::{resolve_amount, resolve_count, FieldDefaults};

/// Date layouts produced by the extractor (`d/m/yyyy` and `d-m-yyyy`)
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d-%m-%Y"];

/// Kind of contract detected by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractType {
    Financing,
    Rental,
    Insurance,
    #[default]
    Unknown,
}

impl ContractType {
    /// Wire representation used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Financing => "financing",
            ContractType::Rental => "rental",
            ContractType::Insurance => "insurance",
            ContractType::Unknown => "unknown",
        }
    }
}

impl From<String> for ContractType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "financing" => ContractType::Financing,
            "rental" => ContractType::Rental,
            "insurance" => ContractType::Insurance,
            _ => ContractType::Unknown,
        }
    }
}

impl From<ContractType> for String {
    fn from(value: ContractType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of an uploaded contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Processing,
    Completed,
    Error,
}

/// Structured values extracted from a contract document
///
/// Every field is raw text as found in the document. Calculators read the
/// numeric fields through the accessor methods, which apply [`FieldDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractExtractedData {
    // Financing
    #[serde(default, deserialize_with = "amount_text", skip_serializing_if = "Option::is_none")]
    pub valor_financiado: Option<String>,
    #[serde(default, deserialize_with = "amount_text", skip_serializing_if = "Option::is_none")]
    pub valor_parcela: Option<String>,
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub numero_parcelas: Option<String>,
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub sistema_amortizacao: Option<String>,
    #[serde(default, deserialize_with = "text_list", skip_serializing_if = "Vec::is_empty")]
    pub taxas_juros: Vec<String>,

    // Rental
    #[serde(default, deserialize_with = "amount_text", skip_serializing_if = "Option::is_none")]
    pub valor_aluguel: Option<String>,
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub prazo_locacao: Option<String>,
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub valor_caucao: Option<String>,
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub multa_rescisao: Option<String>,

    // Insurance
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub premio_seguro: Option<String>,
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub valor_cobertura: Option<String>,
    #[serde(default, deserialize_with = "plain_text", skip_serializing_if = "Option::is_none")]
    pub franquia: Option<String>,

    // Any contract
    #[serde(default, deserialize_with = "text_list", skip_serializing_if = "Vec::is_empty")]
    pub valores_monetarios: Vec<String>,
    #[serde(default, deserialize_with = "text_list", skip_serializing_if = "Vec::is_empty")]
    pub percentuais: Vec<String>,
    #[serde(default, deserialize_with = "text_list", skip_serializing_if = "Vec::is_empty")]
    pub datas: Vec<String>,
}

impl ContractExtractedData {
    /// Check if nothing was extracted
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Financed amount, or the configured default
    pub fn financed_amount(&self, defaults: &FieldDefaults) -> f64 {
        resolve_amount("valor_financiado", self.valor_financiado.as_deref(), defaults.financed_amount)
    }

    /// Fixed installment amount, or the configured default
    pub fn installment_amount(&self, defaults: &FieldDefaults) -> f64 {
        resolve_amount("valor_parcela", self.valor_parcela.as_deref(), defaults.installment_amount)
    }

    /// Total number of installments, or the configured default
    pub fn installment_count(&self, defaults: &FieldDefaults) -> i64 {
        resolve_count("numero_parcelas", self.numero_parcelas.as_deref(), defaults.installment_count)
    }

    /// Monthly rent, or the configured default
    pub fn rent_amount(&self, defaults: &FieldDefaults) -> f64 {
        resolve_amount("valor_aluguel", self.valor_aluguel.as_deref(), defaults.rent_amount)
    }

    /// Lease term in months, or the configured default
    pub fn lease_months(&self, defaults: &FieldDefaults) -> i64 {
        resolve_count("prazo_locacao", self.prazo_locacao.as_deref(), defaults.lease_months)
    }

    /// Extracted dates that parse as calendar dates, in document order
    pub fn parsed_dates(&self) -> Vec<NaiveDate> {
        self.datas
            .iter()
            .filter_map(|raw| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
            })
            .collect()
    }
}

/// Payload of the backend's "extracted data for contract" endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractDataResponse {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub status: ProcessingStatus,

    /// `None` while the contract is still being processed
    #[serde(default)]
    pub contract_type: Option<ContractType>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_data: ContractExtractedData,
}

impl ContractDataResponse {
    /// Contract type, treating a missing one as unknown
    pub fn kind(&self) -> ContractType {
        self.contract_type.unwrap_or_default()
    }
}

/// Raw JSON value accepted for text fields
///
/// Anything that is not a string or a number lands in `Other` and reads as
/// absent, so one malformed field never rejects the whole record.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl RawScalar {
    fn into_text(self, decimal_comma: bool) -> Option<String> {
        match self {
            RawScalar::Text(s) => Some(s),
            RawScalar::Int(n) => Some(n.to_string()),
            RawScalar::Float(x) if decimal_comma => Some(x.to_string().replace('.', ",")),
            RawScalar::Float(x) => Some(x.to_string()),
            RawScalar::Other(_) => None,
        }
    }
}

/// List field as sent by the backend, or a lone value in its place
#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Many(Vec<RawScalar>),
    One(RawScalar),
}

/// Monetary field: strings kept verbatim, numbers rendered with a `,` decimal separator
fn amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?.and_then(|raw| raw.into_text(true)))
}

/// Integer or free-text field: strings kept verbatim, numbers rendered as text
fn plain_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?.and_then(|raw| raw.into_text(false)))
}

/// List of extracted strings; a single value becomes a one-item list
fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<RawList>::deserialize(deserializer)? {
        Some(RawList::Many(items)) => items.into_iter().filter_map(|raw| raw.into_text(false)).collect(),
        Some(RawList::One(raw)) => raw.into_text(false).into_iter().collect(),
        None => Vec::new(),
    };
    Ok(items)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_type_wire_format() {
        let kind: ContractType = serde_json::from_str(r#""rental""#).unwrap();
        assert_eq!(kind, ContractType::Rental);

        let kind: ContractType = serde_json::from_str(r#""something-else""#).unwrap();
        assert_eq!(kind, ContractType::Unknown);

        assert_eq!(serde_json::to_string(&ContractType::Financing).unwrap(), r#""financing""#);
    }

    #[test]
    fn test_numeric_fields_accept_numbers() {
        let data: ContractExtractedData = serde_json::from_str(
            r#"{"numero_parcelas": 240, "prazo_locacao": "30 meses", "valor_aluguel": 1800.5}"#,
        )
        .unwrap();

        let defaults = FieldDefaults::default();
        assert_eq!(data.installment_count(&defaults), 240);
        assert_eq!(data.lease_months(&defaults), 30);
        assert!((data.rent_amount(&defaults) - 1800.5).abs() < 1e-9);
    }

    #[test]
    fn test_accessors_fall_back_to_defaults() {
        let data = ContractExtractedData {
            valor_financiado: Some("a combinar".to_string()),
            ..Default::default()
        };
        let defaults = FieldDefaults::default();

        assert_eq!(data.financed_amount(&defaults), 350_000.0);
        assert_eq!(data.installment_amount(&defaults), 2_450.0);
        assert_eq!(data.installment_count(&defaults), 360);
        assert_eq!(data.rent_amount(&defaults), 1_500.0);
        assert_eq!(data.lease_months(&defaults), 12);
    }

    #[test]
    fn test_parsed_dates_skips_invalid() {
        let data = ContractExtractedData {
            datas: vec![
                "01/02/2024".to_string(),
                "31/02/2024".to_string(),
                "5-11-2023".to_string(),
            ],
            ..Default::default()
        };

        let dates = data.parsed_dates();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2023, 11, 5).unwrap());
    }

    #[test]
    fn test_response_with_null_data() {
        let response: ContractDataResponse = serde_json::from_str(
            r#"{"id": 7, "status": "processing", "contract_type": null, "extracted_data": null}"#,
        )
        .unwrap();

        assert_eq!(response.id, 7);
        assert_eq!(response.status, ProcessingStatus::Processing);
        assert_eq!(response.kind(), ContractType::Unknown);
        assert!(response.extracted_data.is_empty());
    }

    #[test]
    fn test_wrong_value_types_read_as_absent() {
        let data: ContractExtractedData = serde_json::from_str(
            r#"{"valor_financiado": true, "valor_parcela": {"valor": 10}, "numero_parcelas": [360],
                "prazo_locacao": false, "sistema_amortizacao": 3, "franquia": [],
                "valor_aluguel": "R$ 2.100,00"}"#,
        )
        .unwrap();

        assert_eq!(data.valor_financiado, None);
        assert_eq!(data.valor_parcela, None);
        assert_eq!(data.numero_parcelas, None);
        assert_eq!(data.prazo_locacao, None);
        assert_eq!(data.sistema_amortizacao.as_deref(), Some("3"));
        assert_eq!(data.franquia, None);

        let defaults = FieldDefaults::default();
        assert_eq!(data.financed_amount(&defaults), 350_000.0);
        assert_eq!(data.installment_count(&defaults), 360);
        assert_eq!(data.lease_months(&defaults), 12);
        assert_eq!(data.rent_amount(&defaults), 2_100.0);
    }

    #[test]
    fn test_list_fields_accept_lone_values() {
        let data: ContractExtractedData = serde_json::from_str(
            r#"{"datas": "01/02/2024", "percentuais": ["1,5%", null, false, 2],
                "valores_monetarios": {"a": 1}, "taxas_juros": null}"#,
        )
        .unwrap();

        assert_eq!(data.datas, vec!["01/02/2024".to_string()]);
        assert_eq!(data.percentuais, vec!["1,5%".to_string(), "2".to_string()]);
        assert!(data.valores_monetarios.is_empty());
        assert!(data.taxas_juros.is_empty());
        assert_eq!(data.parsed_dates(), vec![NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()]);
    }

    #[test]
    fn test_response_without_id() {
        let response: ContractDataResponse =
            serde_json::from_str(r#"{"extracted_data": {"valor_aluguel": "R$ 900,00"}}"#).unwrap();

        assert_eq!(response.id, 0);
        assert_eq!(response.extracted_data.valor_aluguel.as_deref(), Some("R$ 900,00"));
    }
}
