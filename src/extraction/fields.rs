//! Regex extraction of contract fields from plain text

use once_cell::sync::Lazy;
use regex::Regex;

use crate::contract::{ContractExtractedData, ContractType};

// Compiled regex patterns
static MONEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"R\$\s*[\d.,]+(?:\.\d{2})?").unwrap());

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}[/\-]\d{1,2}[/\-]\d{4}").unwrap());

static RATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:,\d+)?%\s*(?:a\.a\.|ao ano|a\.m\.|ao mês)?").unwrap()
});

static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:,\d+)?%").unwrap());

static INSTALLMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:parcelas?|prestações?)").unwrap());

static AMORTIZATION_SYSTEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(SAC|PRICE|Tabela Price)").unwrap());

static LEASE_PERIOD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:meses?|anos?)").unwrap());

static PENALTY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)multa.*?(\d+(?:,\d+)?%|R\$\s*[\d.,]+)").unwrap()
});

static COVERAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)cobertura.*?(?:até|máximo).*?(R\$\s*[\d.,]+)").unwrap()
});

static DEDUCTIBLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)franquia.*?(R\$\s*[\d.,]+|\d+(?:,\d+)?%)").unwrap()
});

/// All full matches of a pattern, in order
fn find_all(pattern: &Regex, text: &str) -> Vec<String> {
    pattern.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Money matches with trailing punctuation removed
///
/// `[\d.,]+` also eats a sentence-ending `.` or `,`, which would shift the
/// decimal separator once the value is parsed.
fn find_money(text: &str) -> Vec<String> {
    MONEY_PATTERN
        .find_iter(text)
        .map(|m| trim_separators(m.as_str()))
        .collect()
}

fn trim_separators(raw: &str) -> String {
    raw.trim_end_matches(['.', ',']).to_string()
}

/// First capture group of the first match
fn first_group(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the fields relevant to `contract_type` from contract text
pub fn extract_contract_data(text: &str, contract_type: ContractType) -> ContractExtractedData {
    match contract_type {
        ContractType::Financing => extract_financing(text),
        ContractType::Rental => extract_rental(text),
        ContractType::Insurance => extract_insurance(text),
        ContractType::Unknown => extract_general(text),
    }
}

fn extract_financing(text: &str) -> ContractExtractedData {
    let money = find_money(text);

    ContractExtractedData {
        valor_financiado: money.first().cloned(),
        valor_parcela: money.get(1).cloned(),
        numero_parcelas: first_group(&INSTALLMENT_PATTERN, text),
        sistema_amortizacao: first_group(&AMORTIZATION_SYSTEM_PATTERN, text),
        taxas_juros: find_all(&RATE_PATTERN, text),
        datas: find_all(&DATE_PATTERN, text),
        valores_monetarios: money,
        ..Default::default()
    }
}

fn extract_rental(text: &str) -> ContractExtractedData {
    let money = find_money(text);

    ContractExtractedData {
        valor_aluguel: money.first().cloned(),
        valor_caucao: money.get(1).cloned(),
        prazo_locacao: first_group(&LEASE_PERIOD_PATTERN, text),
        multa_rescisao: first_group(&PENALTY_PATTERN, text).map(|s| trim_separators(&s)),
        datas: find_all(&DATE_PATTERN, text),
        valores_monetarios: money,
        ..Default::default()
    }
}

fn extract_insurance(text: &str) -> ContractExtractedData {
    let money = find_money(text);

    ContractExtractedData {
        premio_seguro: money.first().cloned(),
        valor_cobertura: first_group(&COVERAGE_PATTERN, text).map(|s| trim_separators(&s)),
        franquia: first_group(&DEDUCTIBLE_PATTERN, text).map(|s| trim_separators(&s)),
        valores_monetarios: money,
        ..Default::default()
    }
}

fn extract_general(text: &str) -> ContractExtractedData {
    ContractExtractedData {
        valores_monetarios: find_money(text),
        datas: find_all(&DATE_PATTERN, text),
        percentuais: find_all(&PERCENT_PATTERN, text),
        ..Default::default()
    }
}
