//! Keyword-based contract type classification

use crate::contract::ContractType;

const FINANCING_KEYWORDS: &[&str] = &[
    "financiamento", "empréstimo", "crédito", "parcela", "juros", "amortização",
    "sac", "price", "cet", "taxa", "prestação", "mutuário", "credor",
    "garantia", "hipoteca", "alienação fiduciária", "banco", "instituição financeira",
];

const RENTAL_KEYWORDS: &[&str] = &[
    "locação", "aluguel", "locador", "locatário", "inquilino", "imóvel",
    "aluguer", "arrendamento", "caução", "depósito", "fiador", "avalista",
    "vistoria", "benfeitorias", "iptu", "condomínio", "rescisão",
];

const INSURANCE_KEYWORDS: &[&str] = &[
    "seguro", "apólice", "segurado", "segurador", "prêmio", "sinistro",
    "cobertura", "franquia", "indenização", "beneficiário", "vigência",
    "renovação", "exclusão", "risco", "dano", "ressarcimento",
];

/// Candidate types in tie-break order
const CANDIDATES: [(ContractType, &[&str]); 3] = [
    (ContractType::Financing, FINANCING_KEYWORDS),
    (ContractType::Rental, RENTAL_KEYWORDS),
    (ContractType::Insurance, INSURANCE_KEYWORDS),
];

/// Keyword hit counts per candidate type
pub fn keyword_scores(text: &str) -> Vec<(ContractType, usize)> {
    let lower = text.to_lowercase();
    CANDIDATES
        .iter()
        .map(|(kind, keywords)| {
            let score: usize = keywords.iter().map(|kw| lower.matches(kw).count()).sum();
            (*kind, score)
        })
        .collect()
}

/// Classify contract text by keyword frequency
///
/// The type with the most keyword hits wins; ties go to the earlier of
/// financing, rental, insurance. No hits at all gives `Unknown`.
pub fn classify_contract_type(text: &str) -> ContractType {
    let mut best = (ContractType::Unknown, 0usize);
    for (kind, score) in keyword_scores(text) {
        if score > best.1 {
            best = (kind, score);
        }
    }
    log::debug!("Classified contract as {} ({} keyword hits)", best.0, best.1);
    best.0
}
