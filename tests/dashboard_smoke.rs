use contract_dashboard::{
    contract::load_contracts_from_reader,
    extraction::process_document,
    calculate_penalty, generate_schedule, ContractType, DashboardRunner,
};
use std::io::Cursor;

#[test]
fn extracted_text_feeds_schedule() {
    let text = "Contrato de financiamento bancário. Valor financiado R$ 120.000,00 em 180 parcelas \
        mensais de R$ 1.500,00, com juros pela Tabela Price.";

    let (kind, data) = process_document(text);
    assert_eq!(kind, ContractType::Financing);

    let schedule = generate_schedule(&data, 12);
    assert_eq!(schedule.len(), 12);

    let first = &schedule.entries[0];
    assert!((first.interest_portion - 840.0).abs() < 1e-6);
    assert!((first.principal_portion - 660.0).abs() < 1e-6);
    assert!((first.remaining_balance - 119_340.0).abs() < 1e-6);
}

#[test]
fn extracted_text_feeds_penalty() {
    let text = "Contrato de locação residencial. Aluguel de R$ 2.000,00, prazo de 24 meses, \
        fiador obrigatório.";

    let (kind, data) = process_document(text);
    assert_eq!(kind, ContractType::Rental);

    assert!((calculate_penalty(&data, 12).penalty_amount - 6_000.0).abs() < 1e-6);
    assert!((calculate_penalty(&data, 13).penalty_amount - 2_000.0).abs() < 1e-6);
}

#[test]
fn backend_export_reports() {
    let json = r#"[
        {"id": 10, "status": "completed", "contract_type": "financing",
         "extracted_data": {"valor_financiado": "R$ 80.000,00", "valor_parcela": "R$ 900,00", "numero_parcelas": "3"}},
        {"id": 11, "status": "completed", "contract_type": "rental",
         "extracted_data": {"valor_aluguel": "R$ 1.000,00", "prazo_locacao": "11"}},
        {"id": 12, "status": "processing", "contract_type": null}
    ]"#;

    let contracts = load_contracts_from_reader(Cursor::new(json)).expect("load contracts");
    let reports = DashboardRunner::new().report_batch(&contracts);

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].schedule.as_ref().map(|s| s.len()), Some(3));

    let penalties = &reports[1].penalties;
    assert_eq!(penalties.len(), 12);
    assert!((penalties[4].penalty_amount - 3_000.0).abs() < 1e-6);
    assert!((penalties[5].penalty_amount - 1_000.0).abs() < 1e-6);

    assert!(reports[2].schedule.is_none());
    assert!(reports[2].penalties.is_empty());
}
