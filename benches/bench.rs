// Criterion benchmarks for Loan Scorer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loan_scorer::core::{discover_schema, encode, reconcile, Predictor};
use loan_scorer::models::{ApplicantRecord, FEATURE_NAMES};
use loan_scorer::scoring::{LogisticModel, ScoringModel};
use serde_json::json;
use std::sync::Arc;

fn create_applicant(id: usize) -> ApplicantRecord {
    let education = ["High School", "Bachelor's", "Master's", "PhD"][id % 4];
    let loan_term = [12, 24, 36, 48, 60][id % 5];
    let employment_type = if id % 7 == 0 { "Unemployed" } else { "Full-time" };
    let has_mortgage = if id % 2 == 0 { "Yes" } else { "No" };
    let has_cosigner = if id % 3 == 0 { "Yes" } else { "No" };
    serde_json::from_value(json!({
        "age": 25 + (id % 40),
        "income": 30000 + (id % 50) * 1000,
        "loan_amount": 5000 + (id % 20) * 500,
        "credit_score": 550 + (id % 300),
        "months_employed": id % 120,
        "num_credit_lines": 1 + id % 4,
        "interest_rate": 3.5 + (id % 10) as f64 * 0.5,
        "loan_term": loan_term,
        "dti_ratio": 0.1 + (id % 8) as f64 * 0.05,
        "education": education,
        "employment_type": employment_type,
        "marital_status": "Single",
        "has_mortgage": has_mortgage,
        "has_dependents": "No",
        "loan_purpose": "Auto",
        "has_cosigner": has_cosigner
    }))
    .unwrap()
}

fn create_model(reversed: bool) -> Arc<dyn ScoringModel> {
    let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    if reversed {
        names.reverse();
    }
    Arc::new(LogisticModel {
        coefficients: vec![0.01; names.len()],
        feature_names: Some(names),
        intercept: -1.0,
    })
}

fn bench_encode(c: &mut Criterion) {
    let applicant = create_applicant(42);
    c.bench_function("encode", |b| {
        b.iter(|| encode(black_box(&applicant)))
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let vector = encode(&create_applicant(42)).unwrap();
    let model = create_model(true);
    let schema = discover_schema(model.as_ref(), &vector);

    c.bench_function("reconcile_reversed_schema", |b| {
        b.iter(|| reconcile(black_box(&vector), black_box(&schema.names)))
    });
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    for reversed in [false, true] {
        let predictor = Predictor::new(create_model(reversed), 0.25);
        let applicants: Vec<ApplicantRecord> = (0..100).map(create_applicant).collect();

        group.bench_with_input(
            BenchmarkId::new("batch_of_100", if reversed { "reversed" } else { "aligned" }),
            &applicants,
            |b, applicants| {
                b.iter(|| {
                    for applicant in applicants {
                        let _ = black_box(predictor.predict(applicant));
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_reconcile, bench_predict);
criterion_main!(benches);
