use criterion::{black_box, criterion_group, criterion_main, Criterion};
use project_risk_analyzer::{
    models::{CreateAssessment, RiskFactor, RiskFactorSet},
    services::{AssessmentService, RiskScorer},
};

fn sample_factors() -> RiskFactorSet {
    RiskFactor::ALL
        .into_iter()
        .zip([8.0, 6.0, 7.0, 5.0, 4.0, 3.0])
        .collect()
}

fn benchmark_risk_calculation(c: &mut Criterion) {
    let scorer = RiskScorer::new();
    let factors = sample_factors();

    c.bench_function("compute_score", |b| {
        b.iter(|| scorer.compute_score(black_box(&factors)))
    });

    c.bench_function("analyze", |b| b.iter(|| scorer.analyze(black_box(&factors))));
}

fn benchmark_summary(c: &mut Criterion) {
    let mut service = AssessmentService::default();
    for i in 0..1000 {
        let rating = f64::from(i % 10 + 1);
        let request = CreateAssessment {
            project_name: format!("project-{}", i),
            description: None,
            risk_factors: RiskFactor::ALL.into_iter().map(|f| (f, rating)).collect(),
        };
        service.create(request).expect("valid factors");
    }

    c.bench_function("summary_1000", |b| b.iter(|| black_box(&service).summary()));
}

criterion_group!(benches, benchmark_risk_calculation, benchmark_summary);
criterion_main!(benches);
