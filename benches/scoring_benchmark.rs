//! Performance benchmarks for the scoring pipeline.
//!
//! Run with: cargo bench --bench scoring_benchmark
//!
//! Datasets are synthetic: every factor is rated by every respondent in every
//! cycle, with levels spread deterministically over the 1-5 scale.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rmm_tools::config::ScoringConfig;
use rmm_tools::model::{Action, Area, Factor, Response, Timeframe};
use rmm_tools::pipeline::{run_assessment, run_trends, AssessmentOptions, Dataset};
use rmm_tools::scoring::{FactorScorer, GapAnalyzer};
use std::hint::black_box;

const GROUPS: [&str; 4] = ["Finance", "Operations", "Programs", "M&E"];

/// Generate a dataset with `factors_per_area` factors in each area.
fn generate_dataset(factors_per_area: usize, respondents: usize, cycles: usize) -> Dataset {
    let mut factors = Vec::new();
    let mut actions = Vec::new();
    for area in Area::ALL {
        for i in 0..factors_per_area {
            let id = format!("{}_{i:02}", area.code());
            factors.push(
                Factor::new(&id, area, format!("{} practice {i}", area.name()), 4, "Owners")
                    .with_weight(1.0 + (i % 3) as f64)
                    .with_evidence_required(i % 2 == 0),
            );
            for level in 1..=3 {
                actions.push(Action {
                    action_id: format!("{id}-A{level}"),
                    factor_id: id.clone(),
                    if_level_leq: level,
                    action_text: "Strengthen {factor}".to_string(),
                    impact: (level + 2) as u8,
                    effort: (4 - level) as u8,
                    timeframe: Timeframe::ALL[(level - 1) as usize],
                    dependency_action_id: None,
                });
            }
        }
    }

    let mut responses = Vec::new();
    for cycle in 0..cycles {
        let cycle_id = format!("{}-Q1", 2020 + cycle);
        for r in 0..respondents {
            let group = GROUPS[r % GROUPS.len()];
            for (f, factor) in factors.iter().enumerate() {
                let level = ((r + f + cycle) % 5 + 1) as i64;
                let mut response =
                    Response::new(&cycle_id, format!("R{r}"), group, &factor.factor_id, level);
                if (r + f) % 3 != 0 {
                    response = response.with_evidence("https://intranet/evidence");
                }
                responses.push(response);
            }
        }
    }

    Dataset::from_parts(factors, responses, actions).expect("synthetic dataset is valid")
}

fn bench_factor_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("factor_scoring");
    for respondents in [10, 100, 500] {
        let dataset = generate_dataset(10, respondents, 1);
        let scorer = FactorScorer::default();

        group.bench_with_input(
            BenchmarkId::from_parameter(respondents),
            &dataset,
            |b, dataset| {
                b.iter(|| {
                    black_box(scorer.score(
                        black_box(&dataset.responses),
                        &dataset.factors,
                        "2020-Q1",
                        None,
                    ))
                })
            },
        );
    }
    group.finish();
}

fn bench_gap_analysis(c: &mut Criterion) {
    let dataset = generate_dataset(20, 50, 1);
    let scores =
        FactorScorer::default().score(&dataset.responses, &dataset.factors, "2020-Q1", None);
    let analyzer = GapAnalyzer::default();

    c.bench_function("gap_analysis_60_factors", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&scores), &dataset.actions)))
    });
}

fn bench_full_assessment(c: &mut Criterion) {
    let dataset = generate_dataset(10, 100, 1);
    let config = ScoringConfig::default();
    let options = AssessmentOptions::default();

    c.bench_function("assessment_30_factors_100_respondents", |b| {
        b.iter(|| {
            let _ = black_box(run_assessment(black_box(&dataset), &config, &options));
        })
    });
}

fn bench_trends(c: &mut Criterion) {
    let mut group = c.benchmark_group("trends");
    for cycles in [2, 4, 8] {
        let dataset = generate_dataset(10, 50, cycles);
        let config = ScoringConfig::default();

        group.bench_with_input(BenchmarkId::from_parameter(cycles), &dataset, |b, dataset| {
            b.iter(|| {
                let _ = black_box(run_trends(black_box(dataset), &config));
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_factor_scoring,
    bench_gap_analysis,
    bench_full_assessment,
    bench_trends
);
criterion_main!(benches);
