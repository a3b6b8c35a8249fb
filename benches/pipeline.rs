use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use jobsight::{
    Analyzer, FieldLimits, Finding, FindingDetail, JobData, JobDescriptor, JobDescriptorConfig,
    Rule, RuleRegistry, Severity,
};

struct Durations(Vec<u64>);

impl JobData for Durations {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Flags tasks longer than `threshold` and lists each one as a detail.
struct SlowTasks {
    class_name: String,
    threshold: u64,
}

impl Rule<Durations> for SlowTasks {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn name(&self) -> &str {
        &self.class_name
    }

    fn apply(&self, data: &Durations) -> anyhow::Result<Option<Finding>> {
        let mut finding = Finding::new(&self.class_name, &self.class_name, Severity::None, 0);
        for (i, d) in data.0.iter().enumerate().filter(|(_, d)| **d > self.threshold) {
            finding = finding.with_detail(FindingDetail::new(format!("task {i}"), d.to_string()));
        }
        if finding.details.is_empty() {
            return Ok(None);
        }
        finding.score = i32::try_from(finding.details.len())?;
        finding.severity = Severity::Moderate;
        Ok(Some(finding))
    }
}

fn analyzer(rule_count: usize) -> Analyzer<Durations> {
    let mut registry = RuleRegistry::new();
    for i in 0..rule_count {
        registry.register(
            "spark",
            Arc::new(SlowTasks {
                class_name: format!("SlowTasks{i}"),
                threshold: 100 * i as u64,
            }) as Arc<dyn Rule<Durations>>,
        );
    }
    Analyzer::new(registry).with_field_limits(FieldLimits::default())
}

fn job() -> JobDescriptor {
    JobDescriptor::new(JobDescriptorConfig {
        engine_type: "spark".into(),
        application_id: "application_1700000000000_0001".to_string(),
        name: "x".repeat(300),
        user: "bench".to_string(),
        ..Default::default()
    })
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let job = job();
    let data = Durations((0..200).map(|i| i * 7 % 1000).collect());

    for rule_count in [1usize, 8, 32] {
        let analyzer = analyzer(rule_count);
        group.bench_with_input(BenchmarkId::from_parameter(rule_count), &rule_count, |b, _| {
            b.iter(|| analyzer.analyze(black_box(&job), black_box(&data)));
        });
    }
    group.finish();
}

fn bench_no_data(c: &mut Criterion) {
    let analyzer = analyzer(8);
    let job = job();
    let data = Durations(Vec::new());

    c.bench_function("analyze_no_data", |b| {
        b.iter(|| analyzer.analyze(black_box(&job), black_box(&data)));
    });
}

criterion_group!(benches, bench_analyze, bench_no_data);
criterion_main!(benches);
