use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use plugpoint_flow::{ContextData, FlowError, FlowRegistry, Handler, Pipeline, PipelineControl, SkipCondition};
use tokio::runtime::Runtime;

#[derive(Debug, Default)]
struct CartTally {
  lines: u64,
  total_cents: u64,
}

fn add_line_handler(price_cents: u64) -> Handler<CartTally, FlowError> {
  Box::new(move |ctx: ContextData<CartTally>| {
    Box::pin(async move {
      let mut tally = ctx.write();
      tally.lines += 1;
      tally.total_cents += price_cents;
      Ok(PipelineControl::Continue)
    })
  })
}

fn build_pipeline(num_steps: usize) -> Pipeline<CartTally, FlowError> {
  let names: Vec<String> = (0..num_steps).map(|i| format!("line_{i}")).collect();
  let defs: Vec<(&str, bool, Option<SkipCondition<CartTally>>)> =
    names.iter().map(|n| (n.as_str(), false, None)).collect();
  let mut pipeline = Pipeline::new("bench", &defs);
  for name in &names {
    pipeline.on_root(name, add_line_handler(499));
  }
  pipeline
}

fn bench_direct_run(c: &mut Criterion) {
  let mut group = c.benchmark_group("pipeline_run");
  let rt = Runtime::new().expect("tokio runtime");

  for num_steps in [1usize, 5, 20] {
    let pipeline = build_pipeline(num_steps);
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter(|| async {
        let ctx = ContextData::new(CartTally::default());
        pipeline.run(ctx).await.expect("bench pipeline run")
      });
    });
  }
  group.finish();
}

fn bench_registry_dispatch(c: &mut Criterion) {
  let rt = Runtime::new().expect("tokio runtime");
  let registry = FlowRegistry::<FlowError>::new();
  registry.register_pipeline(build_pipeline(5));

  c.bench_function("registry_dispatch_5_steps", |b| {
    b.to_async(&rt).iter(|| async {
      let ctx = ContextData::new(CartTally::default());
      registry.run(ctx).await.expect("bench registry run")
    });
  });
}

criterion_group!(benches, bench_direct_run, bench_registry_dispatch);
criterion_main!(benches);
