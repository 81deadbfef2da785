use criterion::criterion_main;

// ---------------------------------------------------------------------------------------------

mod benchmarks;

// ---------------------------------------------------------------------------------------------

criterion_main!(
    benchmarks::compile::compile, //
    benchmarks::quantize::quantize,
);
