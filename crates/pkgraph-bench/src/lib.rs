//! Benchmarks for dependency graph analysis live under `benches/`.
