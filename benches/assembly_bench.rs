//! Benchmarks for bridge generation and assembly

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bridge_fem::assembly::assemble_global_stiffness;
use bridge_fem::mesh::generate;
use bridge_fem::prelude::*;
use bridge_fem::stiffness::build_element_stiffness;

fn bench_generate(c: &mut Criterion) {
    let params = BridgeParams::default();
    c.bench_function("generate_reference_bridge", |b| {
        b.iter(|| generate(black_box(&params)).unwrap())
    });
}

fn bench_assembly(c: &mut Criterion) {
    let mut bridge = generate(&BridgeParams::default()).unwrap();
    bridge.mesh.finalize_elements().unwrap();

    let mut group = c.benchmark_group("assemble_reference_bridge");
    for options in [AssemblyOptions::bar(), AssemblyOptions::frame()] {
        let stiffness = build_element_stiffness(&bridge.mesh.elements, options.kind).unwrap();
        group.bench_function(format!("{:?}", options.kind), |b| {
            b.iter(|| assemble_global_stiffness(black_box(&bridge.mesh), &stiffness, &options).unwrap())
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let load = UniformDeckLoad::downward(1.0e5);
    c.bench_function("bridge_model_bar", |b| {
        b.iter(|| {
            BridgeModel::new(&load, black_box(BridgeParams::default()), &AssemblyOptions::bar())
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_generate, bench_assembly, bench_full_pipeline);
criterion_main!(benches);
