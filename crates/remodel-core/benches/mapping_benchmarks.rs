//! Benchmarks for plan execution and synthesized mappers
//!
//! Copyright (c) 2025 Remodel Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use remodel_core::{
    dict_mapper_for, dict_schema_for, identity, make_constructor_for, make_projection_for,
    make_rotation, Field, Mapper, Plan, Record, Schema, DEFAULT_SEPARATOR,
};
use serde_json::{json, Value};

fn address() -> Schema {
    Schema::new("Address").scalar("street").scalar("city").scalar("zip")
}

fn person() -> Schema {
    Schema::new("Person")
        .scalar("name")
        .scalar("id")
        .field(Field::model("address", address))
        .field(Field::list("previous", address).optional())
}

fn create_person(previous: usize) -> Value {
    let history: Vec<Value> = (0..previous)
        .map(|i| json!({"street": format!("{} Side St", i), "city": "Oslo", "zip": i}))
        .collect();
    json!({
        "name": "Ada",
        "id": 1,
        "address": {"street": "Main", "city": "Paris", "zip": "75001"},
        "previous": history
    })
}

fn bench_explicit_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("explicit_plan");
    let source = create_person(0);

    let flatten = Mapper::<Record>::new(
        Plan::new()
            .add("name", make_rotation("full_name"))
            .add("id", identity())
            .add("address", make_projection_for(address(), DEFAULT_SEPARATOR)),
    )
    .unwrap();
    group.bench_function("flatten", |b| b.iter(|| flatten.map(black_box(&source)).unwrap()));

    let flat = flatten.map(&source).unwrap();
    let rebuild = Mapper::<Record>::new(Plan::new().add(
        ["address_street", "address_city", "address_zip"],
        make_constructor_for(address(), "address", DEFAULT_SEPARATOR),
    ))
    .unwrap();
    group.bench_function("rebuild", |b| b.iter(|| rebuild.map(black_box(&flat)).unwrap()));

    group.finish();
}

fn bench_dict_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("dict_mapper");
    let mapper = dict_mapper_for(&person()).unwrap();

    for previous in [0usize, 10, 100] {
        let source = create_person(previous);
        group.bench_with_input(BenchmarkId::new("to_record", previous), &source, |b, source| {
            b.iter(|| mapper.map(black_box(source)).unwrap())
        });
    }

    group.finish();
}

fn bench_dict_schema(c: &mut Criterion) {
    let mut group = c.benchmark_group("dict_schema");
    let mapper = dict_schema_for(address()).unwrap();
    let source = json!({"street": "Main", "city": "Paris", "zip": "75001", "extra": true});

    group.bench_function("from_record", |b| b.iter(|| mapper.map(black_box(&source)).unwrap()));
    group.bench_function("build", |b| b.iter(|| dict_schema_for(black_box(address())).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_explicit_plan, bench_dict_mapper, bench_dict_schema);
criterion_main!(benches);
