//! Benchmarks for JDL conversion

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jdl_core::config::{ConversionConfig, DefaultApplication};
use jdl_core::convert::convert_jdl;
use jdl_core::import::parsed::{
    ParsedEntity, ParsedEntityList, ParsedField, ParsedJdl, ParsedOptionValue, ParsedOptionValues,
    ParsedOptions, ParsedRelationship, ParsedRelationshipSide, ParsedValidation,
};
use jdl_core::models::Cardinality;

fn bench_config() -> ConversionConfig {
    ConversionConfig::builder()
        .creation_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .default_application(DefaultApplication::new("bench"))
        .build()
}

/// Generate a model with a chain of one-to-many relationships
fn generate_jdl(entity_count: usize) -> ParsedJdl {
    let mut parsed = ParsedJdl::new();

    let entities = (0..entity_count)
        .map(|i| {
            let mut entity = ParsedEntity::new(format!("Entity{i}"));
            let mut name = ParsedField::new("name", "String");
            name.validations.push(ParsedValidation::flag("required"));
            name.validations
                .push(ParsedValidation::with_value("maxlength", 255));
            entity.body.push(name);
            entity.body.push(ParsedField::new("amount", "BigDecimal"));
            entity.body.push(ParsedField::new("createdAt", "Instant"));
            entity
        })
        .collect();
    parsed.entities = Some(entities);

    let relationships = (1..entity_count)
        .map(|i| {
            ParsedRelationship::new(
                Cardinality::OneToMany,
                ParsedRelationshipSide::new(format!("Entity{}", i - 1))
                    .injected(format!("child{i}")),
                ParsedRelationshipSide::new(format!("Entity{i}")),
            )
        })
        .collect();
    parsed.relationships = Some(relationships);

    let mut dto = ParsedOptionValues::new();
    dto.insert("mapstruct".to_string(), ParsedEntityList::of(&["*"]));
    let mut options = ParsedOptions::new();
    options.insert("dto".to_string(), ParsedOptionValue::Binary(dto));
    options.insert(
        "readOnly".to_string(),
        ParsedOptionValue::Unary(ParsedEntityList::of(&["Entity0"])),
    );
    parsed.options = Some(options);

    parsed
}

/// Benchmark the full pipeline
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("jdl_conversion");
    let config = bench_config();

    for entity_count in [10, 50, 100, 200].iter() {
        let parsed = generate_jdl(*entity_count);
        group.throughput(Throughput::Elements(*entity_count as u64));

        group.bench_with_input(
            BenchmarkId::new("convert_entities", entity_count),
            &parsed,
            |b, parsed| {
                b.iter(|| black_box(convert_jdl(parsed, &config)));
            },
        );
    }

    group.finish();
}

/// Benchmark serializing the export
fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_serialization");
    let config = bench_config();

    for entity_count in [10, 100].iter() {
        let export = convert_jdl(&generate_jdl(*entity_count), &config).unwrap();
        group.throughput(Throughput::Elements(*entity_count as u64));

        group.bench_with_input(
            BenchmarkId::new("to_json_pretty", entity_count),
            &export,
            |b, export| {
                b.iter(|| black_box(export.to_json_pretty()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_conversion, bench_serialization);
criterion_main!(benches);
