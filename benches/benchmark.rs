use criterion::{black_box, criterion_group, criterion_main, Criterion};

use datacompat::person::PersonBuilder;
use datacompat::processor::Processor;
use datacompat::settings::Settings;

const PERSON_DATA: &str = include_str!("../demos/person_data.rs");

fn build_person(c: &mut Criterion) {
    c.bench_function("build person", |b| {
        b.iter(|| {
            PersonBuilder::new(black_box("Extra info"))
                .set_age(black_box(31))
                .set_name(black_box("Tobrun Van Nuland"))
                .set_nickname(black_box("Nurbot"))
                .build()
        })
    });
}

fn generate_person(c: &mut Criterion) {
    let processor = Processor::new(Settings::default());
    c.bench_function("generate person", |b| {
        b.iter(|| processor.process_source(black_box(PERSON_DATA)).map(|outcome| outcome.generated.len()))
    });
}

criterion_group!(benches, build_person, generate_person);
criterion_main!(benches);
