// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kennel_records::{AdoptionStatus, FilterCriteria, PetRecord, RecordStore, Species, filter};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const NAMES: &[&str] = &["Luna", "Mr. Whiskers", "Thumper", "Biscuit", "Pepper", "Maple"];
const BREEDS: &[&str] = &["Golden Retriever", "Persian", "Holland Lop", "Beagle", "Siamese"];
const WORDS: &[&str] = &["friendly", "calm", "curious", "playful", "gentle", "loves", "walks"];
const SHELTERS: &[&str] = &["Austin TX", "Seattle WA", "Portland OR", "Denver CO"];

fn gen_records(count: usize) -> Vec<PetRecord> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let description: Vec<&str> = (0..8).map(|_| *rng.pick(WORDS)).collect();
            PetRecord {
                id: i.to_string(),
                name: (*rng.pick(NAMES)).to_owned(),
                species: *rng.pick(&Species::ALL),
                age: (rng.next_u64() % 16) as u32,
                breed: (*rng.pick(BREEDS)).to_owned(),
                description: description.join(" "),
                image_reference: String::new(),
                shelter_location: (*rng.pick(SHELTERS)).to_owned(),
                adoption_status: *rng.pick(&AdoptionStatus::ALL),
            }
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let queries = [
        ("unrestricted", FilterCriteria::new()),
        ("species", FilterCriteria::new().with_species(Species::Cat)),
        ("text_hit", FilterCriteria::new().with_search_text("GENTLE")),
        ("text_miss", FilterCriteria::new().with_search_text("nonexistent")),
        (
            "combined",
            FilterCriteria::new()
                .with_search_text("walks")
                .with_species(Species::Dog)
                .with_status(AdoptionStatus::Available),
        ),
    ];
    for &n in &[100usize, 1_000, 10_000] {
        let records = gen_records(n);
        group.throughput(Throughput::Elements(n as u64));
        for (name, criteria) in &queries {
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter(|| black_box(filter(black_box(&records), criteria).len()));
            });
        }
    }
    group.finish();
}

fn bench_store_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_select");
    for &n in &[1_000usize, 10_000] {
        let store = match RecordStore::new(gen_records(n)) {
            Ok(store) => store,
            Err(err) => panic!("generated ids are unique: {err}"),
        };
        let criteria = FilterCriteria::new().with_search_text("lop");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("select_n{n}"), |b| {
            b.iter(|| black_box(store.select(&criteria).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_store_select);
criterion_main!(benches);
