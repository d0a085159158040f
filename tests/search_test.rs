mod common;

use assert2::{check, let_assert};
use common::{fixture_buckets, fixture_store, scenario_store};
use docsym::{EmptyQueryError, IndexStore, SymbolEntry, SymbolKind, normalize, resolve};
use rstest::rstest;
use std::collections::HashMap;

fn urls(results: &[&SymbolEntry]) -> Vec<String> {
    results.iter().map(|e| e.target_url.clone()).collect()
}

// --- Lookup scenario ---

#[rstest]
fn scenario_exact_name_keeps_collisions_in_order(scenario_store: IndexStore) {
    let results = resolve("date", &scenario_store).unwrap();
    check!(urls(&results) == vec!["A.html", "A.html#B"]);
    check!(results[0].kind == SymbolKind::Type);
    check!(results[1].kind == SymbolKind::Member);
}

#[rstest]
fn scenario_single_letter_sorted_by_name(scenario_store: IndexStore) {
    let results = resolve("d", &scenario_store).unwrap();
    check!(urls(&results) == vec!["A.html", "A.html#B", "math.html#C", "pore.html#D"]);
}

#[rstest]
fn scenario_empty_query_rejected(scenario_store: IndexStore) {
    let_assert!(Err(EmptyQueryError) = resolve("", &scenario_store));
}

#[rstest]
fn scenario_unknown_prefix_is_empty(scenario_store: IndexStore) {
    check!(resolve("zzz", &scenario_store).unwrap().is_empty());
}

// --- Properties over the generator fixture ---

/// Every entry lives in the bucket its key partitions to.
#[rstest]
fn partitioning_is_complete(fixture_store: IndexStore) {
    let partition = fixture_store.partition();
    for entry in fixture_store.entries() {
        let bucket = fixture_store
            .bucket_for(partition.bucket_key(&entry.normalized_key))
            .expect("entry bucket exists");
        check!(bucket.entries().contains(entry));
    }
}

#[rstest]
#[case("d")]
#[case("D")]
#[case("dist")]
#[case("distance_")]
#[case("date")]
#[case("dxdt")]
#[case("c")]
#[case("deprecated l")]
#[case("q")]
fn resolve_is_sound_and_complete(fixture_store: IndexStore, #[case] query: &str) {
    let key = normalize(query);
    let results = resolve(query, &fixture_store).unwrap();

    // Soundness
    for entry in &results {
        check!(entry.normalized_key.starts_with(&key));
    }

    // Completeness
    let expected = fixture_store
        .entries()
        .filter(|e| e.normalized_key.starts_with(&key))
        .count();
    check!(results.len() == expected);

    // Ordering
    check!(
        results
            .windows(2)
            .all(|pair| pair[0].normalized_key <= pair[1].normalized_key)
    );
}

#[rstest]
#[case("d")]
#[case("di")]
#[case("dxdt")]
fn resolve_is_idempotent(fixture_store: IndexStore, #[case] query: &str) {
    check!(resolve(query, &fixture_store).unwrap() == resolve(query, &fixture_store).unwrap());
}

#[rstest]
fn collided_names_follow_generation_order(fixture_store: IndexStore) {
    // Class page first, then the two constructor overloads
    let results = resolve("Date", &fixture_store).unwrap();
    let scopes: Vec<_> = results.iter().map(|e| e.scope_label.as_str()).collect();
    check!(
        scopes
            == vec![
                "Date",
                "cmf::math::Date::Date(int _day, int _month, int _year, int _hour=0, int _minute=0, int _second=0, int _ms=0)",
                "cmf::math::Date::Date(const Time &time)",
            ]
    );

    let dxdt = resolve("dxdt", &fixture_store).unwrap();
    check!(dxdt.len() == 4);
    check!(dxdt[3].scope_label == "cmf.jacobian.Jacobian.dxdt()");
}

#[rstest]
#[case("distance_", &["distance_max", "distance_to_cell"])]
#[case("deprecated ", &["Deprecated List"])]
#[case("distance3", &["distance3DTo"])]
#[case("cm", &["cmf"])]
fn escaped_characters_match(
    fixture_store: IndexStore,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    let names: Vec<_> = resolve(query, &fixture_store)
        .unwrap()
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    check!(names == expected);
}

#[rstest]
fn kinds_are_inferred(fixture_store: IndexStore) {
    let kind_of = |query: &str| resolve(query, &fixture_store).unwrap()[0].kind;
    check!(kind_of("darcy") == SymbolKind::Type);
    check!(kind_of("density") == SymbolKind::Member);
    check!(kind_of("deprecated") == SymbolKind::Page);
    check!(kind_of("cmf") == SymbolKind::Namespace);
}

// --- Lossless load ---

#[rstest]
fn enumeration_reproduces_input(fixture_store: IndexStore) {
    // Multiset of (name, scope, url) from the raw records
    let mut expected: HashMap<(String, String, String), usize> = HashMap::new();
    for bucket in fixture_buckets() {
        for record in bucket.records {
            for target in record.targets {
                *expected
                    .entry((record.display_name.clone(), target.scope, target.url))
                    .or_default() += 1;
            }
        }
    }

    let mut actual: HashMap<(String, String, String), usize> = HashMap::new();
    for key in fixture_store.all_bucket_keys() {
        for entry in fixture_store.entries_in(key) {
            *actual
                .entry((
                    entry.display_name.clone(),
                    entry.scope_label.clone(),
                    entry.target_url.clone(),
                ))
                .or_default() += 1;
        }
    }

    check!(actual == expected);
    check!(fixture_store.len() == 37);
    check!(fixture_store.bucket_count() == 2);
}

#[rstest]
fn bucket_preserves_generation_order(fixture_store: IndexStore) {
    let names: Vec<_> = fixture_store
        .entries_in("c")
        .iter()
        .map(|e| e.display_name.as_str())
        .collect();
    check!(names == vec!["Cell", "cmf", "CrossSectionReach"]);
}
