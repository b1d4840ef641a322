use std::sync::{Arc, OnceLock};

use crate::badges::domain::{Badge, Person, Product};
use crate::badges::BadgeRunner;
use crate::reference::ReferenceData;

pub(super) fn reference() -> Arc<ReferenceData> {
    static REFERENCE: OnceLock<Arc<ReferenceData>> = OnceLock::new();
    REFERENCE
        .get_or_init(|| Arc::new(ReferenceData::standard().expect("embedded table loads")))
        .clone()
}

pub(super) fn runner() -> BadgeRunner {
    BadgeRunner::standard(reference())
}

pub(super) fn product(id: &str, score: f64, year: i32) -> Product {
    Product::new(id, score, year)
}

pub(super) fn with_countries(mut product: Product, countries: &[&str]) -> Product {
    product
        .countries
        .extend(countries.iter().map(|country| country.to_string()));
    product
}

pub(super) fn with_sources(mut product: Product, sources: &[(&str, u64)]) -> Product {
    for (source, count) in sources {
        product
            .post_counts_by_source
            .insert(source.to_string(), *count);
    }
    product
}

pub(super) fn with_tweeters(mut product: Product, tweeters: &[(&str, u64)]) -> Product {
    for (handle, followers) in tweeters {
        product
            .twitter_posters_with_followers
            .insert(handle.to_string(), *followers);
    }
    product
}

pub(super) fn person(products: Vec<Product>) -> Person {
    Person::aggregate("0000-0002-1825-0097", products)
}

pub(super) fn awarded_names(person: &Person) -> Vec<&'static str> {
    runner()
        .evaluate(person)
        .expect("evaluation succeeds")
        .iter()
        .map(Badge::name)
        .collect()
}

pub(super) fn has_badge(person: &Person, name: &str) -> bool {
    awarded_names(person).contains(&name)
}

pub(super) fn find_badge<'p>(badges: &[Badge<'p>], name: &str) -> Badge<'p> {
    badges
        .iter()
        .find(|badge| badge.name() == name)
        .cloned()
        .unwrap_or_else(|| panic!("expected badge {name}"))
}
