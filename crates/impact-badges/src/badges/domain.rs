use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::catalog::{BadgeDescriptor, BadgeLevel};
use super::BadgeError;
use crate::metrics::merge_sum;

/// Identifier wrapper for researchers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub String);

/// Identifier wrapper for research products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// One F1000 review of a product with the reviewer's classification tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct F1000Review {
    pub url: String,
    #[serde(default)]
    pub classes: BTreeSet<String>,
}

/// Impact snapshot of a single research artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub altmetric_score: f64,
    pub year: i32,
    #[serde(default)]
    pub countries: BTreeSet<String>,
    #[serde(default)]
    pub post_counts_by_country: BTreeMap<String, u64>,
    #[serde(default)]
    pub poster_counts_by_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub twitter_posters_with_followers: BTreeMap<String, u64>,
    #[serde(default)]
    pub impact_urls: BTreeSet<String>,
    #[serde(default)]
    pub post_counts_by_source: BTreeMap<String, u64>,
    #[serde(default)]
    pub wikipedia_urls: BTreeSet<String>,
    #[serde(default)]
    pub f1000_reviews: Vec<F1000Review>,
}

impl Product {
    pub fn new(id: impl Into<String>, altmetric_score: f64, year: i32) -> Self {
        Self {
            id: ProductId(id.into()),
            title: None,
            altmetric_score,
            year,
            countries: BTreeSet::new(),
            post_counts_by_country: BTreeMap::new(),
            poster_counts_by_type: BTreeMap::new(),
            twitter_posters_with_followers: BTreeMap::new(),
            impact_urls: BTreeSet::new(),
            post_counts_by_source: BTreeMap::new(),
            wikipedia_urls: BTreeSet::new(),
            f1000_reviews: Vec::new(),
        }
    }

    pub fn has_country(&self, name: &str) -> bool {
        self.countries.contains(name)
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.post_counts_by_source
            .get(source)
            .is_some_and(|count| *count > 0)
    }

    /// Review URLs whose reviewer tagged the product with `class`.
    pub fn f1000_urls_for_class(&self, class: &str) -> Vec<&str> {
        self.f1000_reviews
            .iter()
            .filter(|review| review.classes.contains(class))
            .map(|review| review.url.as_str())
            .collect()
    }

    /// Follower reach of every tweeter who posted about the product, saturating at `u64::MAX`.
    pub fn impressions(&self) -> u64 {
        self.twitter_posters_with_followers
            .values()
            .fold(0u64, |total, followers| total.saturating_add(*followers))
    }

    fn metric_tree(&self) -> Map<String, Value> {
        let tree = json!({
            "altmetric_score": self.altmetric_score,
            "impressions": self.impressions(),
            "post_counts": self.post_counts_by_source,
        });
        match tree {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Researcher aggregate consumed by the badge engine.
///
/// The aggregate fields are expected to agree with `products`; the engine
/// reads them as given and never recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub products: Vec<Product>,
    pub countries: BTreeSet<String>,
    pub num_sources: usize,
    pub impressions: u64,
    pub altmetric_score: f64,
    pub wikipedia_urls: Vec<String>,
    pub post_counts: BTreeMap<String, u64>,
}

impl Person {
    /// Derive every aggregate field from the products.
    pub fn aggregate(id: impl Into<String>, products: Vec<Product>) -> Self {
        let mut rollup = Map::new();
        for product in &products {
            merge_sum(&mut rollup, &product.metric_tree());
        }

        let post_counts: BTreeMap<String, u64> = rollup
            .get("post_counts")
            .and_then(Value::as_object)
            .map(|counts| {
                counts
                    .iter()
                    .map(|(source, count)| (source.clone(), rollup_count(count)))
                    .collect()
            })
            .unwrap_or_default();

        let countries = products
            .iter()
            .flat_map(|product| product.countries.iter().cloned())
            .collect();
        let wikipedia_urls = products
            .iter()
            .flat_map(|product| product.wikipedia_urls.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            id: PersonId(id.into()),
            countries,
            num_sources: post_counts.values().filter(|count| **count > 0).count(),
            impressions: rollup.get("impressions").map(rollup_count).unwrap_or(0),
            altmetric_score: rollup
                .get("altmetric_score")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            wikipedia_urls,
            post_counts,
            products,
        }
    }

    pub fn post_counts_by_source(&self, source: &str) -> u64 {
        self.post_counts.get(source).copied().unwrap_or(0)
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.post_counts_by_source(source) > 0
    }

    /// Reject aggregates the engine cannot evaluate meaningfully.
    pub fn validate(&self) -> Result<(), BadgeError> {
        if self.id.0.trim().is_empty() {
            return Err(invalid("person id is empty"));
        }
        check_score("person", &self.id.0, self.altmetric_score)?;

        let mut seen = BTreeSet::new();
        for product in &self.products {
            if product.id.0.trim().is_empty() {
                return Err(invalid("product id is empty"));
            }
            if !seen.insert(product.id.0.as_str()) {
                return Err(invalid(format!("duplicate product id '{}'", product.id.0)));
            }
            check_score("product", &product.id.0, product.altmetric_score)?;
        }

        Ok(())
    }
}

/// Summed counts past `i64::MAX` come back from `merge_sum` as floats.
fn rollup_count(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|count| count as u64))
        .unwrap_or(0)
}

fn check_score(kind: &str, id: &str, score: f64) -> Result<(), BadgeError> {
    if !score.is_finite() || score < 0.0 {
        return Err(invalid(format!(
            "{kind} '{id}' has invalid altmetric score {score}"
        )));
    }
    Ok(())
}

fn invalid(reason: impl Into<String>) -> BadgeError {
    BadgeError::InvalidInput {
        reason: reason.into(),
    }
}

/// A badge under consideration or awarded during one evaluation.
///
/// Products are borrowed from the evaluated person and kept in first-seen
/// order without duplicates.
#[derive(Debug, Clone)]
pub struct Badge<'p> {
    descriptor: &'static BadgeDescriptor,
    support: Option<String>,
    products: Vec<&'p Product>,
}

impl<'p> Badge<'p> {
    pub fn new(descriptor: &'static BadgeDescriptor) -> Self {
        Self {
            descriptor,
            support: None,
            products: Vec::new(),
        }
    }

    pub fn add_product(&mut self, product: &'p Product) {
        if !self
            .products
            .iter()
            .any(|existing| std::ptr::eq(*existing, product))
        {
            self.products.push(product);
        }
    }

    pub fn add_products<I>(&mut self, products: I)
    where
        I: IntoIterator<Item = &'p Product>,
    {
        for product in products {
            self.add_product(product);
        }
    }

    pub fn set_support(&mut self, support: impl Into<String>) {
        self.support = Some(support.into());
    }

    pub fn descriptor(&self) -> &'static BadgeDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn level(&self) -> BadgeLevel {
        self.descriptor.level
    }

    pub fn group(&self) -> &'static str {
        self.descriptor.group
    }

    pub fn support(&self) -> Option<&str> {
        self.support.as_deref()
    }

    pub fn products(&self) -> &[&'p Product] {
        &self.products
    }

    pub fn view(&self) -> BadgeView {
        BadgeView {
            name: self.descriptor.name.to_string(),
            display_name: self.descriptor.display_name.to_string(),
            level: self.descriptor.level,
            group: self.descriptor.group.to_string(),
            support: self.support.clone(),
            product_ids: self.descriptor.is_for_products.then(|| {
                self.products
                    .iter()
                    .map(|product| product.id.clone())
                    .collect()
            }),
        }
    }
}

/// Transport view of an awarded badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeView {
    pub name: String,
    pub display_name: String,
    pub level: BadgeLevel,
    pub group: String,
    pub support: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<ProductId>>,
}
