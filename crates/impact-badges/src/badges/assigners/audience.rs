use std::collections::{BTreeMap, BTreeSet};

use super::{join, BadgeAssigner};
use crate::badges::catalog::{BadgeDescriptor, BFF, MEGAFAN};
use crate::badges::domain::{Badge, Person};
use crate::badges::BadgeError;
use crate::metrics::conversational_number;
use crate::reference::ReferenceData;

const MEGAFAN_FOLLOWERS: u64 = 50_000;
const BFF_MINIMUM_PRODUCTS: usize = 3;

/// Share of all typed posters belonging to `poster_type`, or 0 without posters.
pub(crate) fn poster_type_proportion(person: &Person, poster_type: &str) -> f64 {
    let mut total_posters = 0.0f64;
    let mut matching_posters = 0.0f64;
    for product in &person.products {
        for (kind, count) in &product.poster_counts_by_type {
            total_posters += *count as f64;
            if kind == poster_type {
                matching_posters += *count as f64;
            }
        }
    }

    if total_posters == 0.0 {
        return 0.0;
    }
    matching_posters / total_posters
}

/// Posters of one category make up more than `share` of all typed posters.
pub(crate) struct PosterShare {
    descriptor: &'static BadgeDescriptor,
    poster_type: &'static str,
    share: f64,
}

impl PosterShare {
    pub(crate) const fn new(
        descriptor: &'static BadgeDescriptor,
        poster_type: &'static str,
        share: f64,
    ) -> Self {
        Self {
            descriptor,
            poster_type,
            share,
        }
    }
}

impl BadgeAssigner for PosterShare {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        self.descriptor
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        _candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        Ok(poster_type_proportion(person, self.poster_type) > self.share)
    }
}

/// A tweeter with a large following posted about one of the products.
pub(crate) struct Megafan;

impl BadgeAssigner for Megafan {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &MEGAFAN
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut fans = BTreeSet::new();
        for product in &person.products {
            for (fan, followers) in &product.twitter_posters_with_followers {
                if *followers >= MEGAFAN_FOLLOWERS {
                    candidate.add_product(product);
                    fans.insert(fan.as_str());
                }
            }
        }

        if fans.is_empty() {
            return Ok(false);
        }
        candidate.set_support(format!("Megafans include: {}", join(&fans)));
        Ok(true)
    }
}

/// The same handle tweeted at least three different products.
pub(crate) struct Bff;

impl BadgeAssigner for Bff {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &BFF
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut fan_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for product in &person.products {
            for fan in product.twitter_posters_with_followers.keys() {
                *fan_counts.entry(fan.as_str()).or_default() += 1;
            }
        }

        let bffs: Vec<String> = fan_counts
            .into_iter()
            .filter(|(_, tweeted_products)| *tweeted_products >= BFF_MINIMUM_PRODUCTS)
            .map(|(fan, _)| format!("@{fan}"))
            .collect();

        if bffs.is_empty() {
            return Ok(false);
        }
        candidate.set_support(format!("BFFs include: {}", join(&bffs)));
        Ok(true)
    }
}

/// Aggregate twitter impressions reach at least `minimum`.
pub(crate) struct ImpressionsAtLeast {
    descriptor: &'static BadgeDescriptor,
    minimum: u64,
}

impl ImpressionsAtLeast {
    pub(crate) const fn new(descriptor: &'static BadgeDescriptor, minimum: u64) -> Self {
        Self {
            descriptor,
            minimum,
        }
    }
}

impl BadgeAssigner for ImpressionsAtLeast {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        self.descriptor
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        if person.impressions < self.minimum {
            return Ok(false);
        }
        candidate.set_support(format!(
            "Your research has made about {} twitter impressions.",
            conversational_number(person.impressions as f64)
        ));
        Ok(true)
    }
}
