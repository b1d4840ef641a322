use std::collections::BTreeSet;

use super::{join, BadgeAssigner};
use crate::badges::catalog::{BadgeDescriptor, UNICORN};
use crate::badges::domain::{Badge, Person};
use crate::badges::BadgeError;
use crate::reference::ReferenceData;

const WIKIPEDIA: &str = "wikipedia";

/// An F1000 reviewer tagged at least one product with `class`.
pub(crate) struct F1000Class {
    descriptor: &'static BadgeDescriptor,
    class: &'static str,
}

impl F1000Class {
    pub(crate) const fn new(descriptor: &'static BadgeDescriptor, class: &'static str) -> Self {
        Self { descriptor, class }
    }
}

impl BadgeAssigner for F1000Class {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        self.descriptor
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut urls = Vec::new();
        for product in &person.products {
            let review_urls = product.f1000_urls_for_class(self.class);
            if !review_urls.is_empty() {
                candidate.add_product(product);
                urls.extend(review_urls);
            }
        }

        if urls.is_empty() {
            return Ok(false);
        }
        candidate.set_support(format!("The F1000 reviews include: {}.", join(&urls)));
        Ok(true)
    }
}

/// Wikipedia mentions across all products reach `minimum`.
pub(crate) struct WikipediaMentions {
    descriptor: &'static BadgeDescriptor,
    minimum: u64,
}

impl WikipediaMentions {
    pub(crate) const fn new(descriptor: &'static BadgeDescriptor, minimum: u64) -> Self {
        Self {
            descriptor,
            minimum,
        }
    }
}

impl BadgeAssigner for WikipediaMentions {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        self.descriptor
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        if person.post_counts_by_source(WIKIPEDIA) < self.minimum {
            return Ok(false);
        }

        candidate.add_products(
            person
                .products
                .iter()
                .filter(|product| product.has_source(WIKIPEDIA)),
        );
        let titles: BTreeSet<&str> = person.wikipedia_urls.iter().map(String::as_str).collect();
        candidate.set_support(format!("Wikipedia titles include: {}.", join(&titles)));
        Ok(true)
    }
}

/// Posts on a channel few researchers ever reach.
pub(crate) struct Unicorn;

impl BadgeAssigner for Unicorn {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &UNICORN
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut sources = BTreeSet::new();
        for product in &person.products {
            for (source, count) in &product.post_counts_by_source {
                if *count > 0 && reference.is_rare_source(source) {
                    candidate.add_product(product);
                    sources.insert(source.as_str());
                }
            }
        }

        if sources.is_empty() {
            return Ok(false);
        }
        candidate.set_support(format!("Your rare sources include: {}", join(&sources)));
        Ok(true)
    }
}

/// Impact on at least `minimum` distinct channels.
pub(crate) struct ChannelCount {
    descriptor: &'static BadgeDescriptor,
    minimum: usize,
}

impl ChannelCount {
    pub(crate) const fn new(descriptor: &'static BadgeDescriptor, minimum: usize) -> Self {
        Self {
            descriptor,
            minimum,
        }
    }
}

impl BadgeAssigner for ChannelCount {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        self.descriptor
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        _candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        Ok(person.num_sources >= self.minimum)
    }
}
