use std::collections::BTreeSet;

use super::{join, BadgeAssigner};
use crate::badges::catalog::{
    BadgeDescriptor, BIG_IN_JAPAN, GLOBAL_REACH, GLOBAL_SOUTH, PACIFIC_RIM,
};
use crate::badges::domain::{Badge, Person};
use crate::badges::BadgeError;
use crate::reference::ReferenceData;

const JAPAN: &str = "Japan";
const GLOBAL_REACH_MINIMUM: usize = 25;
const PACIFIC_RIM_MINIMUM: usize = 3;
const GLOBAL_SOUTH_SHARE: f64 = 0.25;

pub(crate) struct BigInJapan;

impl BadgeAssigner for BigInJapan {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &BIG_IN_JAPAN
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut assigned = false;
        for product in &person.products {
            if product.has_country(JAPAN) {
                assigned = true;
                candidate.add_product(product);
            }
        }
        Ok(assigned)
    }
}

pub(crate) struct GlobalReach;

impl BadgeAssigner for GlobalReach {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &GLOBAL_REACH
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        if person.countries.len() <= GLOBAL_REACH_MINIMUM {
            return Ok(false);
        }
        candidate.set_support(format!("Countries include: {}.", join(&person.countries)));
        Ok(true)
    }
}

/// At least three matched countries on each side of the Pacific.
pub(crate) struct PacificRim;

impl BadgeAssigner for PacificRim {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &PACIFIC_RIM
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut matched_countries: Vec<&str> = Vec::new();
        let west = collect_side(
            person,
            reference.pacific_rim_west(),
            candidate,
            &mut matched_countries,
        );
        let east = collect_side(
            person,
            reference.pacific_rim_east(),
            candidate,
            &mut matched_countries,
        );

        if west < PACIFIC_RIM_MINIMUM || east < PACIFIC_RIM_MINIMUM {
            return Ok(false);
        }

        candidate.set_support(format!(
            "Impact from these Pacific Rim countries: {}.",
            join(&matched_countries)
        ));
        Ok(true)
    }
}

fn collect_side<'p, 'r>(
    person: &'p Person,
    countries: &'r [String],
    candidate: &mut Badge<'p>,
    matched_countries: &mut Vec<&'r str>,
) -> usize {
    let mut matched = 0;
    for country in countries {
        let mut products = person
            .products
            .iter()
            .filter(|product| product.has_country(country))
            .peekable();
        if products.peek().is_some() {
            matched += 1;
            candidate.add_products(products);
            matched_countries.push(country);
        }
    }
    matched
}

/// More than a quarter of geolocated posts come from Global South countries.
///
/// Every ISO code must resolve through the country table; an unknown code
/// aborts the evaluation instead of being skipped.
pub(crate) struct GlobalSouth;

impl BadgeAssigner for GlobalSouth {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &GLOBAL_SOUTH
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let table = reference.countries();
        // f64 totals so very large post counts cannot overflow
        let mut total_geolocated = 0.0f64;
        let mut total_global_south = 0.0f64;
        let mut countries = BTreeSet::new();

        for product in &person.products {
            for (iso_code, count) in &product.post_counts_by_country {
                total_geolocated += *count as f64;
                let info = table
                    .name_from_iso(iso_code)
                    .and_then(|name| table.info(name))
                    .ok_or_else(|| BadgeError::MissingReferenceData {
                        iso_code: iso_code.clone(),
                    })?;
                if info.is_global_south {
                    total_global_south += *count as f64;
                    candidate.add_product(product);
                    countries.insert(info.name.as_str());
                }
            }
        }

        if total_geolocated == 0.0 {
            return Ok(false);
        }

        let share = total_global_south / total_geolocated;
        if share <= GLOBAL_SOUTH_SHARE {
            return Ok(false);
        }

        candidate.set_support(format!(
            "Impact from these Global South countries: {}.",
            join(&countries)
        ));
        Ok(true)
    }
}
