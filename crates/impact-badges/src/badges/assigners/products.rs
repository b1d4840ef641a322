use super::{join, BadgeAssigner};
use crate::badges::catalog::{
    BadgeDescriptor, CLEAN_SWEEP, ONE_HIT_WONDER, THIRD_TIME_CHARM, URL_SOUP,
};
use crate::badges::domain::{Badge, Person};
use crate::badges::BadgeError;
use crate::reference::ReferenceData;

const ONE_HIT_SHARE: f64 = 0.75;
const THIRD_TIME_MINIMUM: usize = 3;
const CLEAN_SWEEP_AFTER_YEAR: i32 = 2011;
const URL_SOUP_MINIMUM: usize = 20;

/// One product carries more than three quarters of the person's score.
pub(crate) struct OneHitWonder;

impl BadgeAssigner for OneHitWonder {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &ONE_HIT_WONDER
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let cutoff = ONE_HIT_SHARE * person.altmetric_score;
        let mut assigned = false;
        for product in &person.products {
            if product.altmetric_score > cutoff {
                assigned = true;
                candidate.add_product(product);
            }
        }
        Ok(assigned)
    }
}

/// Any product scoring strictly above `floor`.
pub(crate) struct ProductScoreAbove {
    descriptor: &'static BadgeDescriptor,
    floor: f64,
}

impl ProductScoreAbove {
    pub(crate) const fn new(descriptor: &'static BadgeDescriptor, floor: f64) -> Self {
        Self { descriptor, floor }
    }
}

impl BadgeAssigner for ProductScoreAbove {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        self.descriptor
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut assigned = false;
        for product in &person.products {
            if product.altmetric_score > self.floor {
                assigned = true;
                candidate.add_product(product);
            }
        }
        Ok(assigned)
    }
}

pub(crate) struct ThirdTimeCharm;

impl BadgeAssigner for ThirdTimeCharm {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &THIRD_TIME_CHARM
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut with_impact = 0;
        for product in &person.products {
            if product.altmetric_score > 0.0 {
                with_impact += 1;
                candidate.add_product(product);
            }
        }
        Ok(with_impact >= THIRD_TIME_MINIMUM)
    }
}

/// Every product published after 2011 has some impact.
///
/// A person with no products after 2011 does not receive the badge.
pub(crate) struct CleanSweep;

impl BadgeAssigner for CleanSweep {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &CLEAN_SWEEP
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut applicable = 0;
        let mut with_impact = 0;
        for product in &person.products {
            if product.year > CLEAN_SWEEP_AFTER_YEAR {
                applicable += 1;
                if product.altmetric_score > 0.0 {
                    with_impact += 1;
                    candidate.add_product(product);
                }
            }
        }
        Ok(applicable > 0 && with_impact >= applicable)
    }
}

pub(crate) struct UrlSoup;

impl BadgeAssigner for UrlSoup {
    fn descriptor(&self) -> &'static BadgeDescriptor {
        &URL_SOUP
    }

    fn decide<'p>(
        &self,
        person: &'p Person,
        _reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError> {
        let mut assigned = false;
        for product in &person.products {
            if product.impact_urls.len() > URL_SOUP_MINIMUM {
                assigned = true;
                candidate.add_product(product);
                // evidence describes the last qualifying product
                candidate.set_support(format!(
                    "URLs for one of the products include: {}",
                    join(&product.impact_urls)
                ));
            }
        }
        Ok(assigned)
    }
}
