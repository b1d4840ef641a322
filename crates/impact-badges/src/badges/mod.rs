//! Badge assignment engine: researcher aggregate in, ordered badge list out.

mod assigners;
pub mod catalog;
pub mod domain;
pub mod report;
pub mod router;

#[cfg(test)]
mod tests;

pub use catalog::{BadgeCatalog, BadgeDescriptor, BadgeLevel};
pub use domain::{Badge, BadgeView, F1000Review, Person, PersonId, Product, ProductId};
pub use report::EvaluationReport;
pub use router::{badge_router, EvaluationRequest, PersonPayload};

use crate::reference::ReferenceData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Failure of a whole evaluation run. No partial badge list accompanies it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BadgeError {
    #[error("no country reference entry for ISO code '{iso_code}'")]
    MissingReferenceData { iso_code: String },
    #[error("invalid researcher aggregate: {reason}")]
    InvalidInput { reason: String },
}

/// Runs every catalog rule against one researcher.
///
/// Holds no per-evaluation state, so one runner can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct BadgeRunner {
    catalog: Arc<BadgeCatalog>,
    reference: Arc<ReferenceData>,
}

impl BadgeRunner {
    pub fn new(catalog: BadgeCatalog, reference: Arc<ReferenceData>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            reference,
        }
    }

    pub fn standard(reference: Arc<ReferenceData>) -> Self {
        Self::new(BadgeCatalog::standard(), reference)
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Awarded badges in catalog order.
    pub fn evaluate<'p>(&self, person: &'p Person) -> Result<Vec<Badge<'p>>, BadgeError> {
        if let Err(err) = person.validate() {
            warn!(person = %person.id.0, %err, "rejected researcher aggregate");
            return Err(err);
        }

        let mut awarded = Vec::new();
        for assigner in self.catalog.assigners() {
            let mut candidate = Badge::new(assigner.descriptor());
            match assigner.decide(person, &self.reference, &mut candidate) {
                Ok(true) => awarded.push(candidate),
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        person = %person.id.0,
                        badge = assigner.descriptor().name,
                        %err,
                        "badge evaluation aborted"
                    );
                    return Err(err);
                }
            }
        }

        debug!(
            person = %person.id.0,
            products = person.products.len(),
            awarded = awarded.len(),
            "badge evaluation complete"
        );
        Ok(awarded)
    }

    pub fn evaluate_views(&self, person: &Person) -> Result<Vec<BadgeView>, BadgeError> {
        Ok(self
            .evaluate(person)?
            .iter()
            .map(Badge::view)
            .collect())
    }
}
