//! Rule implementations behind the badge catalog.
//!
//! Each rule inspects a read-only person and fills in the candidate badge it
//! is handed. Returning `Ok(true)` keeps the candidate; `Ok(false)` discards
//! it. Errors abort the whole evaluation.

pub(crate) mod audience;
pub(crate) mod channels;
pub(crate) mod geo;
pub(crate) mod products;

use super::catalog::BadgeDescriptor;
use super::domain::{Badge, Person};
use super::BadgeError;
use crate::reference::ReferenceData;

pub(crate) trait BadgeAssigner: Send + Sync {
    fn descriptor(&self) -> &'static BadgeDescriptor;

    fn decide<'p>(
        &self,
        person: &'p Person,
        reference: &ReferenceData,
        candidate: &mut Badge<'p>,
    ) -> Result<bool, BadgeError>;
}

pub(crate) fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
