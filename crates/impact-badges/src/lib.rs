//! Research impact badges.
//!
//! [`badges::BadgeRunner`] evaluates the badge catalog against a researcher
//! aggregate using the immutable [`reference::ReferenceData`] tables. The
//! [`metrics`] module holds the normalization helpers shared by rules and
//! reports.

pub mod badges;
pub mod config;
pub mod error;
pub mod metrics;
pub mod reference;
pub mod telemetry;
