use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::common::*;
use crate::badges::domain::{Person, ProductId};
use crate::badges::report::EvaluationReport;
use crate::badges::{BadgeError, BadgeLevel};

fn japanese_hit() -> Person {
    person(vec![
        with_countries(product("p1", 50.0, 2015), &["Japan"]),
        product("p2", 5.0, 2009),
    ])
}

#[test]
fn runner_awards_expected_badges_in_catalog_order() {
    let researcher = japanese_hit();
    let badges = runner().evaluate(&researcher).expect("evaluates");

    let names: Vec<&str> = badges.iter().map(|badge| badge.name()).collect();
    assert_eq!(
        names,
        vec!["big_in_japan", "clean_sweep", "baby_steps", "one_hit_wonder"]
    );

    let one_hit = find_badge(&badges, "one_hit_wonder");
    assert_eq!(one_hit.level(), BadgeLevel::Bronze);
    assert_eq!(one_hit.products().len(), 1);
    assert_eq!(one_hit.products()[0].id.0, "p1");
    assert_eq!(find_badge(&badges, "baby_steps").products().len(), 2);
}

#[test]
fn awarded_badges_are_unique_and_group_sorted() {
    let researcher = person(vec![
        with_sources(
            with_countries(product("p1", 120.0, 2014), &["Japan", "China", "Australia"]),
            &[("twitter", 40), ("news", 2), ("blogs", 3), ("video", 1), ("wikipedia", 2)],
        ),
        with_tweeters(
            with_countries(product("p2", 30.0, 2016), &["Canada", "Chile", "Mexico"]),
            &[("nature", 2_000_000)],
        ),
        with_sources(product("p3", 4.0, 2013), &[("policy", 1), ("reddit", 1)]),
    ]);

    let badges = runner().evaluate(&researcher).expect("evaluates");
    assert!(badges.len() > 5);

    let names: BTreeSet<&str> = badges.iter().map(|badge| badge.name()).collect();
    assert_eq!(names.len(), badges.len());

    let groups: Vec<&str> = badges.iter().map(|badge| badge.group()).collect();
    let mut sorted = groups.clone();
    sorted.sort();
    assert_eq!(groups, sorted);
}

#[test]
fn evaluation_is_repeatable() {
    let researcher = japanese_hit();
    let runner = runner();

    let first = runner.evaluate_views(&researcher).expect("first run");
    let second = runner.evaluate_views(&researcher).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn awarded_products_belong_to_the_person() {
    let researcher = person(vec![
        with_tweeters(product("p1", 10.0, 2015), &[("fan", 60_000)]),
        with_tweeters(product("p2", 3.0, 2015), &[("fan", 60_000)]),
        product("p3", 0.0, 2010),
    ]);

    let owned: BTreeSet<&str> = researcher
        .products
        .iter()
        .map(|product| product.id.0.as_str())
        .collect();
    for badge in runner().evaluate(&researcher).expect("evaluates") {
        for product in badge.products() {
            assert!(owned.contains(product.id.0.as_str()));
        }
    }
}

#[test]
fn empty_person_earns_nothing() {
    let researcher = person(Vec::new());
    let badges = runner().evaluate(&researcher).expect("evaluates");
    assert!(badges.is_empty());
}

#[test]
fn invalid_aggregates_are_rejected_before_rules_run() {
    let mut duplicate = person(vec![product("p1", 1.0, 2015), product("p1", 2.0, 2015)]);
    duplicate.altmetric_score = 3.0;
    assert!(matches!(
        runner().evaluate(&duplicate),
        Err(BadgeError::InvalidInput { .. })
    ));

    let mut negative = person(vec![product("p1", 1.0, 2015)]);
    negative.altmetric_score = -1.0;
    assert!(matches!(
        runner().evaluate(&negative),
        Err(BadgeError::InvalidInput { .. })
    ));

    let nan_score = person(vec![product("p1", f64::NAN, 2015)]);
    assert!(matches!(
        runner().evaluate(&nan_score),
        Err(BadgeError::InvalidInput { .. })
    ));

    let anonymous = Person::aggregate("  ", vec![product("p1", 1.0, 2015)]);
    let err = runner().evaluate(&anonymous).expect_err("empty id");
    assert_eq!(
        err,
        BadgeError::InvalidInput {
            reason: "person id is empty".to_string()
        }
    );
}

#[test]
fn missing_reference_data_discards_all_badges() {
    let mut geolocated = with_countries(product("p1", 50.0, 2015), &["Japan"]);
    geolocated.post_counts_by_country.insert("JP".to_string(), 4);
    geolocated.post_counts_by_country.insert("XX".to_string(), 1);
    let researcher = person(vec![geolocated]);

    let result = runner().evaluate(&researcher);
    assert_eq!(
        result.map(|badges| badges.len()),
        Err(BadgeError::MissingReferenceData {
            iso_code: "XX".to_string()
        })
    );
}

#[test]
fn views_only_list_products_for_product_badges() {
    let researcher = person(vec![
        with_countries(product("p1", 50.0, 2015), &["Japan"]),
        with_sources(product("p2", 5.0, 2009), &[("twitter", 3), ("blogs", 1), ("news", 1), ("reddit", 1), ("policy", 1)]),
    ]);
    let views = runner().evaluate_views(&researcher).expect("evaluates");

    let japan = views
        .iter()
        .find(|view| view.name == "big_in_japan")
        .expect("big_in_japan");
    assert_eq!(japan.product_ids, Some(vec![ProductId("p1".to_string())]));

    let town = views
        .iter()
        .find(|view| view.name == "talk_of_the_town")
        .expect("talk_of_the_town");
    assert_eq!(town.product_ids, None);
    assert_eq!(town.support, None);
}

#[test]
fn report_summarizes_sources_and_percentile() {
    let researcher = person(vec![
        with_sources(product("p1", 50.0, 2015), &[("twitter", 3)]),
        with_sources(product("p2", 5.0, 2009), &[("blogs", 1)]),
    ]);
    let evaluated_on = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");

    let report = EvaluationReport::build(
        &runner(),
        &researcher,
        &[80.0, 10.0, 55.0, 2.0],
        evaluated_on,
    )
    .expect("report builds");

    assert_eq!(report.person_id, researcher.id);
    assert_eq!(report.evaluated_on, evaluated_on);
    assert_eq!(report.badge_count, report.badges.len());
    assert_eq!(report.source_proportions.get("twitter"), Some(&0.75));
    assert_eq!(report.source_proportions.get("blogs"), Some(&0.25));
    // 55.0 ranks after 2.0 and 10.0; ties count below
    assert_eq!(report.score_percentile, Some(0.5));

    let without_reference =
        EvaluationReport::build(&runner(), &researcher, &[], evaluated_on).expect("builds");
    assert_eq!(without_reference.score_percentile, None);
}
