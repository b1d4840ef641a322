use crate::infra::{build_runner, parse_date, read_json_file};
use chrono::{Local, NaiveDate};
use clap::Args;
use impact_badges::badges::{
    BadgeRunner, EvaluationReport, F1000Review, Person, PersonPayload, Product,
};
use impact_badges::config::AppConfig;
use impact_badges::error::AppError;
use impact_badges::metrics::{conversational_number, median};
use impact_badges::telemetry::{self, LogTarget};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Emit the catalog as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding a researcher aggregate or `{ "id", "products" }`
    #[arg(long)]
    pub(crate) person: PathBuf,
    /// Optional JSON array of reference scores used for the percentile rank
    #[arg(long)]
    pub(crate) reference_scores: Option<PathBuf>,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

/// Shared setup for one-shot commands; logs go to stderr so stdout stays parseable.
fn command_runner() -> Result<Arc<BadgeRunner>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;
    build_runner(&config)
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let runner = command_runner()?;
    let descriptors = runner.catalog().list_all();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    println!("Badge catalog ({} badges)", descriptors.len());
    let mut current_group = "";
    for descriptor in descriptors {
        if descriptor.group != current_group {
            current_group = descriptor.group;
            println!("\n{current_group}");
        }
        println!(
            "  [{:<6}] {:<18} {}",
            descriptor.level.label(),
            descriptor.name,
            descriptor.description
        );
    }
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        person,
        reference_scores,
        today,
    } = args;

    let runner = command_runner()?;
    let person = read_json_file::<PersonPayload>(&person)?.into_person();
    let reference_scores: Vec<f64> = match reference_scores {
        Some(path) => read_json_file(&path)?,
        None => Vec::new(),
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let report = EvaluationReport::build(&runner, &person, &reference_scores, today)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let runner = command_runner()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let person = demo_researcher();
    let peer_scores = [3.5, 12.0, 48.0, 96.0, 150.0, 410.0, 1_200.0];
    let report = EvaluationReport::build(&runner, &person, &peer_scores, today)?;

    render_report(&person, &report, &peer_scores);
    Ok(())
}

fn render_report(person: &Person, report: &EvaluationReport, peer_scores: &[f64]) {
    println!("Impact badge demo ({})", report.evaluated_on);
    println!(
        "Researcher {} | {} products | altmetric score {:.1} | about {} impressions",
        person.id.0,
        person.products.len(),
        person.altmetric_score,
        conversational_number(person.impressions as f64)
    );
    if let Some(rank) = report.score_percentile {
        let peer_median = median(peer_scores).unwrap_or(0.0);
        println!(
            "Score percentile {:.0}% against {} peers (median {:.1})",
            rank * 100.0,
            peer_scores.len(),
            peer_median
        );
    }

    if !report.source_proportions.is_empty() {
        println!("\nChannel mix");
        for (source, share) in &report.source_proportions {
            println!("  - {source}: {:.0}%", share * 100.0);
        }
    }

    if report.badges.is_empty() {
        println!("\nAwarded badges: none");
        return;
    }

    println!("\nAwarded badges ({})", report.badge_count);
    for badge in &report.badges {
        println!(
            "  - [{}] {} ({})",
            badge.level.label(),
            badge.display_name,
            badge.group
        );
        if let Some(support) = &badge.support {
            println!("      {support}");
        }
        if let Some(product_ids) = &badge.product_ids {
            let ids: Vec<&str> = product_ids.iter().map(|id| id.0.as_str()).collect();
            println!("      products: {}", ids.join(", "));
        }
    }
}

fn demo_researcher() -> Person {
    let mut flagship = Product::new("10.1038/s41586-020-2012-7", 164.0, 2020);
    flagship.title = Some("Pollinator decline across agricultural landscapes".to_string());
    flagship.countries.extend(
        [
            "Japan", "China", "Australia", "Indonesia", "Canada", "Chile", "Mexico", "Kenya",
            "Brazil", "Germany",
        ]
        .map(String::from),
    );
    flagship.post_counts_by_country.extend([
        ("JP".to_string(), 14),
        ("US".to_string(), 22),
        ("BR".to_string(), 9),
        ("KE".to_string(), 7),
        ("IN".to_string(), 5),
    ]);
    flagship.poster_counts_by_type.extend([
        ("Members of the public".to_string(), 120),
        ("Scientists".to_string(), 64),
        (
            "Science communicators (journalists, bloggers, editors)".to_string(),
            31,
        ),
    ]);
    flagship.post_counts_by_source.extend([
        ("twitter".to_string(), 180),
        ("news".to_string(), 12),
        ("blogs".to_string(), 6),
        ("wikipedia".to_string(), 3),
        ("policy".to_string(), 1),
        ("video".to_string(), 2),
    ]);
    flagship.twitter_posters_with_followers.extend([
        ("natureecoevo".to_string(), 61_000),
        ("beekeeper_jo".to_string(), 820),
        ("fieldnotes".to_string(), 2_400),
    ]);
    flagship.wikipedia_urls.insert("Pollinator decline".to_string());
    flagship.f1000_reviews.push(F1000Review {
        url: "https://f1000.com/prime/737480012".to_string(),
        classes: ["new_finding".to_string()].into_iter().collect(),
    });

    let mut methods = Product::new("10.1111/2041-210X.13101", 18.0, 2018);
    methods
        .countries
        .extend(["Peru", "United States", "Japan"].map(String::from));
    methods.post_counts_by_source.extend([
        ("twitter".to_string(), 24),
        ("reddit".to_string(), 2),
        ("q&a".to_string(), 1),
    ]);
    methods.twitter_posters_with_followers.extend([
        ("beekeeper_jo".to_string(), 820),
        ("fieldnotes".to_string(), 2_400),
    ]);

    let mut dataset = Product::new("10.5061/dryad.8sf7m0cj4", 4.0, 2019);
    dataset
        .post_counts_by_source
        .insert("twitter".to_string(), 3);
    dataset
        .twitter_posters_with_followers
        .insert("fieldnotes".to_string(), 2_400);

    let thesis = Product::new("hdl:1721.1/44342", 0.0, 2009);

    Person::aggregate("0000-0002-9079-593X", vec![flagship, methods, dataset, thesis])
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_badges::reference::ReferenceData;

    #[test]
    fn demo_researcher_earns_badges_from_every_family() {
        let reference = ReferenceData::standard().expect("embedded table loads");
        let runner = BadgeRunner::standard(Arc::new(reference));
        let person = demo_researcher();

        let names: Vec<String> = runner
            .evaluate_views(&person)
            .expect("demo evaluates")
            .into_iter()
            .map(|view| view.name)
            .collect();

        for expected in [
            "new_finding",
            "megafan",
            "bff",
            "pacific_rim",
            "global_south",
            "megahit",
            "clean_sweep",
            "unicorn",
            "at_every_turn",
            "wiki_hit",
            "press_corps",
        ] {
            assert!(
                names.iter().any(|name| name == expected),
                "missing {expected}: {names:?}"
            );
        }
    }
}
