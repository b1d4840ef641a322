use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::assigners::{audience, channels, geo, products, BadgeAssigner};

/// Badge tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeLevel {
    Bronze,
    Silver,
    Gold,
}

impl BadgeLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }
}

/// Descriptive metadata for one badge; carries no rule logic or thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub level: BadgeLevel,
    pub is_for_products: bool,
    pub group: &'static str,
    pub description: &'static str,
    pub extra_description: Option<&'static str>,
}

pub(crate) static ONE_HIT_WONDER: BadgeDescriptor = BadgeDescriptor {
    name: "one_hit_wonder",
    display_name: "One-hit wonder",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "product_score_one_hit",
    description: "Your online impact score comes primarily from one research product",
    extra_description: None,
};

pub(crate) static BABY_STEPS: BadgeDescriptor = BadgeDescriptor {
    name: "baby_steps",
    display_name: "Baby steps",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "product_score_any",
    description: "You have made online impact!  Congrats!",
    extra_description: None,
};

pub(crate) static MEGAHIT: BadgeDescriptor = BadgeDescriptor {
    name: "megahit",
    display_name: "Megahit",
    level: BadgeLevel::Gold,
    is_for_products: true,
    group: "product_score_high",
    description: "You have a product with an Altmetric.com score of more than 100.",
    extra_description: None,
};

pub(crate) static THIRD_TIME_CHARM: BadgeDescriptor = BadgeDescriptor {
    name: "third_time_charm",
    display_name: "Third time charm",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "product_score",
    description: "You have at least three products that have made impact.",
    extra_description: None,
};

pub(crate) static CLEAN_SWEEP: BadgeDescriptor = BadgeDescriptor {
    name: "clean_sweep",
    display_name: "Clean sweep",
    level: BadgeLevel::Silver,
    is_for_products: true,
    group: "product_score",
    description: "All of your publications since 2012 have made impact.",
    extra_description: None,
};

pub(crate) static BIG_IN_JAPAN: BadgeDescriptor = BadgeDescriptor {
    name: "big_in_japan",
    display_name: "Big in Japan",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "geo_japan",
    description: "You made impact in Japan!",
    extra_description: None,
};

pub(crate) static GLOBAL_REACH: BadgeDescriptor = BadgeDescriptor {
    name: "global_reach",
    display_name: "Global reach",
    level: BadgeLevel::Bronze,
    is_for_products: false,
    group: "geo_countries",
    description: "Your research has made an impact in more than 25 countries",
    extra_description: None,
};

pub(crate) static PACIFIC_RIM: BadgeDescriptor = BadgeDescriptor {
    name: "pacific_rim",
    display_name: "Pacific rim",
    level: BadgeLevel::Silver,
    is_for_products: true,
    group: "geo_pacific_rim",
    description: "You have impact from at least three eastern Pacific Rim and three western Pacific Rim countries.",
    extra_description: None,
};

pub(crate) static GLOBAL_SOUTH: BadgeDescriptor = BadgeDescriptor {
    name: "global_south",
    display_name: "Global South",
    level: BadgeLevel::Gold,
    is_for_products: true,
    group: "geo_global_south",
    description: "More than 25% of your impact is from the Global South.",
    extra_description: None,
};

pub(crate) static IVORY_TOWER: BadgeDescriptor = BadgeDescriptor {
    name: "ivory_tower",
    display_name: "Ivory Tower",
    level: BadgeLevel::Bronze,
    is_for_products: false,
    group: "poster_types",
    description: "More than 50% of your impact is from other researchers.",
    extra_description: None,
};

pub(crate) static PRACTICAL_MAGIC: BadgeDescriptor = BadgeDescriptor {
    name: "practical_magic",
    display_name: "Practical Magic",
    level: BadgeLevel::Bronze,
    is_for_products: false,
    group: "poster_types",
    description: "More than 10% of your impact is from practitioners.",
    extra_description: None,
};

pub(crate) static PRESS_CORPS: BadgeDescriptor = BadgeDescriptor {
    name: "press_corps",
    display_name: "Press corps",
    level: BadgeLevel::Bronze,
    is_for_products: false,
    group: "poster_types",
    description: "More than 10% of your impact is from science communicators.",
    extra_description: None,
};

pub(crate) static GOOD_FOR_TEACHING: BadgeDescriptor = BadgeDescriptor {
    name: "good_for_teaching",
    display_name: "Good for teaching",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "f1000_type",
    description: "Cool! An F1000 reviewer called your research good for teaching",
    extra_description: None,
};

pub(crate) static NEW_FINDING: BadgeDescriptor = BadgeDescriptor {
    name: "new_finding",
    display_name: "New finding",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "f1000_type",
    description: "Cool! An F1000 reviewer called your research a New Finding!",
    extra_description: None,
};

pub(crate) static CONTROVERSIAL: BadgeDescriptor = BadgeDescriptor {
    name: "controversial",
    display_name: "Controversial",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "f1000_type",
    description: "Cool! An F1000 reviewer called your research Controversial!",
    extra_description: None,
};

pub(crate) static WIKI_HIT: BadgeDescriptor = BadgeDescriptor {
    name: "wiki_hit",
    display_name: "Wiki hit",
    level: BadgeLevel::Bronze,
    is_for_products: false,
    group: "sources_wiki",
    description: "Your research is mentioned in a Wikipedia article!",
    extra_description: Some("Wikipedia is referenced by <a href='http://www.theatlantic.com/health/archive/2014/03/doctors-1-source-for-healthcare-information-wikipedia/284206/'>half of doctors!</a>"),
};

pub(crate) static WIKI_STAR: BadgeDescriptor = BadgeDescriptor {
    name: "wiki_star",
    display_name: "Wiki star",
    level: BadgeLevel::Silver,
    is_for_products: false,
    group: "sources_wiki",
    description: "Your research is mentioned in more than 5 Wikipedia articles!",
    extra_description: None,
};

pub(crate) static WIKI_SUPERSTAR: BadgeDescriptor = BadgeDescriptor {
    name: "wiki_superstar",
    display_name: "Wiki superstar",
    level: BadgeLevel::Gold,
    is_for_products: false,
    group: "sources_wiki",
    description: "Your research is mentioned in more than 10 Wikipedia articles!",
    extra_description: None,
};

pub(crate) static UNICORN: BadgeDescriptor = BadgeDescriptor {
    name: "unicorn",
    display_name: "Unicorn",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "sources_rare",
    description: "You made impact in a rare place",
    extra_description: None,
};

pub(crate) static EVERYWHERE: BadgeDescriptor = BadgeDescriptor {
    name: "everywhere",
    display_name: "Everywhere",
    level: BadgeLevel::Gold,
    is_for_products: false,
    group: "sources_number",
    description: "You have made impact on at least 10 channels. You are everywhere!",
    extra_description: None,
};

pub(crate) static AT_EVERY_TURN: BadgeDescriptor = BadgeDescriptor {
    name: "at_every_turn",
    display_name: "At every turn",
    level: BadgeLevel::Silver,
    is_for_products: false,
    group: "sources_number",
    description: "You have made impact on at least 7 channels. You are blanketing the airwaves!",
    extra_description: None,
};

pub(crate) static TALK_OF_THE_TOWN: BadgeDescriptor = BadgeDescriptor {
    name: "talk_of_the_town",
    display_name: "Talk of the town",
    level: BadgeLevel::Bronze,
    is_for_products: false,
    group: "sources_number",
    description: "You have made impact on at least 5 channels.",
    extra_description: None,
};

// The rule fires at 50000 followers; the published text has always said 10k.
pub(crate) static MEGAFAN: BadgeDescriptor = BadgeDescriptor {
    name: "megafan",
    display_name: "Megafan",
    level: BadgeLevel::Silver,
    is_for_products: true,
    group: "fan_big",
    description: "Someone with more than 10k followers has tweeted your research.",
    extra_description: None,
};

pub(crate) static BFF: BadgeDescriptor = BadgeDescriptor {
    name: "bff",
    display_name: "bff",
    level: BadgeLevel::Silver,
    is_for_products: false,
    group: "tweeters_count",
    description: "You have a BFF! Someone has tweeted three or more of your papers.",
    extra_description: None,
};

pub(crate) static LINCOLN_CENTER: BadgeDescriptor = BadgeDescriptor {
    name: "lincoln_center",
    display_name: "Lincoln Center",
    level: BadgeLevel::Bronze,
    is_for_products: false,
    group: "impressions",
    description: "The number of twitter impressions your work would fill Lincoln Center!",
    extra_description: None,
};

pub(crate) static YANKEE_STADIUM: BadgeDescriptor = BadgeDescriptor {
    name: "yankee_stadium",
    display_name: "Yankee Stadium",
    level: BadgeLevel::Silver,
    is_for_products: false,
    group: "impressions",
    description: "The number of twitter impressions your work would fill Yankee Stadium!",
    extra_description: None,
};

pub(crate) static WOODSTOCK: BadgeDescriptor = BadgeDescriptor {
    name: "woodstock",
    display_name: "Woodstock",
    level: BadgeLevel::Gold,
    is_for_products: false,
    group: "impressions",
    description: "The number of twitter impressions your work is larger than the number of people who went to Woodstock!",
    extra_description: None,
};

pub(crate) static URL_SOUP: BadgeDescriptor = BadgeDescriptor {
    name: "url_soup",
    display_name: "URL soup",
    level: BadgeLevel::Bronze,
    is_for_products: true,
    group: "misc_urls",
    description: "You have a research product that has made impact under more than 20 urls",
    extra_description: None,
};

/// Every rule in declaration order. Catalog order is derived from this list
/// by a stable sort on group, so reordering entries here changes the output
/// order of badges sharing a group.
fn registered_assigners() -> Vec<Box<dyn BadgeAssigner>> {
    vec![
        Box::new(products::OneHitWonder),
        Box::new(products::ProductScoreAbove::new(&BABY_STEPS, 0.0)),
        Box::new(products::ProductScoreAbove::new(&MEGAHIT, 100.0)),
        Box::new(products::ThirdTimeCharm),
        Box::new(products::CleanSweep),
        Box::new(geo::BigInJapan),
        Box::new(geo::GlobalReach),
        Box::new(geo::PacificRim),
        Box::new(geo::GlobalSouth),
        Box::new(audience::PosterShare::new(&IVORY_TOWER, "Scientists", 0.50)),
        Box::new(audience::PosterShare::new(
            &PRACTICAL_MAGIC,
            "Practitioners (doctors, other healthcare professionals)",
            0.10,
        )),
        Box::new(audience::PosterShare::new(
            &PRESS_CORPS,
            "Science communicators (journalists, bloggers, editors)",
            0.10,
        )),
        Box::new(channels::F1000Class::new(&GOOD_FOR_TEACHING, "good_for_teaching")),
        Box::new(channels::F1000Class::new(&NEW_FINDING, "new_finding")),
        Box::new(channels::F1000Class::new(&CONTROVERSIAL, "controversial")),
        Box::new(channels::WikipediaMentions::new(&WIKI_HIT, 1)),
        Box::new(channels::WikipediaMentions::new(&WIKI_STAR, 5)),
        Box::new(channels::WikipediaMentions::new(&WIKI_SUPERSTAR, 10)),
        Box::new(channels::Unicorn),
        Box::new(channels::ChannelCount::new(&EVERYWHERE, 10)),
        Box::new(channels::ChannelCount::new(&AT_EVERY_TURN, 7)),
        Box::new(channels::ChannelCount::new(&TALK_OF_THE_TOWN, 5)),
        Box::new(audience::Megafan),
        Box::new(audience::Bff),
        Box::new(audience::ImpressionsAtLeast::new(&LINCOLN_CENTER, 2_740)),
        Box::new(audience::ImpressionsAtLeast::new(&YANKEE_STADIUM, 50_000)),
        Box::new(audience::ImpressionsAtLeast::new(&WOODSTOCK, 500_000)),
        Box::new(products::UrlSoup),
    ]
}

/// Registry of badge rules ordered by display group.
pub struct BadgeCatalog {
    assigners: Vec<Box<dyn BadgeAssigner>>,
}

impl std::fmt::Debug for BadgeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.assigners.iter().map(|assigner| assigner.descriptor().name))
            .finish()
    }
}

impl BadgeCatalog {
    pub fn standard() -> Self {
        Self::from_assigners(registered_assigners())
    }

    pub(crate) fn from_assigners(mut assigners: Vec<Box<dyn BadgeAssigner>>) -> Self {
        assigners.sort_by(|left, right| left.descriptor().group.cmp(right.descriptor().group));
        Self { assigners }
    }

    /// Descriptors in catalog order: ascending group, then registration order.
    pub fn list_all(&self) -> Vec<&'static BadgeDescriptor> {
        self.assigners
            .iter()
            .map(|assigner| assigner.descriptor())
            .collect()
    }

    pub fn describe(&self, name: &str) -> Option<&'static BadgeDescriptor> {
        self.assigners
            .iter()
            .map(|assigner| assigner.descriptor())
            .find(|descriptor| descriptor.name == name)
    }

    /// Descriptors keyed by badge name.
    pub fn configs(&self) -> BTreeMap<&'static str, &'static BadgeDescriptor> {
        self.assigners
            .iter()
            .map(|assigner| {
                let descriptor = assigner.descriptor();
                (descriptor.name, descriptor)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.assigners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigners.is_empty()
    }

    pub(crate) fn assigners(&self) -> impl Iterator<Item = &dyn BadgeAssigner> {
        self.assigners.iter().map(|assigner| assigner.as_ref())
    }
}

impl Default for BadgeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
