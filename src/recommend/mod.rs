use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Curated suggestions per category, split by media type.
///
/// Example YAML:
/// ```yaml
/// recommendations:
///   picks_per_medium: 3
///   media: ["Games", "Movies"]
///   catalog:
///     "Found Family":
///       Games: ["Mass Effect Trilogy", "Persona 5"]
///       Movies: ["Guardians of the Galaxy"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RecommendationConfig {
    /// How many items to draw from each media list (default: 3)
    #[serde(default = "default_picks")]
    pub picks_per_medium: usize,

    /// Display order of media types
    pub media: Vec<String>,

    /// Category -> media type -> items
    pub catalog: HashMap<String, HashMap<String, Vec<String>>>,
}

fn default_picks() -> usize {
    3
}

/// Randomly drawn items for one media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaPicks<'a> {
    pub medium: &'a str,
    pub items: Vec<&'a str>,
}

impl RecommendationConfig {
    pub fn has_category(&self, category: &str) -> bool {
        self.catalog.contains_key(category)
    }

    /// Draw up to `picks_per_medium` distinct items from each media list of
    /// `category`, in configured media order. Media with no list are skipped.
    /// Returns `None` when the category has no curated entry.
    pub fn pick<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> Option<Vec<MediaPicks<'_>>> {
        let by_medium = self.catalog.get(category)?;

        let picks = self
            .media
            .iter()
            .filter_map(|medium| {
                let items = by_medium.get(medium)?;
                let count = self.picks_per_medium.min(items.len());
                Some(MediaPicks {
                    medium: medium.as_str(),
                    items: items
                        .choose_multiple(&mut *rng, count)
                        .map(String::as_str)
                        .collect(),
                })
            })
            .collect();

        Some(picks)
    }
}
