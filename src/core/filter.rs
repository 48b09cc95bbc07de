//! Listing filter - narrows the visible marketplace.
//!
//! A filter is a conjunction of independent bounds evaluated over an already
//! materialized [`ListingView`]. String bounds are case-insensitive substring
//! matches, numeric bounds are inclusive ranges. Every bound defaults to the value that
//! accepts everything, so `ListingFilter::default()` matches every listing.

use crate::models::ListingView;
use serde::Deserialize;

/// Bounds a listing must satisfy to be shown
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListingFilter {
    /// Substring of the player's full name (`first last`)
    pub player_name: String,
    /// Substring of the owning team's name
    pub team_name: String,
    /// Substring of the player's country
    pub country: String,
    /// Youngest accepted age (inclusive)
    pub min_age: i32,
    /// Oldest accepted age (inclusive)
    pub max_age: i32,
    /// Lowest accepted ask (inclusive)
    pub min_value: i64,
    /// Highest accepted ask (inclusive)
    pub max_value: i64,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            team_name: String::new(),
            country: String::new(),
            min_age: -1,
            max_age: i32::MAX,
            min_value: -1,
            max_value: i64::MAX,
        }
    }
}

impl ListingFilter {
    /// Builds a filter from raw query parameters.
    ///
    /// Unknown keys are ignored. A numeric parameter that does not parse as an
    /// integer leaves its bound unbounded rather than failing the whole query.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let defaults = Self::default();
        let mut filter = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "player_name" => filter.player_name = value.to_string(),
                "team_name" => filter.team_name = value.to_string(),
                "country" => filter.country = value.to_string(),
                "min_age" => filter.min_age = parse_or(value, defaults.min_age),
                "max_age" => filter.max_age = parse_or(value, defaults.max_age),
                "min_value" => filter.min_value = parse_or(value, defaults.min_value),
                "max_value" => filter.max_value = parse_or(value, defaults.max_value),
                _ => {}
            }
        }
        filter
    }

    /// Whether the listing satisfies every bound.
    #[must_use]
    pub fn matches(&self, listing: &ListingView) -> bool {
        contains_ignore_case(&listing.player.full_name(), &self.player_name)
            && contains_ignore_case(&listing.team_name, &self.team_name)
            && contains_ignore_case(&listing.player.country, &self.country)
            && (self.min_age..=self.max_age).contains(&listing.player.age)
            && (self.min_value..=self.max_value).contains(&listing.ask)
    }

    /// Keeps only the listings that match, preserving order.
    #[must_use]
    pub fn apply(&self, listings: Vec<ListingView>) -> Vec<ListingView> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}

fn parse_or<T: std::str::FromStr>(raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or(default)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Position;
    use crate::models::PlayerSnapshot;
    use chrono::Utc;

    fn listing(first: &str, last: &str, country: &str, age: i32, team: &str, ask: i64) -> ListingView {
        ListingView {
            id: 1,
            ask,
            created_at: Utc::now(),
            player: PlayerSnapshot {
                id: 1,
                first_name: first.to_string(),
                last_name: last.to_string(),
                country: country.to_string(),
                age,
                market_value: 1_000_000,
                position: Position::Attacker,
            },
            team_id: 1,
            team_name: team.to_string(),
        }
    }

    #[test]
    fn test_parse_all_parameters() {
        let filter = ListingFilter::from_query_pairs([
            ("country", "argentina"),
            ("team_name", "la seleccion"),
            ("player_name", "messi"),
            ("max_age", "38"),
            ("max_value", "1000000"),
            ("min_age", "19"),
            ("min_value", "1000"),
        ]);

        assert_eq!(filter.country, "argentina");
        assert_eq!(filter.team_name, "la seleccion");
        assert_eq!(filter.player_name, "messi");
        assert_eq!(filter.max_age, 38);
        assert_eq!(filter.max_value, 1_000_000);
        assert_eq!(filter.min_age, 19);
        assert_eq!(filter.min_value, 1000);
    }

    #[test]
    fn test_parse_empty_parameters() {
        let filter = ListingFilter::from_query_pairs(Vec::<(String, String)>::new());
        assert_eq!(filter, ListingFilter::default());
        assert_eq!(filter.min_age, -1);
        assert_eq!(filter.min_value, -1);
        assert_eq!(filter.max_age, i32::MAX);
        assert_eq!(filter.max_value, i64::MAX);
    }

    #[test]
    fn test_unparseable_numbers_fall_back_to_unbounded() {
        let filter = ListingFilter::from_query_pairs([
            ("min_age", "young"),
            ("max_value", ""),
            ("unknown", "ignored"),
        ]);
        assert_eq!(filter, ListingFilter::default());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ListingFilter::default();
        assert!(filter.matches(&listing("tito", "", "", 0, "", 0)));
        assert!(filter.matches(&listing("", "messi", "", 0, "", 0)));
        assert!(filter.matches(&listing("", "", "", 123, "", 0)));
        assert!(filter.matches(&listing("", "", "", 0, "", i64::MAX)));
    }

    #[test]
    fn test_name_matches_across_first_and_last() {
        let filter = ListingFilter {
            player_name: "NEL MES".to_string(),
            ..ListingFilter::default()
        };
        assert!(filter.matches(&listing("Lionel", "Messi", "Argentina", 36, "Inter Miami", 1)));
        assert!(!filter.matches(&listing("Lionel", "Scaloni", "Argentina", 45, "AFA", 1)));
    }

    #[test]
    fn test_team_and_country_are_case_insensitive() {
        let filter = ListingFilter {
            team_name: "miami".to_string(),
            country: "ARG".to_string(),
            ..ListingFilter::default()
        };
        assert!(filter.matches(&listing("Lionel", "Messi", "Argentina", 36, "Inter Miami", 1)));
        assert!(!filter.matches(&listing("Lionel", "Messi", "Argentina", 36, "Barcelona", 1)));
        assert!(!filter.matches(&listing("Lionel", "Messi", "Spain", 36, "Inter Miami", 1)));
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let filter = ListingFilter {
            min_age: 20,
            max_age: 30,
            min_value: 1_000,
            max_value: 2_000,
            ..ListingFilter::default()
        };
        assert!(filter.matches(&listing("a", "b", "c", 20, "t", 1_000)));
        assert!(filter.matches(&listing("a", "b", "c", 30, "t", 2_000)));
        assert!(!filter.matches(&listing("a", "b", "c", 19, "t", 1_500)));
        assert!(!filter.matches(&listing("a", "b", "c", 31, "t", 1_500)));
        assert!(!filter.matches(&listing("a", "b", "c", 25, "t", 999)));
        assert!(!filter.matches(&listing("a", "b", "c", 25, "t", 2_001)));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = ListingFilter {
            max_value: 10,
            ..ListingFilter::default()
        };
        let mut cheap = listing("a", "b", "c", 20, "t", 5);
        cheap.id = 1;
        let mut pricey = listing("a", "b", "c", 20, "t", 50);
        pricey.id = 2;
        let mut cheaper = listing("a", "b", "c", 20, "t", 1);
        cheaper.id = 3;

        let kept = filter.apply(vec![cheap, pricey, cheaper]);
        assert_eq!(kept.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
