use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::Config;
use transfer_market::{
    ListingFilter,
    entities::Position,
    models::{ListingView, PlayerSnapshot},
};

fn listing(first: &str, last: &str, country: &str, age: i32, team: &str, ask: i64) -> ListingView {
    ListingView {
        id: 1,
        ask,
        created_at: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default(),
        player: PlayerSnapshot {
            id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            country: country.to_string(),
            age,
            market_value: 1_000_000,
            position: Position::Defender,
        },
        team_id: 1,
        team_name: team.to_string(),
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn empty_filter_matches_every_listing(
        first in "\\PC{0,12}",
        last in "\\PC{0,12}",
        country in "\\PC{0,12}",
        team in "\\PC{0,16}",
        age in 0_i32..=i32::MAX,
        ask in 0_i64..=i64::MAX,
    ) {
        let view = listing(&first, &last, &country, age, &team, ask);
        prop_assert!(ListingFilter::default().matches(&view));
    }

    #[test]
    fn filter_is_conjunction_of_bounds(
        first in "[a-cA-C]{1,4}",
        last in "[a-cA-C]{1,4}",
        country in "[a-cA-C]{1,4}",
        team in "[a-cA-C ]{1,6}",
        age in 15_i32..45,
        ask in 0_i64..1_000,
        player_name in "[a-c ]{0,3}",
        team_name in "[a-c]{0,2}",
        country_filter in "[A-C]{0,2}",
        min_age in 10_i32..50,
        max_age in 10_i32..50,
        min_value in -1_i64..1_000,
        max_value in 0_i64..1_000,
    ) {
        let view = listing(&first, &last, &country, age, &team, ask);
        let filter = ListingFilter {
            player_name: player_name.clone(),
            team_name: team_name.clone(),
            country: country_filter.clone(),
            min_age,
            max_age,
            min_value,
            max_value,
        };

        let expected = contains(&format!("{first} {last}"), &player_name)
            && contains(&team, &team_name)
            && contains(&country, &country_filter)
            && min_age <= age
            && age <= max_age
            && min_value <= ask
            && ask <= max_value;

        prop_assert_eq!(filter.matches(&view), expected);
    }

    #[test]
    fn numeric_bounds_are_inclusive(
        low_age in 16_i32..30,
        age_span in 0_i32..10,
        low_value in 0_i64..1_000_000,
        value_span in 0_i64..1_000_000,
    ) {
        let high_age = low_age + age_span;
        let high_value = low_value + value_span;
        let filter = ListingFilter {
            min_age: low_age,
            max_age: high_age,
            min_value: low_value,
            max_value: high_value,
            ..ListingFilter::default()
        };

        prop_assert!(filter.matches(&listing("a", "b", "c", low_age, "t", low_value)));
        prop_assert!(filter.matches(&listing("a", "b", "c", high_age, "t", high_value)));
        prop_assert!(!filter.matches(&listing("a", "b", "c", low_age - 1, "t", low_value)));
        prop_assert!(!filter.matches(&listing("a", "b", "c", high_age + 1, "t", low_value)));
        prop_assert!(!filter.matches(&listing("a", "b", "c", low_age, "t", low_value - 1)));
        prop_assert!(!filter.matches(&listing("a", "b", "c", low_age, "t", high_value + 1)));
    }

    #[test]
    fn query_pairs_parse_back_numeric_bounds(
        min_age in -1_i32..100,
        max_value in 0_i64..=i64::MAX,
    ) {
        let filter = ListingFilter::from_query_pairs([
            ("min_age", min_age.to_string()),
            ("max_value", max_value.to_string()),
        ]);
        prop_assert_eq!(filter.min_age, min_age);
        prop_assert_eq!(filter.max_value, max_value);
        prop_assert_eq!(filter.max_age, i32::MAX);
        prop_assert_eq!(filter.min_value, -1);
    }
}
