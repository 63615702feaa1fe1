//! Incremental station filtering for the typeahead dropdowns.

use crate::domain::Station;

/// Filter the directory by a free-text query.
///
/// - A blank (empty or all-whitespace) query returns every station, in
///   directory order.
/// - Otherwise, returns every station whose name contains the query,
///   exactly as typed, as a case-insensitive substring, preserving the
///   directory's relative order. No ranking.
///
/// Pure function of its inputs; cheap enough to recompute on every
/// keystroke for a national directory (~2,500 stations).
pub fn filter_stations<'a>(directory: &'a [Station], query: &str) -> Vec<&'a Station> {
    if query.trim().is_empty() {
        return directory.iter().collect();
    }

    // Match on the query exactly as typed; surrounding whitespace must
    // appear in the name too.
    let needle = query.to_lowercase();
    directory
        .iter()
        .filter(|station| station.name.to_lowercase().contains(&needle))
        .collect()
}

/// Resolve a typed query to a confirmed selection on loss of focus.
///
/// If the first candidate's name equals the query case-insensitively, the
/// user has typed out a full station name and that station is treated as
/// selected. Otherwise there is nothing to confirm.
pub fn resolve_exact<'a>(candidates: &[&'a Station], query: &str) -> Option<&'a Station> {
    candidates
        .first()
        .filter(|station| station.name.to_lowercase() == query.to_lowercase())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Crs;

    fn directory() -> Vec<Station> {
        vec![
            Station::new(1, "London Kings Cross", Crs::parse("KGX").unwrap()),
            Station::new(2, "Edinburgh", Crs::parse("EDB").unwrap()),
            Station::new(3, "Leeds", Crs::parse("LDS").unwrap()),
            Station::new(4, "Berwick-upon-Tweed", Crs::parse("BWK").unwrap()),
        ]
    }

    #[test]
    fn blank_query_returns_whole_directory_in_order() {
        let dir = directory();
        for q in ["", "   ", "\t"] {
            let result = filter_stations(&dir, q);
            assert_eq!(result.len(), dir.len());
            for (got, want) in result.iter().zip(dir.iter()) {
                assert_eq!(*got, want);
            }
        }
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let dir = directory();
        let result = filter_stations(&dir, "ed");
        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        // "ed" matches Edinburgh, Leeds and Berwick-upon-Tweed, not Kings Cross.
        assert_eq!(names, vec!["Edinburgh", "Leeds", "Berwick-upon-Tweed"]);

        let upper = filter_stations(&dir, "ED");
        assert_eq!(result, upper);
    }

    #[test]
    fn padded_query_matches_literally() {
        let dir = directory();
        // "Edinburgh" does not contain " ed ", so padding narrows the match
        // rather than being stripped.
        let result = filter_stations(&dir, " ed ");
        for station in &result {
            assert!(station.name.to_lowercase().contains(" ed "));
        }
        assert!(result.is_empty());

        let with_space = filter_stations(&dir, "kings ");
        let names: Vec<&str> = with_space.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["London Kings Cross"]);
    }

    #[test]
    fn no_match_yields_empty() {
        let dir = directory();
        assert!(filter_stations(&dir, "zzz").is_empty());
    }

    #[test]
    fn empty_directory_always_empty() {
        let dir: Vec<Station> = vec![];
        assert!(filter_stations(&dir, "").is_empty());
        assert!(filter_stations(&dir, "anything").is_empty());
    }

    #[test]
    fn kings_cross_edinburgh_scenario() {
        let dir = vec![
            Station::new(1, "London Kings Cross", Crs::parse("KGX").unwrap()),
            Station::new(2, "Edinburgh", Crs::parse("EDB").unwrap()),
        ];

        let result = filter_stations(&dir, "ed");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Edinburgh");

        let all = filter_stations(&dir, "");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "London Kings Cross");
        assert_eq!(all[1].name, "Edinburgh");
    }

    #[test]
    fn resolve_exact_matches_first_candidate_ignoring_case() {
        let dir = directory();
        let candidates = filter_stations(&dir, "edinburgh");
        let resolved = resolve_exact(&candidates, "eDiNbUrGh").unwrap();
        assert_eq!(resolved.name, "Edinburgh");
    }

    #[test]
    fn resolve_exact_requires_full_name() {
        let dir = directory();
        let candidates = filter_stations(&dir, "Edin");
        assert!(resolve_exact(&candidates, "Edin").is_none());
    }

    #[test]
    fn resolve_exact_on_empty_candidates() {
        assert!(resolve_exact(&[], "Edinburgh").is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Crs, Station};
    use proptest::prelude::*;

    fn arb_station() -> impl Strategy<Value = Station> {
        ("[a-zA-Z ]{1,20}", "[A-Z]{3}", 1u32..10_000).prop_map(|(name, crs, id)| {
            Station::new(id, name, Crs::parse(&crs).unwrap())
        })
    }

    fn arb_directory() -> impl Strategy<Value = Vec<Station>> {
        proptest::collection::vec(arb_station(), 0..40)
    }

    proptest! {
        /// Blank queries are the identity filter.
        #[test]
        fn blank_query_identity(dir in arb_directory(), pad in "[ \t]{0,4}") {
            let result = filter_stations(&dir, &pad);
            prop_assert_eq!(result.len(), dir.len());
            for (got, want) in result.iter().zip(dir.iter()) {
                prop_assert_eq!(*got, want);
            }
        }

        /// Every returned station matches; every omitted station does not.
        #[test]
        fn partition_is_exact(dir in arb_directory(), query in "[ ]{0,2}[a-zA-Z]{1,5}[ ]{0,2}") {
            let result = filter_stations(&dir, &query);
            let needle = query.to_lowercase();

            for station in &result {
                prop_assert!(station.name.to_lowercase().contains(&needle));
            }

            let returned: Vec<&Station> = result.clone();
            for station in &dir {
                if !returned.iter().any(|s| std::ptr::eq(*s, station)) {
                    prop_assert!(!station.name.to_lowercase().contains(&needle));
                }
            }
        }

        /// Directory order is preserved among matches.
        #[test]
        fn order_preserved(dir in arb_directory(), query in "[a-zA-Z]{0,5}") {
            let result = filter_stations(&dir, &query);
            let positions: Vec<usize> = result
                .iter()
                .map(|s| dir.iter().position(|d| std::ptr::eq(d, *s)).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
