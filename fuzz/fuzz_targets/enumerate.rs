#![no_main]

extern crate approx;
extern crate arbitrary;
extern crate deck_odds;
extern crate libfuzzer_sys;

use approx::assert_abs_diff_eq;

use deck_odds::analysis::Analyzer;
use deck_odds::core::{CardGroup, MAX_POPULATION};

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub groups: Vec<CardGroup<u8>>,
    pub hand_size: u8,
}

fuzz_target!(|input: Input| {
    // Keep the search small enough to finish quickly
    if input.groups.is_empty() || input.groups.len() > 8 {
        return;
    }
    if input.groups.iter().any(|g| g.size() > 16) {
        return;
    }
    let deck_size: usize = input.groups.iter().map(CardGroup::size).sum();
    let hand_size = usize::from(input.hand_size) % 11;
    if deck_size == 0 || deck_size > MAX_POPULATION || hand_size > deck_size {
        return;
    }

    // Arbitrary groups may have broken ranges or repeated names, both of
    // which have to be rejected rather than enumerated
    let analyzer = match Analyzer::new("fuzz", hand_size, input.groups.clone()) {
        Ok(analyzer) => analyzer,
        Err(_) => {
            let mut names: Vec<u8> = input.groups.iter().map(|g| *g.name()).collect();
            names.sort_unstable();
            names.dedup();
            assert!(
                names.len() < input.groups.len()
                    || input.groups.iter().any(|g| g.validate().is_err())
            );
            return;
        }
    };
    let groups = input.groups;
    let unrestricted = groups.iter().all(CardGroup::is_unrestricted);

    let mut total = 0.0;
    for hand in analyzer.combinations() {
        assert_eq!(hand.total(), hand_size);
        assert!(hand.is_complete_for(groups.iter().map(CardGroup::name)));
        for group in &groups {
            let count = hand.count_of(group.name());
            assert!(count >= group.minimum() && count <= group.maximum());
        }
        let p = analyzer.probability_of(hand);
        assert!((0.0..=1.0).contains(&p));
        total += p;
    }

    // Ranges cut hands away, so only a full deck has to sum to one
    if unrestricted {
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
    } else {
        assert!(total <= 1.0 + 1e-9);
    }
});
