#![no_main]

use libfuzzer_sys::fuzz_target;
use marketsearch::entity::BusinessSearch;
use marketsearch::query::{build_match_predicate, tokenize, MatchMode};

fuzz_target!(|data: &str| {
    let tokens = tokenize(data);
    for token in &tokens {
        assert!(!token.term.trim().is_empty());
        assert!(!token.term.contains('"'));
    }

    let _ = build_match_predicate(&tokens, MatchMode::Partial, &BusinessSearch);
});
