#![no_main]

use std::path::Path;

use hew_grammar::grammar::{GrammarDocument, to_json_string};
use hew_grammar::sync::synchronize;
use hew_vocab::scopes::HEW;
use hew_vocab::taxonomy::Taxonomy;
use libfuzzer_sys::fuzz_target;

const TAXONOMY: &str = include_str!("../../tests/fixtures/syntax-data.json");

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Shape validation must reject, never panic
        if let Ok(mut grammar) = GrammarDocument::parse(s, Path::new("fuzz.json")) {
            // Anything that validates must survive a sync and serialize back
            if let Ok(taxonomy) = serde_json::from_str::<Taxonomy>(TAXONOMY) {
                let _ = synchronize(&mut grammar, &taxonomy, &HEW);
            }
            let _ = to_json_string(&grammar);
        }
    }
});
