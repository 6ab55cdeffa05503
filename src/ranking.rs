use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of the final result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeakerCount {
    pub speaker: String,
    pub words: u64,
}

impl SpeakerCount {
    pub fn new(speaker: impl Into<String>, words: u64) -> Self {
        Self {
            speaker: speaker.into(),
            words,
        }
    }
}

/// Speakers ordered by word count, derived once after aggregation
pub type RankedResult = Vec<SpeakerCount>;

/// Most words first; equal counts by name, where a name sorts before any
/// longer name it is a prefix of ("aa" < "aaa" < "ab").
pub fn compare_ranked(a: &SpeakerCount, b: &SpeakerCount) -> Ordering {
    b.words
        .cmp(&a.words)
        .then_with(|| a.speaker.as_bytes().cmp(b.speaker.as_bytes()))
}

/// Rank a tally snapshot
pub fn rank(tallies: HashMap<String, u64>) -> RankedResult {
    let mut ranked: RankedResult = tallies
        .into_iter()
        .map(|(speaker, words)| SpeakerCount { speaker, words })
        .collect();
    ranked.sort_unstable_by(compare_ranked);
    ranked
}

/// Render `name<TAB>count` lines
pub fn to_tsv(ranked: &[SpeakerCount]) -> String {
    let mut out = String::with_capacity(ranked.len() * 16);
    for entry in ranked {
        out.push_str(&format!("{}\t{}\n", entry.speaker, entry.words));
    }
    out
}
