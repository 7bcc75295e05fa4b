use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Pairwise-distinct random words of 6 to 8 uppercase/digit characters.
pub(crate) fn random_words(rng: &mut StdRng, count: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::with_capacity(count);
    while words.len() < count {
        let len = rng.gen_range(6..=8);
        let word: String = (0..len)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect();
        if seen.insert(word.clone()) {
            words.push(word);
        }
    }
    words
}
