use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::bktree::BkTree;
use crate::metric::{Levenshtein, Metric};
use crate::test::util::random_words;

/// Mutate one position of `word` so queries land near, but usually not on,
/// stored words.
fn perturb(rng: &mut StdRng, word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    let pos = rng.gen_range(0..chars.len());
    chars[pos] = char::from(b'A' + rng.gen_range(0..26));
    chars.into_iter().collect()
}

#[test]
fn search_agrees_with_linear_scan_across_removals() {
    let mut rng = StdRng::seed_from_u64(42);
    let words = random_words(&mut rng, 300);
    let metric: Levenshtein<u32> = Levenshtein::new();

    let mut tree: BkTree = BkTree::new();
    for word in &words {
        tree.insert(word.clone()).unwrap();
    }
    let mut live = words;

    for _ in 0..30 {
        let victim = live.swap_remove(rng.gen_range(0..live.len()));
        tree.remove(&victim).unwrap();
        tree.assert_invariants();
        assert_eq!(tree.len(), live.len());
        assert!(!tree.contains(&victim));

        for _ in 0..5 {
            let idx = rng.gen_range(0..live.len());
            let query = perturb(&mut rng, &live[idx]);
            for max_distance in 0..=2u32 {
                let mut got: Vec<&str> = tree
                    .search(&query, max_distance)
                    .iter()
                    .map(|hit| hit.word)
                    .collect();
                got.sort_unstable();

                let mut want: Vec<&str> = live
                    .iter()
                    .filter(|word| metric.distance(word.as_str(), &query) <= max_distance)
                    .map(String::as_str)
                    .collect();
                want.sort_unstable();

                assert_eq!(got, want, "query {query:?} at radius {max_distance}");
            }
        }
    }
}

#[test]
fn removing_every_word_drains_the_tree() {
    let mut rng = StdRng::seed_from_u64(7);
    let words = random_words(&mut rng, 120);

    let mut tree: BkTree = BkTree::new();
    for word in &words {
        tree.insert(word.clone()).unwrap();
    }

    let mut order = words;
    order.shuffle(&mut rng);
    for (removed, word) in order.iter().enumerate() {
        tree.remove(word).unwrap();
        tree.assert_invariants();
        assert_eq!(tree.len(), order.len() - removed - 1);
        assert!(!tree.contains(word));
    }

    assert!(tree.is_empty());
    assert_eq!(tree.root_word(), None);
    assert_eq!(tree.pretty_print(""), "");
}

#[test]
fn every_survivor_stays_findable_after_each_removal() {
    let mut rng = StdRng::seed_from_u64(1234);
    let words = random_words(&mut rng, 80);

    let mut tree: BkTree = BkTree::new();
    for word in &words {
        tree.insert(word.clone()).unwrap();
    }

    let mut live = words;
    while live.len() > 40 {
        let victim = live.swap_remove(rng.gen_range(0..live.len()));
        tree.remove(&victim).unwrap();
        for word in &live {
            let hits = tree.search(word, 0);
            assert_eq!(hits.len(), 1, "{word:?} lost after removing {victim:?}");
            assert_eq!(hits[0].word, word.as_str());
        }
    }
}
