use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use num_traits::{SaturatingAdd, SaturatingSub};

use crate::bktree::index::Match;
use crate::error::{BkIndexError, Result};
use crate::metric::Metric;
use crate::r#type::DistanceNum;

/// A single vocabulary entry plus its children, keyed by exact distance.
///
/// The `BTreeMap` keeps child traversal in ascending distance-key order, so
/// every walk over the tree is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node<D: DistanceNum> {
    pub(crate) word: String,
    children: BTreeMap<D, Node<D>>,
    child_count: usize,
}

impl<D: DistanceNum> Node<D> {
    pub(crate) fn new(word: String) -> Self {
        Self {
            word,
            children: BTreeMap::new(),
            child_count: 0,
        }
    }

    pub(crate) fn child(&self, dist: D) -> Option<&Node<D>> {
        self.children.get(&dist)
    }

    /// Children in ascending distance-key order.
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = &Node<D>> {
        self.children.values()
    }

    /// Descend from this node and attach `word` at the first vacant slot on
    /// its distance path. The duplicate check runs before any mutation.
    pub(crate) fn insert<M>(&mut self, word: String, metric: &M) -> Result<()>
    where
        M: Metric<Distance = D>,
    {
        if self.word == word {
            return Err(BkIndexError::DuplicateWord(word));
        }
        let dist = metric.distance(&self.word, &word);
        match self.children.entry(dist) {
            Entry::Vacant(slot) => {
                slot.insert(Node::new(word));
                self.child_count += 1;
                Ok(())
            }
            Entry::Occupied(slot) => slot.into_mut().insert(word, metric),
        }
    }

    /// Collect every word within `max_distance` of `query` into `hits`.
    ///
    /// Only children whose key lies in
    /// `[dist - max_distance, dist + max_distance]` can hold a match, by the
    /// triangle inequality.
    pub(crate) fn search<'a, M>(
        &'a self,
        query: &str,
        max_distance: D,
        metric: &M,
        hits: &mut Vec<Match<'a, D>>,
    ) where
        M: Metric<Distance = D>,
    {
        let dist = metric.distance(&self.word, query);
        if dist <= max_distance {
            hits.push(Match {
                word: &self.word,
                distance: dist,
            });
        }

        let lower = SaturatingSub::saturating_sub(&dist, &max_distance);
        let upper = SaturatingAdd::saturating_add(&dist, &max_distance);
        for (_, child) in self.children.range(lower..=upper) {
            child.search(query, max_distance, metric, hits);
        }
    }

    /// Find the node whose direct child holds `word`.
    ///
    /// A node's position is fully determined by its distance from each
    /// ancestor, so only the single slot at `dist` needs checking per level.
    pub(crate) fn parent_of<M>(&self, word: &str, metric: &M) -> Option<&Node<D>>
    where
        M: Metric<Distance = D>,
    {
        let dist = metric.distance(&self.word, word);
        let child = self.children.get(&dist)?;
        if child.word == word {
            Some(self)
        } else {
            child.parent_of(word, metric)
        }
    }

    /// Detach and return the descendant holding `word`, along with its whole
    /// subtree. Returns `None` if `word` is not below this node.
    pub(crate) fn detach<M>(&mut self, word: &str, metric: &M) -> Option<Node<D>>
    where
        M: Metric<Distance = D>,
    {
        let dist = metric.distance(&self.word, word);
        match self.children.entry(dist) {
            Entry::Occupied(slot) if slot.get().word == word => {
                let detached = slot.remove();
                self.child_count -= 1;
                Some(detached)
            }
            Entry::Occupied(slot) => slot.into_mut().detach(word, metric),
            Entry::Vacant(_) => None,
        }
    }

    /// Number of nodes in this subtree, including this node.
    pub(crate) fn subtree_len(&self) -> usize {
        1 + self.children.values().map(Node::subtree_len).sum::<usize>()
    }

    /// Consume the subtree, appending its words in pre-order (children in
    /// ascending distance-key order). The first word pushed is this node's
    /// own.
    pub(crate) fn collect_words(self, words: &mut Vec<String>) {
        words.push(self.word);
        for (_, child) in self.children {
            child.collect_words(words);
        }
    }

    /// Append one `word:cc[child_count] (distance)` line per node, indented
    /// by depth.
    pub(crate) fn render(&self, out: &mut String, depth: usize, unit: &str, dist: D) {
        let _ = writeln!(
            out,
            "{}{}:cc[{}] ({})",
            unit.repeat(depth),
            self.word,
            self.child_count,
            dist
        );
        for (child_dist, child) in &self.children {
            child.render(out, depth + 1, unit, *child_dist);
        }
    }
}

#[cfg(test)]
impl<D: DistanceNum> Node<D> {
    /// Walk the subtree asserting the BK-tree property and the cached child
    /// counts; returns the number of nodes visited.
    pub(crate) fn assert_consistent<M>(&self, metric: &M) -> usize
    where
        M: Metric<Distance = D>,
    {
        assert_eq!(self.child_count, self.children.len());
        let mut total = 1;
        for (dist, child) in &self.children {
            assert_eq!(metric.distance(&self.word, &child.word), *dist);
            total += child.assert_consistent(metric);
        }
        total
    }
}
