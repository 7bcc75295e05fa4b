use num_traits::Zero;

use crate::bktree::node::Node;
use crate::error::{BkIndexError, Result};
use crate::metric::{Levenshtein, Metric};
use crate::r#type::DistanceNum;

/// A search hit: a stored word and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a, D: DistanceNum> {
    /// The stored word.
    pub word: &'a str,
    /// Distance between the stored word and the query.
    pub distance: D,
}

/// A mutable BK-tree over strings.
///
/// Every word is stored in a node whose position is determined by its
/// distance from each ancestor under the injected [`Metric`]: for every
/// child entry `(d, c)` of a node `n`, `metric.distance(n.word, c.word) ==
/// d`. That invariant is what [`search`][BkTree::search] relies on to prune,
/// and what [`remove`][BkTree::remove] restores by reinserting the detached
/// subtree's words.
///
/// ```
/// use bk_index::bktree::BkTree;
///
/// let mut tree: BkTree = BkTree::new();
/// tree.insert("cat").unwrap();
/// tree.insert("cart").unwrap();
/// assert_eq!(tree.search("cast", 1).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BkTree<M: Metric = Levenshtein> {
    pub(crate) root: Option<Node<M::Distance>>,
    pub(crate) num_nodes: usize,
    metric: M,
}

impl<M: Metric + Default> BkTree<M> {
    /// Create an empty tree with the metric's default configuration.
    pub fn new() -> Self {
        Self::with_metric(M::default())
    }
}

impl<M: Metric + Default> Default for BkTree<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Metric> BkTree<M> {
    /// Create an empty tree using the provided metric.
    pub fn with_metric(metric: M) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            metric,
        }
    }

    /// The metric this tree measures distances with.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Number of words stored.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns `true` if no words are stored.
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// The word at the root of the tree, if any.
    ///
    /// The first inserted word stays the root until it is removed.
    pub fn root_word(&self) -> Option<&str> {
        self.root.as_ref().map(|root| root.word.as_str())
    }

    /// Drop every stored word.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Insert `word` into the tree.
    ///
    /// The first word inserted into an empty tree becomes the root. Inserting
    /// a word that is already stored fails with
    /// [`BkIndexError::DuplicateWord`]; the check happens while descending,
    /// before any mutation, so a failed insert leaves the whole tree
    /// untouched.
    pub fn insert(&mut self, word: impl Into<String>) -> Result<()> {
        let word = word.into();
        match self.root.as_mut() {
            Some(root) => root.insert(word, &self.metric)?,
            None => self.root = Some(Node::new(word)),
        }
        self.num_nodes += 1;
        Ok(())
    }

    /// Every stored word within `max_distance` of `query`.
    ///
    /// Hits carry their distance to the query. Order is the traversal order
    /// (pre-order, children in ascending distance-key order), not sorted by
    /// distance. With `max_distance` of zero this returns at most one hit:
    /// the query itself, if stored.
    pub fn search(&self, query: &str, max_distance: M::Distance) -> Vec<Match<'_, M::Distance>> {
        let mut hits = Vec::new();
        if let Some(root) = &self.root {
            root.search(query, max_distance, &self.metric, &mut hits);
        }
        hits
    }

    /// Returns `true` if `word` is stored, descending one distance slot per
    /// level rather than scanning.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = self.root.as_ref();
        while let Some(current) = node {
            if current.word == word {
                return true;
            }
            node = current.child(self.metric.distance(&current.word, word));
        }
        false
    }

    /// The word of the node `word` hangs from.
    ///
    /// Returns `Ok(None)` when `word` is the root (it has no parent), and
    /// [`BkIndexError::WordNotFound`] when `word` is not stored at all.
    pub fn parent_of(&self, word: &str) -> Result<Option<&str>> {
        let not_found = || BkIndexError::WordNotFound(word.to_owned());
        let root = self.root.as_ref().ok_or_else(not_found)?;
        if root.word == word {
            return Ok(None);
        }
        let parent = root.parent_of(word, &self.metric).ok_or_else(not_found)?;
        Ok(Some(parent.word.as_str()))
    }

    /// Remove `word` from the tree.
    ///
    /// Detaching a node orphans its descendants: their distance keys were
    /// relative to the removed node, so they cannot be spliced in anywhere
    /// else. Instead the whole detached subtree is flattened to words and
    /// every survivor is reinserted from the root, which re-derives a correct
    /// position for each. Removing the root rebuilds the tree the same way;
    /// the words are collected in ascending pre-order, so the old root's
    /// minimum-distance child becomes the new root.
    ///
    /// Removing from an empty tree is a no-op; removing an absent word fails
    /// with [`BkIndexError::WordNotFound`] and leaves the tree untouched.
    /// Cost is proportional to the detached subtree size times tree depth.
    pub fn remove(&mut self, word: &str) -> Result<()> {
        let Some(root) = self.root.as_mut() else {
            return Ok(());
        };
        if root.word == word {
            return self.rebuild_without_root();
        }
        let Some(removed) = root.detach(word, &self.metric) else {
            return Err(BkIndexError::WordNotFound(word.to_owned()));
        };

        self.num_nodes -= removed.subtree_len();
        let mut words = Vec::new();
        removed.collect_words(&mut words);
        // The removed word itself is first in the collection; everything
        // after it survives.
        for survivor in words.into_iter().skip(1) {
            self.insert(survivor)?;
        }
        Ok(())
    }

    fn rebuild_without_root(&mut self) -> Result<()> {
        let Some(old_root) = self.root.take() else {
            return Ok(());
        };
        let mut words = Vec::new();
        old_root.collect_words(&mut words);
        self.num_nodes = 0;
        for survivor in words.into_iter().skip(1) {
            self.insert(survivor)?;
        }
        Ok(())
    }

    /// Render the tree as one line per node for debugging:
    /// `word:cc[child_count] (distance_from_parent)`, indented by depth, with
    /// the root shown at distance 0. An empty `indent_unit` falls back to
    /// `". "`. Returns the empty string for an empty tree.
    pub fn pretty_print(&self, indent_unit: &str) -> String {
        let unit = if indent_unit.is_empty() {
            ". "
        } else {
            indent_unit
        };
        let mut out = String::new();
        if let Some(root) = &self.root {
            root.render(&mut out, 0, unit, M::Distance::zero());
        }
        out
    }

    /// Iterate over the stored words in pre-order, children in ascending
    /// distance-key order.
    pub fn iter(&self) -> Iter<'_, M::Distance> {
        Iter {
            stack: self.root.iter().collect(),
        }
    }
}

#[cfg(test)]
impl<M: Metric> BkTree<M> {
    /// Assert the BK-tree property, the cached child counts, and that
    /// `num_nodes` matches the reachable node count.
    pub(crate) fn assert_invariants(&self) {
        let reachable = self
            .root
            .as_ref()
            .map_or(0, |root| root.assert_consistent(&self.metric));
        assert_eq!(reachable, self.num_nodes);
    }
}

/// Iterator over the words of a [`BkTree`], returned by
/// [`iter`][BkTree::iter].
#[derive(Debug)]
pub struct Iter<'a, D: DistanceNum> {
    stack: Vec<&'a Node<D>>,
}

impl<'a, D: DistanceNum> Iterator for Iter<'a, D> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the smallest distance key is popped first.
        self.stack.extend(node.children().rev());
        Some(&node.word)
    }
}
