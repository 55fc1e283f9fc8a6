//! Grouping adjacency lists into candidate clusters by shared signature
//! components ("signature-partitioning").

use std::collections::HashMap;

use xxhash_rust::xxh3::Xxh3Builder;

use crate::graph::Vertex;

use super::shingles::{Shingles, Signature};

/// Signs a collection of adjacency lists and groups the ones that share a
/// signature component.
pub struct SignatureIndex {
    shingles: Shingles,
}

impl SignatureIndex {
    pub fn new(shingles: Shingles) -> Self {
        Self { shingles }
    }

    /// Sign every list.
    pub fn signatures(&self, lists: &[&[Vertex]]) -> Vec<Signature> {
        lists.iter().map(|l| self.shingles.sign(l)).collect()
    }

    /// Group list indices that share a signature component value.
    ///
    /// Each of the `k` components is grouped independently (loose
    /// grouping): a list can appear in more than one group if it matches
    /// different lists under different components. Only groups of size
    /// >= 2 are emitted.
    pub fn group(&self, lists: &[&[Vertex]]) -> Vec<Vec<usize>> {
        let signatures = self.signatures(lists);
        let k = self.shingles.k();

        let mut groups: Vec<Vec<usize>> = Vec::new();
        for component in 0..k {
            let mut by_value: HashMap<u32, Vec<usize>, Xxh3Builder> = HashMap::default();
            for (idx, sig) in signatures.iter().enumerate() {
                by_value.entry(sig[component]).or_default().push(idx);
            }
            for (_value, members) in by_value {
                if members.len() >= 2 {
                    groups.push(members);
                }
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_only_size_two_or_more() {
        let index = SignatureIndex::new(Shingles::with_seed(1, 3));
        let lists: Vec<Vec<Vertex>> = vec![vec![1, 2], vec![3, 4, 5], vec![9]];
        let refs: Vec<&[Vertex]> = lists.iter().map(|l| l.as_slice()).collect();
        for group in index.group(&refs) {
            assert!(group.len() >= 2);
        }
    }

    #[test]
    fn identical_lists_group_together() {
        let index = SignatureIndex::new(Shingles::with_seed(2, 11));
        let lists: Vec<Vec<Vertex>> = vec![vec![1, 2, 3], vec![1, 2, 3], vec![7, 8]];
        let refs: Vec<&[Vertex]> = lists.iter().map(|l| l.as_slice()).collect();
        let groups = index.group(&refs);
        assert!(groups.iter().any(|g| g.contains(&0) && g.contains(&1)));
    }
}
