//! Small free-function helpers shared across the crate.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::OdsgError;

/// Read a text file into non-empty, trimmed lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>, OdsgError> {
    Ok(BufReader::new(File::open(path)?)
        .lines()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Count of elements shared between two sorted, deduplicated slices.
///
/// Mirrors the original project's `set_intersection_count`: a linear
/// merge-style walk rather than a materialized intersection set.
pub fn sorted_intersection_count<T: Ord>(lhs: &[T], rhs: &[T]) -> usize {
    let (mut li, mut ri) = (0, 0);
    let mut count = 0;
    while li < lhs.len() && ri < rhs.len() {
        match lhs[li].cmp(&rhs[ri]) {
            std::cmp::Ordering::Less => li += 1,
            std::cmp::Ordering::Greater => ri += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                li += 1;
                ri += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_count_disjoint() {
        assert_eq!(sorted_intersection_count(&[1, 2, 3], &[4, 5, 6]), 0);
    }

    #[test]
    fn intersection_count_overlap() {
        assert_eq!(sorted_intersection_count(&[1, 2, 3, 4], &[2, 4, 6]), 2);
    }
}
