//! Protein name <-> numeric id mapping, per the optional mapping file.

use std::cmp::max;
use std::io::{BufRead, BufReader, Read};

use bimap::BiHashMap;

use crate::error::OdsgError;
use crate::graph::Vertex;

/// A name <-> id bijection. Unknown names seen while reading a dataset
/// get ids starting at `max(seen id) + 1`.
#[derive(Debug, Clone, Default)]
pub struct NameMapping {
    map: BiHashMap<String, Vertex>,
    max_id: Vertex,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses lines of `proteinName id`. A repeated name or id is a
    /// `MalformedInput` error.
    pub fn load(source: impl Read) -> Result<Self, OdsgError> {
        let mut mapping = Self::new();

        for (idx, line) in BufReader::new(source).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let name = parts.next().ok_or_else(|| OdsgError::MalformedInput {
                line: idx + 1,
                detail: "missing protein name".to_string(),
            })?;
            let id_tok = parts.next().ok_or_else(|| OdsgError::MalformedInput {
                line: idx + 1,
                detail: "missing id".to_string(),
            })?;
            let id: Vertex = id_tok.parse().map_err(|_| OdsgError::MalformedInput {
                line: idx + 1,
                detail: format!("'{id_tok}' is not a valid id"),
            })?;

            if mapping.map.contains_left(name) || mapping.map.contains_right(&id) {
                return Err(OdsgError::MalformedInput {
                    line: idx + 1,
                    detail: format!("duplicate mapping entry for '{name}' / id {id}"),
                });
            }

            mapping.map.insert(name.to_string(), id);
            mapping.max_id = max(mapping.max_id, id);
        }

        Ok(mapping)
    }

    /// Returns the id for `name`, assigning the next unused id
    /// (`max(seen id) + 1`) the first time it's seen.
    pub fn id_for(&mut self, name: &str) -> Vertex {
        if let Some(&id) = self.map.get_by_left(name) {
            return id;
        }
        let id = if self.map.is_empty() && self.max_id == 0 {
            0
        } else {
            self.max_id + 1
        };
        self.map.insert(name.to_string(), id);
        self.max_id = max(self.max_id, id);
        id
    }

    pub fn name_for(&self, id: Vertex) -> Option<&str> {
        self.map.get_by_right(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
