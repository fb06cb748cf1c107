//! Raw label to class id lookup.
//!
//! The table is an immutable value handed to the router, so a run (or a
//! test) can swap in its own mapping without touching any routing logic.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::SortError;
use crate::types::{ClassId, RawLabel};

/// Built-in raw label to class id table
pub const REFERENCE_CLASS_MAPPING: &[(RawLabel, ClassId)] = &[
    (1, 6),
    (2, 8),
    (3, 10),
    (4, 14),
    (5, 106),
    (6, 108),
    (7, 109),
    (8, 110),
    (9, 111),
    (10, 112),
    (11, 114),
    (12, 116),
    (13, 118),
    (14, 120),
    (15, 122),
    (16, 124),
    (17, 151),
    (18, 153),
    (19, 290),
    (20, 152),
];

/// Name of the folder a class is stored under inside a split root
pub fn class_dir_name(class_id: ClassId) -> String {
    class_id.to_string()
}

// On-disk form of a mapping file: `{"1": 6, "2": 8}`
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct MappingFile(BTreeMap<String, ClassId>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMapping {
    table: HashMap<RawLabel, ClassId>,
}

impl ClassMapping {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (RawLabel, ClassId)>,
    {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    pub fn reference() -> Self {
        Self::from_pairs(REFERENCE_CLASS_MAPPING.iter().copied())
    }

    /// Read a mapping from a JSON object of integer-string keys to class ids
    pub fn from_json_file(path: &Path) -> Result<Self, SortError> {
        let file = File::open(path).map_err(|e| SortError::io(path, e))?;
        let MappingFile(raw) = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            SortError::InvalidMapping {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let mut table = HashMap::with_capacity(raw.len());
        for (key, class_id) in raw {
            let label = key
                .trim()
                .parse::<RawLabel>()
                .map_err(|_| SortError::InvalidMapping {
                    path: path.to_path_buf(),
                    reason: format!("key {:?} is not an integer label", key),
                })?;
            if table.insert(label, class_id).is_some() {
                return Err(SortError::InvalidMapping {
                    path: path.to_path_buf(),
                    reason: format!("label {} is listed more than once", label),
                });
            }
        }
        Ok(Self { table })
    }

    /// The mapping file when one is given, the built-in table otherwise
    pub fn load(mapping_file: Option<&Path>) -> Result<Self, SortError> {
        match mapping_file {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::reference()),
        }
    }

    pub fn resolve(&self, label: RawLabel) -> Option<ClassId> {
        self.table.get(&label).copied()
    }

    /// Distinct class ids the mapping can produce, ascending
    pub fn class_ids(&self) -> Vec<ClassId> {
        self.table
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
