//! Packed storage for named output fields.
//!
//! [`FieldStore`] holds a fixed set of fields that all share one shape.
//! The data is contiguous: every field is packed into a single
//! `Vec<f64>` with an offset table for O(1) lookup by name.

use indexmap::IndexMap;
use rupture_core::{FieldSource, FieldView};

use crate::error::ArenaError;

/// Contiguous storage for same-shaped named fields.
#[derive(Clone, Debug)]
pub struct FieldStore {
    shape: [usize; 3],
    data: Vec<f64>,
    /// Maps field name to its offset within `data`.
    offsets: IndexMap<String, usize>,
}

impl FieldStore {
    /// Create zero-initialised storage for `names`, each of `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::DuplicateField`] if a name repeats.
    pub fn new(shape: [usize; 3], names: &[&str]) -> Result<Self, ArenaError> {
        let len = shape.iter().product::<usize>();
        let mut offsets = IndexMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if offsets.insert((*name).to_string(), i * len).is_some() {
                return Err(ArenaError::DuplicateField {
                    name: (*name).to_string(),
                });
            }
        }
        Ok(Self {
            shape,
            data: vec![0.0; len * names.len()],
            offsets,
        })
    }

    /// Shape shared by every field.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Number of values per field.
    pub fn field_len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.offsets.len()
    }

    /// Whether a field called `name` is stored here.
    pub fn contains(&self, name: &str) -> bool {
        self.offsets.contains_key(name)
    }

    /// Read a field's data.
    pub fn read(&self, name: &str) -> Option<&[f64]> {
        let offset = *self.offsets.get(name)?;
        Some(&self.data[offset..offset + self.field_len()])
    }

    /// Mutable access to a field's data.
    pub fn write(&mut self, name: &str) -> Option<&mut [f64]> {
        let offset = *self.offsets.get(name)?;
        let len = self.field_len();
        Some(&mut self.data[offset..offset + len])
    }

    /// Total memory usage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f64>()
    }
}

impl FieldSource for FieldStore {
    fn field(&self, name: &str) -> Option<FieldView<'_>> {
        self.read(name).map(|data| FieldView {
            data,
            shape: self.shape,
        })
    }

    fn field_names(&self) -> Vec<&str> {
        self.offsets.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_zeroed_storage() {
        let store = FieldStore::new([4, 2, 1], &["U", "V"]).unwrap();
        let data = store.read("U").unwrap();
        assert_eq!(data.len(), 8);
        assert!(data.iter().all(|&v| v == 0.0));
        assert_eq!(store.memory_bytes(), 16 * 8);
    }

    #[test]
    fn fields_dont_overlap() {
        let mut store = FieldStore::new([3, 1, 1], &["a", "b"]).unwrap();
        store.write("a").unwrap().fill(1.0);
        store.write("b").unwrap().fill(2.0);
        assert!(store.read("a").unwrap().iter().all(|&v| v == 1.0));
        assert!(store.read("b").unwrap().iter().all(|&v| v == 2.0));
    }

    #[test]
    fn field_source_exposes_views_in_declaration_order() {
        let mut store = FieldStore::new([2, 2, 1], &["S", "Sn"]).unwrap();
        store.write("Sn").unwrap()[3] = -10.0;
        let view = store.field("Sn").unwrap();
        assert_eq!(view.get(1, 1, 0), Some(-10.0));
        assert!(store.field("psi").is_none());
        assert_eq!(store.field_names(), vec!["S", "Sn"]);
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = FieldStore::new([1, 1, 1], &["U", "U"]).unwrap_err();
        assert_eq!(err, ArenaError::DuplicateField { name: "U".into() });
    }
}
