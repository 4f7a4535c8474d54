//! Name resolution for output fields.
//!
//! Output units name fields either bare (`vx`), resolved against the
//! block layer, or qualified by an interface (`fault.U`).

use indexmap::IndexMap;
use rupture_core::{FieldSource, FieldView};

/// A read-only view over the block layer's and every interface's fields.
pub struct FieldCatalog<'a> {
    block: &'a dyn FieldSource,
    interfaces: IndexMap<&'a str, &'a dyn FieldSource>,
    names: Vec<String>,
}

impl<'a> FieldCatalog<'a> {
    /// A catalog over the block layer's fields alone.
    pub fn new(block: &'a dyn FieldSource) -> Self {
        let names = block.field_names().into_iter().map(str::to_string).collect();
        Self {
            block,
            interfaces: IndexMap::new(),
            names,
        }
    }

    /// Add an interface's fields under `name.`.
    pub fn with_interface(mut self, name: &'a str, source: &'a dyn FieldSource) -> Self {
        self.names
            .extend(source.field_names().into_iter().map(|f| format!("{name}.{f}")));
        self.interfaces.insert(name, source);
        self
    }
}

impl FieldSource for FieldCatalog<'_> {
    fn field(&self, name: &str) -> Option<FieldView<'_>> {
        match name.split_once('.') {
            Some((iface, field)) => self.interfaces.get(iface)?.field(field),
            None => self.block.field(name),
        }
    }

    fn field_names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rupture_test_utils::MockFieldSource;

    #[test]
    fn bare_and_qualified_names_resolve() {
        let mut block = MockFieldSource::new();
        block.set_field("vx", [2, 1, 1], vec![1.0, 2.0]);
        let mut fault = MockFieldSource::new();
        fault.set_field("U", [1, 1, 1], vec![7.0]);
        let catalog = FieldCatalog::new(&block).with_interface("fault", &fault);

        assert_eq!(catalog.field("vx").unwrap().data, &[1.0, 2.0]);
        assert_eq!(catalog.field("fault.U").unwrap().data, &[7.0]);
        assert!(catalog.field("U").is_none());
        assert!(catalog.field("other.U").is_none());
        assert!(catalog.field("fault.V").is_none());
        assert_eq!(catalog.field_names(), vec!["vx", "fault.U"]);
    }
}
