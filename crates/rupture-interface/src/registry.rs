//! Startup validation of the interface list.
//!
//! [`validate_interfaces`] runs once when the driver is constructed. It
//! checks that interface names can qualify output fields unambiguously
//! and that no interface is registered twice.

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use rupture_core::InterfaceId;

use crate::interface::Interface;

/// Errors from interface list validation (startup-time, not per-step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two interfaces share a name.
    DuplicateName {
        /// The repeated name.
        name: String,
    },
    /// Two interfaces share an ID.
    DuplicateId {
        /// The repeated ID.
        id: InterfaceId,
        /// Name of the first interface with this ID.
        first: String,
        /// Name of the second interface with this ID.
        second: String,
    },
    /// A name is empty or contains characters reserved for field paths.
    InvalidName {
        /// The offending name.
        name: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => write!(f, "interface name '{name}' used twice"),
            Self::DuplicateId { id, first, second } => write!(
                f,
                "interfaces '{first}' and '{second}' both have id {id}"
            ),
            Self::InvalidName { name } => write!(
                f,
                "interface name '{name}' must be non-empty and contain no '.' or whitespace"
            ),
        }
    }
}

impl Error for RegistryError {}

/// Validate an interface list.
///
/// Checks performed:
///
/// 1. Every name is non-empty with no `.` or whitespace (names prefix
///    output field paths such as `fault.U`).
/// 2. Names are unique.
/// 3. IDs are unique.
pub fn validate_interfaces(interfaces: &[Box<dyn Interface>]) -> Result<(), RegistryError> {
    let mut names: IndexMap<&str, usize> = IndexMap::new();
    let mut ids: IndexMap<InterfaceId, usize> = IndexMap::new();

    for (i, iface) in interfaces.iter().enumerate() {
        let name = iface.name();
        if name.is_empty() || name.contains('.') || name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }
        if names.insert(name, i).is_some() {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        if let Some(j) = ids.insert(iface.id(), i) {
            return Err(RegistryError::DuplicateId {
                id: iface.id(),
                first: interfaces[j].name().to_string(),
                second: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InterfaceContext;
    use crate::interface::{InterfaceKind, PhaseCensus};
    use proptest::prelude::*;
    use rupture_core::{EmptyFieldSource, FieldSource, InterfaceError};

    struct Stub {
        name: String,
        id: u32,
    }

    impl Interface for Stub {
        fn name(&self) -> &str {
            &self.name
        }
        fn id(&self) -> InterfaceId {
            InterfaceId(self.id)
        }
        fn kind(&self) -> InterfaceKind {
            InterfaceKind::Free
        }
        fn scale_df(&mut self, _a: f64) {}
        fn calc_df(
            &mut self,
            _dt: f64,
            _ctx: &mut InterfaceContext<'_>,
        ) -> Result<(), InterfaceError> {
            Ok(())
        }
        fn update(&mut self, _b: f64) -> Result<(), InterfaceError> {
            Ok(())
        }
        fn write_fields(&mut self) {}
        fn fields(&self) -> &dyn FieldSource {
            &EmptyFieldSource
        }
        fn census(&self) -> PhaseCensus {
            PhaseCensus::default()
        }
    }

    fn list(items: &[(&str, u32)]) -> Vec<Box<dyn Interface>> {
        items
            .iter()
            .map(|&(name, id)| {
                Box::new(Stub {
                    name: name.to_string(),
                    id,
                }) as Box<dyn Interface>
            })
            .collect()
    }

    #[test]
    fn distinct_interfaces_pass() {
        assert_eq!(validate_interfaces(&list(&[("fault", 0), ("bond", 1)])), Ok(()));
        assert_eq!(validate_interfaces(&[]), Ok(()));
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = validate_interfaces(&list(&[("fault", 0), ("fault", 1)])).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                name: "fault".into()
            }
        );
    }

    #[test]
    fn duplicate_id_names_both_interfaces() {
        let err = validate_interfaces(&list(&[("a", 2), ("b", 2)])).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateId {
                id: InterfaceId(2),
                first: "a".into(),
                second: "b".into(),
            }
        );
    }

    #[test]
    fn dotted_or_empty_names_rejected() {
        assert!(matches!(
            validate_interfaces(&list(&[("main.fault", 0)])),
            Err(RegistryError::InvalidName { .. })
        ));
        assert!(matches!(
            validate_interfaces(&list(&[("", 0)])),
            Err(RegistryError::InvalidName { .. })
        ));
    }

    proptest! {
        #[test]
        fn distinct_names_and_ids_always_pass(
            names in prop::collection::hash_set("[a-z][a-z0-9_]{0,7}", 0..8),
        ) {
            let items: Vec<(&str, u32)> =
                names.iter().zip(0u32..).map(|(n, id)| (n.as_str(), id)).collect();
            prop_assert_eq!(validate_interfaces(&list(&items)), Ok(()));
        }

        #[test]
        fn a_repeated_name_is_always_rejected(
            names in prop::collection::hash_set("[a-z][a-z0-9_]{0,7}", 1..8),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut items: Vec<(&str, u32)> =
                names.iter().zip(0u32..).map(|(n, id)| (n.as_str(), id)).collect();
            let repeated = items[pick.index(items.len())].0;
            items.push((repeated, 100));
            prop_assert_eq!(
                validate_interfaces(&list(&items)),
                Err(RegistryError::DuplicateName { name: repeated.to_string() })
            );
        }
    }
}
