#[macro_use]
mod macros;

///
/// FieldKind
///
/// Canonical field kind used for shared capability metadata.
/// One variant per type descriptor shape; sentinels are not kinds.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FieldKind {
    Integer,
    Long,
    Float,
    Double,
    Number,
    String,
    Boolean,
    Binary,
    FixedBinary,
    Enum,
    Timestamp,
    Array,
    Map,
    Record,
    Json,
}

impl FieldKind {
    /// Return the full metadata descriptor for one kind.
    #[must_use]
    pub const fn metadata(self) -> FieldKindMetadata {
        field_kind_registry!(metadata_from_registry, self)
    }

    /// Stable upper-case label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        field_kind_registry!(label_from_registry, self)
    }

    /// Return the coarse family used for cross-kind routing.
    #[must_use]
    pub const fn family(self) -> KindFamily {
        self.metadata().family
    }

    /// Return whether this kind belongs to the numeric widening ladder.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.metadata().widening_rank.is_some()
    }

    /// Position on the int → long → float → double → number ladder.
    #[must_use]
    pub const fn widening_rank(self) -> Option<u8> {
        self.metadata().widening_rank
    }

    /// Return whether `self` widens into `target` without failing.
    #[must_use]
    pub const fn widens_to(self, target: Self) -> bool {
        match (self.widening_rank(), target.widening_rank()) {
            (Some(from), Some(to)) => from <= to,
            _ => false,
        }
    }

    /// Return whether this kind holds a single scalar payload.
    #[must_use]
    pub const fn is_atomic(self) -> bool {
        self.metadata().is_atomic
    }

    /// Return whether values of this kind have an order-preserving encoding.
    #[must_use]
    pub const fn is_key_encodable(self) -> bool {
        self.metadata().is_key_encodable
    }

    /// Return whether values of this kind may appear inside a JSON document.
    #[must_use]
    pub const fn is_json_legal(self) -> bool {
        self.metadata().is_json_legal
    }

    /// Return whether a JSON index path may declare this kind as its type.
    #[must_use]
    pub const fn is_json_index_target(self) -> bool {
        self.metadata().is_json_index_target
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

///
/// FieldKindMetadata
///
/// Capability metadata shared across descriptor/value/key layers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldKindMetadata {
    pub family: KindFamily,
    pub widening_rank: Option<u8>,
    pub is_atomic: bool,
    pub is_key_encodable: bool,
    pub is_json_legal: bool,
    pub is_json_index_target: bool,
}

///
/// KindFamily
///
/// Coarse routing family. Declaration order is the cross-family order used
/// by the total key comparator.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum KindFamily {
    Numeric,
    Textual,
    Enum,
    Bool,
    Temporal,
    Binary,
    Complex,
    Json,
}

/// Ordered list of all kinds in registry order.
pub const ALL_FIELD_KINDS: [FieldKind; 15] = field_kind_registry!(all_kinds_from_registry);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_ladder_is_monotonic() {
        let ladder = [
            FieldKind::Integer,
            FieldKind::Long,
            FieldKind::Float,
            FieldKind::Double,
            FieldKind::Number,
        ];

        for (i, from) in ladder.iter().enumerate() {
            for (j, to) in ladder.iter().enumerate() {
                assert_eq!(from.widens_to(*to), i <= j, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn non_numeric_kinds_never_widen() {
        for kind in ALL_FIELD_KINDS {
            if kind.is_numeric() {
                continue;
            }
            assert!(!kind.widens_to(FieldKind::Number), "{kind} must not widen");
            assert!(!FieldKind::Long.widens_to(kind), "long must not widen to {kind}");
        }
    }

    #[test]
    fn only_fixed_length_binary_is_key_encodable() {
        assert!(!FieldKind::Binary.is_key_encodable());
        assert!(FieldKind::FixedBinary.is_key_encodable());
        assert!(FieldKind::Boolean.is_key_encodable());
    }

    #[test]
    fn complex_kinds_are_not_atomic() {
        for kind in ALL_FIELD_KINDS {
            let complex = matches!(kind.family(), KindFamily::Complex | KindFamily::Json);
            assert_eq!(kind.is_atomic(), !complex, "{kind}");
            if !kind.is_atomic() {
                assert!(!kind.is_key_encodable(), "{kind}");
            }
        }
    }

    #[test]
    fn labels_are_upper_case_type_names() {
        assert_eq!(FieldKind::Integer.label(), "INTEGER");
        assert_eq!(FieldKind::FixedBinary.label(), "FIXED_BINARY");
        for kind in ALL_FIELD_KINDS {
            let label = kind.label();
            assert_eq!(label, label.to_ascii_uppercase(), "{kind:?}");
        }
    }

    #[test]
    fn json_index_targets_are_json_legal() {
        for kind in ALL_FIELD_KINDS {
            if kind.is_json_index_target() {
                assert!(kind.is_json_legal(), "{kind}");
            }
        }
    }
}
