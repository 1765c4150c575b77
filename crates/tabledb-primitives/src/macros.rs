#[macro_export]
macro_rules! field_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Integer,
                label = "INTEGER",
                Numeric,
                widening_rank = Some(0),
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = true,
                is_json_index_target = false
            ),
            (
                Long,
                label = "LONG",
                Numeric,
                widening_rank = Some(1),
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = true,
                is_json_index_target = true
            ),
            (
                Float,
                label = "FLOAT",
                Numeric,
                widening_rank = Some(2),
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = true,
                is_json_index_target = false
            ),
            (
                Double,
                label = "DOUBLE",
                Numeric,
                widening_rank = Some(3),
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = true,
                is_json_index_target = true
            ),
            (
                Number,
                label = "NUMBER",
                Numeric,
                widening_rank = Some(4),
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = true,
                is_json_index_target = true
            ),
            (
                String,
                label = "STRING",
                Textual,
                widening_rank = None,
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = true,
                is_json_index_target = true
            ),
            (
                Boolean,
                label = "BOOLEAN",
                Bool,
                widening_rank = None,
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = true,
                is_json_index_target = true
            ),
            (
                Binary,
                label = "BINARY",
                Binary,
                widening_rank = None,
                is_atomic = true,
                is_key_encodable = false,
                is_json_legal = false,
                is_json_index_target = false
            ),
            (
                FixedBinary,
                label = "FIXED_BINARY",
                Binary,
                widening_rank = None,
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = false,
                is_json_index_target = false
            ),
            (
                Enum,
                label = "ENUM",
                Enum,
                widening_rank = None,
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = false,
                is_json_index_target = false
            ),
            (
                Timestamp,
                label = "TIMESTAMP",
                Temporal,
                widening_rank = None,
                is_atomic = true,
                is_key_encodable = true,
                is_json_legal = false,
                is_json_index_target = false
            ),
            (
                Array,
                label = "ARRAY",
                Complex,
                widening_rank = None,
                is_atomic = false,
                is_key_encodable = false,
                is_json_legal = true,
                is_json_index_target = false
            ),
            (
                Map,
                label = "MAP",
                Complex,
                widening_rank = None,
                is_atomic = false,
                is_key_encodable = false,
                is_json_legal = true,
                is_json_index_target = false
            ),
            (
                Record,
                label = "RECORD",
                Complex,
                widening_rank = None,
                is_atomic = false,
                is_key_encodable = false,
                is_json_legal = false,
                is_json_index_target = false
            ),
            (
                Json,
                label = "JSON",
                Json,
                widening_rank = None,
                is_atomic = false,
                is_key_encodable = false,
                is_json_legal = false,
                is_json_index_target = false
            ),
        }
    };
}

#[macro_export]
macro_rules! field_kind_registry {
    ($macro:ident) => {
        $crate::field_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::field_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($name:ident, label = $label:literal, $family:ident, widening_rank = $rank:expr, is_atomic = $is_atomic:expr, is_key_encodable = $is_key_encodable:expr, is_json_legal = $is_json_legal:expr, is_json_index_target = $is_json_index_target:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::FieldKind::$name => $crate::FieldKindMetadata {
                    family: $crate::KindFamily::$family,
                    widening_rank: $rank,
                    is_atomic: $is_atomic,
                    is_key_encodable: $is_key_encodable,
                    is_json_legal: $is_json_legal,
                    is_json_index_target: $is_json_index_target,
                },
            )*
        }
    };
}

macro_rules! label_from_registry {
    ( @args $kind:expr; @entries $( ($name:ident, label = $label:literal, $family:ident, widening_rank = $rank:expr, is_atomic = $is_atomic:expr, is_key_encodable = $is_key_encodable:expr, is_json_legal = $is_json_legal:expr, is_json_index_target = $is_json_index_target:expr) ),* $(,)? ) => {
        match $kind {
            $( $crate::FieldKind::$name => $label, )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($name:ident, label = $label:literal, $family:ident, widening_rank = $rank:expr, is_atomic = $is_atomic:expr, is_key_encodable = $is_key_encodable:expr, is_json_legal = $is_json_legal:expr, is_json_index_target = $is_json_index_target:expr) ),* $(,)? ) => {
        [ $( $crate::FieldKind::$name ),* ]
    };
}
