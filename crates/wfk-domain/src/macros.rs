//! Domain macros.
//!
//! A single small macro used by the `entities` and `schema` modules to define
//! string-backed enums uniformly: `Display`/`FromStr` via `strum`, serde in
//! `snake_case`, and a `schemars` impl so the value can be exposed as an MCP
//! tool input schema.

/// Define an enum whose wire representation is a lowercase snake_case string.
#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            strum_macros::Display,
            strum_macros::EnumString,
            strum_macros::AsRefStr,
            serde::Serialize,
            serde::Deserialize,
            schemars::JsonSchema,
        )]
        #[strum(serialize_all = "snake_case")]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }
    };
}
