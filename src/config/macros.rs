/// Configuration macro for single-declaration config sections
///
/// `config_struct!` declares a config section with every field's default
/// next to its type, and generates:
/// - the struct with public fields
/// - a `Default` impl built from the listed values
/// - serde support with `#[serde(default)]`, so a TOML file may omit any key
///
/// # Example
/// ```ignore
/// config_struct! {
///     pub struct NotificationsConfig {
///         enabled: bool = true,
///         interval_secs: u64 = 60,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
