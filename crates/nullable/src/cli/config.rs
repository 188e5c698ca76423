//! CLI defaults.

use nullable_logging::LogConfig;

pub const APP_NAME: &str = "nullable";

/// Shapes listed by `nullable shapes`, with the aliases each accepts.
pub const SHAPE_ALIASES: &[(&str, &[&str])] = &[
    ("int8", &["i8"]),
    ("int16", &["i16"]),
    ("int32", &["i32"]),
    ("int64", &["i64", "int"]),
    ("uint8", &["u8"]),
    ("uint16", &["u16"]),
    ("uint32", &["u32"]),
    ("uint64", &["u64", "uint"]),
    ("float32", &["f32", "real32"]),
    ("float64", &["f64", "real", "double"]),
    ("bool", &["boolean"]),
    ("bytes", &["blob", "binary"]),
    ("text", &["string", "str"]),
    ("timestamp", &["time", "datetime"]),
    ("opaque", &["any"]),
];

pub fn log_config(verbose: bool, json_mode: bool) -> LogConfig<'static> {
    LogConfig {
        app_name: APP_NAME,
        verbose,
        json_mode,
    }
}
