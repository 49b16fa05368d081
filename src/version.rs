const fn unwrap_or_cargo_version(opt: Option<&'static str>) -> &'static str {
    match opt {
        Some(val) => val,
        None => env!("CARGO_PKG_VERSION"),
    }
}

/// Release builds may stamp `SUPPLYCHAIN_VERSION`; local builds fall back to the crate version.
pub const VERSION: &str = unwrap_or_cargo_version(option_env!("SUPPLYCHAIN_VERSION"));
