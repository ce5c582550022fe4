use log::LevelFilter;

/// Install the stderr logger.
///
/// Warnings only by default, debug with `--verbose`. `RUST_LOG` still
/// overrides both.
pub fn init(verbose: bool) {
    let level = default_level(verbose);
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();

    // A second init (e.g. from tests) is harmless
    let _ = builder.try_init();
}

fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), LevelFilter::Warn);
        assert_eq!(default_level(true), LevelFilter::Debug);
    }

    #[test]
    fn test_init_twice_is_ok() {
        init(false);
        init(true);
    }
}
