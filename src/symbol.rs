//! Case-insensitive symbol sets for enum-like values.
//!
//! The store keeps every value as text; enum-like access goes through a
//! table of upper-case names registered by the implementor. Lookups fold
//! case, so `loglevel=Warn` and `loglevel=WARN` resolve identically.

/// A fixed, named value set retrievable via [`Ini::get_symbol`].
///
/// `VARIANTS` entries must carry upper-case names; lookups upper-case the
/// stored text before matching.
///
/// [`Ini::get_symbol`]: crate::Ini::get_symbol
pub trait Symbol: Sized + Copy + 'static {
    /// Set name used in error messages.
    const NAME: &'static str;
    /// Upper-case name to variant table.
    const VARIANTS: &'static [(&'static str, Self)];
}

/// Look up `text` in the variant table of `S`, ignoring case.
pub fn lookup<S: Symbol>(text: &str) -> Option<S> {
    let folded = text.to_ascii_uppercase();
    S::VARIANTS
        .iter()
        .find(|(name, _)| *name == folded)
        .map(|(_, variant)| *variant)
}

/// Every accepted spelling of `S`: the registered names followed by their
/// lower-case forms.
pub fn spellings<S: Symbol>() -> String {
    let names: Vec<&str> = S::VARIANTS.iter().map(|(name, _)| *name).collect();
    let upper = names.join(", ");
    let lower = upper.to_ascii_lowercase();
    format!("{upper}, {lower}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Level {
        Debug,
        Info,
        Warn,
    }

    impl Symbol for Level {
        const NAME: &'static str = "Level";
        const VARIANTS: &'static [(&'static str, Self)] = &[
            ("DEBUG", Level::Debug),
            ("INFO", Level::Info),
            ("WARN", Level::Warn),
        ];
    }

    #[test]
    fn test_lookup_exact() {
        assert_eq!(lookup::<Level>("WARN"), Some(Level::Warn));
    }

    #[test]
    fn test_lookup_folds_case() {
        assert_eq!(lookup::<Level>("warn"), Some(Level::Warn));
        assert_eq!(lookup::<Level>("Info"), Some(Level::Info));
        assert_eq!(lookup::<Level>("dEbUg"), Some(Level::Debug));
    }

    #[test]
    fn test_lookup_rejects_unknown() {
        assert_eq!(lookup::<Level>("trace"), None);
        assert_eq!(lookup::<Level>(""), None);
    }

    #[test]
    fn test_spellings_lists_both_cases() {
        assert_eq!(
            spellings::<Level>(),
            "DEBUG, INFO, WARN, debug, info, warn"
        );
    }
}
