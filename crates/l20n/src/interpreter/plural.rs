//! CLDR plural category resolution.
//!
//! The built-in `@plural` macro maps a number to a CLDR plural category for
//! the active locale. English distinguishes "one" and "other"; Russian adds
//! "few" and "many"; Arabic uses all six categories.
//!
//! `PluralRules` construction is not free, so built rules are cached per
//! thread keyed by language code.

use std::cell::RefCell;
use std::collections::HashMap;

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by language code.
    static RULES_CACHE: RefCell<HashMap<&'static str, PluralRules>> =
        RefCell::new(HashMap::new());
}

/// Resolve a language code to a known locale, falling back to English.
///
/// Returns the canonical code alongside the locale so the cache key is a
/// `'static` string.
fn resolve_locale(lang: &str) -> (&'static str, Locale) {
    match lang {
        "ar" => ("ar", locale!("ar")),
        "bn" => ("bn", locale!("bn")),
        "de" => ("de", locale!("de")),
        "el" => ("el", locale!("el")),
        "es" => ("es", locale!("es")),
        "fa" => ("fa", locale!("fa")),
        "fr" => ("fr", locale!("fr")),
        "he" => ("he", locale!("he")),
        "hi" => ("hi", locale!("hi")),
        "id" => ("id", locale!("id")),
        "it" => ("it", locale!("it")),
        "ja" => ("ja", locale!("ja")),
        "ko" => ("ko", locale!("ko")),
        "nl" => ("nl", locale!("nl")),
        "pl" => ("pl", locale!("pl")),
        "pt" => ("pt", locale!("pt")),
        "ro" => ("ro", locale!("ro")),
        "ru" => ("ru", locale!("ru")),
        "th" => ("th", locale!("th")),
        "tr" => ("tr", locale!("tr")),
        "uk" => ("uk", locale!("uk")),
        "vi" => ("vi", locale!("vi")),
        "zh" => ("zh", locale!("zh")),
        _ => ("en", locale!("en")),
    }
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Get the CLDR plural category for a number in a given language.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other". Unknown
/// language codes fall back to English rules.
///
/// # Examples
///
/// ```
/// use l20n::plural_category;
///
/// // English: 1 = "one", everything else = "other"
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
///
/// // Russian: "one", "few", "many" follow more involved rules
/// assert_eq!(plural_category("ru", 1), "one");
/// assert_eq!(plural_category("ru", 2), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(lang: &str, n: i64) -> &'static str {
    let (code, loc) = resolve_locale(lang);
    RULES_CACHE.with_borrow_mut(|cache| {
        let rules = cache.entry(code).or_insert_with(|| {
            PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into())
                .expect("locale should be supported")
        });
        category_str(rules.category_for(n))
    })
}
