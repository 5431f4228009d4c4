//! Names
//!
//! Menu, promotion and coupon catalogs are maintained by different people and
//! spell the same item differently: traditional vs. variant characters for
//! "chicken", stray whitespace, a trailing full stop, size qualifiers appended
//! to one copy of a name but not the other, and nugget counts written either as
//! a numeral prefix (`六塊麥克雞塊`) or a digit suffix (`麥克雞塊(6塊)`).
//!
//! Everything here compares names on their normalized form.

use std::sync::LazyLock;

use regex::Regex;

/// Variant form of "chicken" folded onto the canonical form.
const CHICKEN_VARIANT: char = '鷄';

/// Canonical form of "chicken".
const CHICKEN: char = '雞';

/// Marker for small drink sizes.
pub const SMALL_SIZE: &str = "(小)";

/// Marker for medium drink sizes.
pub const MEDIUM_SIZE: &str = "(中)";

/// Substrings that identify a drink.
pub const DRINK_KEYWORDS: [&str; 11] = [
    "可樂", "雪碧", "紅茶", "綠茶", "咖啡", "那堤", "奶茶", "柳丁", "鮮乳", "鮮奶", "奶昔",
];

const FRIES_KEYWORD: &str = "薯條";

const NUGGETS_KEYWORD: &str = "雞塊";

/// Either `<count>塊麥克雞塊`, `麥克雞塊(<digits>塊)`, or a bare `麥克雞塊`.
static NUGGET_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:([0-9]+|二十|[一二三四五六七八九十])塊)?麥克雞塊(?:\(([0-9]+)塊\))?").ok()
});

/// Canonicalize a name for comparison.
///
/// Folds the chicken variant, removes all whitespace and strips one trailing
/// full stop.
pub fn normalize(name: &str) -> String {
    let folded: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == CHICKEN_VARIANT { CHICKEN } else { c })
        .collect();

    match folded.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => folded,
    }
}

/// Fuzzy name comparison.
///
/// True when the normalized names are equal, when one contains the other, or
/// when both describe nuggets with the same piece count.
pub fn matches(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return a == b;
    }

    if a == b || a.contains(&b) || b.contains(&a) {
        return true;
    }

    match (nugget_count(&a), nugget_count(&b)) {
        (Some(Some(count_a)), Some(Some(count_b))) => count_a == count_b,
        _ => false,
    }
}

/// True when `name` fuzzy-matches any entry of `group`.
pub fn matches_any_in_group<S: AsRef<str>>(name: &str, group: &[S]) -> bool {
    group.iter().any(|entry| matches(name, entry.as_ref()))
}

/// True when the name describes a drink.
pub fn is_drink(name: &str) -> bool {
    DRINK_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}

/// True when the name describes fries of any size.
pub fn is_fries(name: &str) -> bool {
    name.contains(FRIES_KEYWORD)
}

/// True when the name describes nuggets of any count.
pub fn is_nuggets(name: &str) -> bool {
    normalize(name).contains(NUGGETS_KEYWORD)
}

/// The medium variant of a small-size name, if it carries the small marker.
pub fn medium_variant(name: &str) -> Option<String> {
    name.contains(SMALL_SIZE)
        .then(|| name.replacen(SMALL_SIZE, MEDIUM_SIZE, 1))
}

/// Piece count of a normalized nugget name.
///
/// `None` when the name is not a nugget item at all, `Some(None)` when it is
/// but carries no count.
fn nugget_count(normalized: &str) -> Option<Option<u32>> {
    let pattern = NUGGET_PATTERN.as_ref()?;
    let captures = pattern.captures(normalized)?;

    let count = captures
        .get(1)
        .and_then(|prefix| numeral_value(prefix.as_str()))
        .or_else(|| {
            captures
                .get(2)
                .and_then(|suffix| suffix.as_str().parse().ok())
        });

    Some(count)
}

/// Value of a numeral written either in digits or as a CJK number word.
fn numeral_value(numeral: &str) -> Option<u32> {
    if let Ok(value) = numeral.parse() {
        return Some(value);
    }

    let value = match numeral {
        "一" => 1,
        "二" => 2,
        "三" => 3,
        "四" => 4,
        "五" => 5,
        "六" => 6,
        "七" => 7,
        "八" => 8,
        "九" => 9,
        "十" => 10,
        "二十" => 20,
        _ => return None,
    };

    Some(value)
}
