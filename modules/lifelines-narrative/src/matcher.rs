/// Spellings of the one couple that unlocks the hand-written story.
///
/// Each entry is an unordered pair. Matching is exact apart from surrounding
/// whitespace and letter case.
pub const SPECIAL_ALIASES: &[(&str, &str)] = &[
    ("李彦", "李梦祥"),
    ("李彦", "李夢祥"),
    ("liyan", "limengxiang"),
    ("LY", "LMX"),
    ("ly", "lmx"),
    ("彦", "梦祥"),
];

/// Whether `{name1, name2}` is one of [`SPECIAL_ALIASES`], in either order.
pub fn matches(name1: &str, name2: &str) -> bool {
    let a = name1.trim().to_lowercase();
    let b = name2.trim().to_lowercase();

    SPECIAL_ALIASES.iter().any(|(x, y)| {
        let x = x.to_lowercase();
        let y = y.to_lowercase();
        (a == x && b == y) || (a == y && b == x)
    })
}
