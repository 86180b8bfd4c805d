/// How a candidate field relates to a requested fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    None,
    Partial,
    Exact,
}

/// Compare a candidate field against a lowercase `target`.
///
/// Exact is full-string equality after lowercasing the field; partial is
/// substring containment. `target` must be non-empty and already lowercase.
pub fn match_field(value: &str, target: &str) -> MatchKind {
    let value = value.to_lowercase();
    if value == target {
        MatchKind::Exact
    } else if value.contains(target) {
        MatchKind::Partial
    } else {
        MatchKind::None
    }
}
