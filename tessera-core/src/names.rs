//! Deterministic de-duplication of part names.

use std::collections::HashSet;

/// Makes part names unique while preserving their order.
///
/// The first occurrence of a name keeps it. Each later duplicate receives the
/// smallest `_<k>` suffix (`k >= 2`) that collides neither with a name already
/// assigned nor with any name present in the input, so names that were
/// unique to begin with are never renamed.
///
/// # Examples
/// ```
/// use tessera_core::unique_names;
///
/// let names = unique_names(["bolt", "bolt", "nut", "bolt_2", "bolt"].map(String::from));
/// assert_eq!(names, ["bolt", "bolt_3", "nut", "bolt_2", "bolt_4"]);
/// ```
#[must_use]
pub fn unique_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let names: Vec<String> = names.into_iter().collect();
    let original: HashSet<&str> = names.iter().map(String::as_str).collect();
    let mut assigned: HashSet<String> = HashSet::with_capacity(names.len());
    let mut first_seen: HashSet<&str> = HashSet::with_capacity(names.len());
    let mut unique = Vec::with_capacity(names.len());

    for name in &names {
        let candidate = if first_seen.insert(name.as_str()) && !assigned.contains(name) {
            name.clone()
        } else {
            (2_usize..)
                .map(|suffix| format!("{name}_{suffix}"))
                .find(|candidate| {
                    !assigned.contains(candidate) && !original.contains(candidate.as_str())
                })
                .unwrap_or_else(|| name.clone())
        };
        assigned.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}
