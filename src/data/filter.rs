use super::catalog::Category;

/// Return the categories matching a free-text search query.
///
/// The query is trimmed and compared case-insensitively against name and
/// description:
/// * Empty query → every category passes
/// * Otherwise a category passes when either field contains the query
pub fn search<'a>(categories: &'a [Category], query: &str) -> Vec<&'a Category> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return categories.iter().collect();
    }
    categories
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        })
        .collect()
}
