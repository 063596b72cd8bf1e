use inflector::string::pluralize::to_plural;

/// Returns the English plural of a resource name.
///
/// Uses the Rails inflection rules, including their irregular and
/// uncountable word lists.
///
/// # Examples
///
/// ```
/// use jsonapi_util::strings::pluralize;
///
/// assert_eq!(pluralize("post"), "posts");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("person"), "people");
/// ```
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    to_plural(word)
}
