use std::collections::HashSet;
use std::sync::OnceLock;

/// Initialisms that are lowercased as a whole instead of only their first
/// letter, e.g. `ID` becomes `id` rather than `iD`.
pub const COMMON_INITIALISMS: &[&str] = &[
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SSH", "TLS", "TTL", "UI", "UID",
    "UUID", "URI", "URL", "UTF8", "VM", "XML", "JWT",
];

fn initialisms() -> &'static HashSet<&'static str> {
    static TABLE: OnceLock<HashSet<&'static str>> = OnceLock::new();
    TABLE.get_or_init(|| COMMON_INITIALISMS.iter().copied().collect())
}

/// Returns `true` if `word` is one of the [`COMMON_INITIALISMS`].
///
/// The lookup is case-sensitive: `"Id"` is not an initialism.
pub fn is_initialism(word: &str) -> bool {
    initialisms().contains(word)
}

/// Converts a member name into the key used for it in a JSON document.
///
/// Known initialisms are lowercased entirely; every other name only gets its
/// first character lowercased.
///
/// # Examples
///
/// ```
/// use jsonapi_util::strings::jsonify;
///
/// assert_eq!(jsonify("ID"), "id");
/// assert_eq!(jsonify("URL"), "url");
/// assert_eq!(jsonify("FirstName"), "firstName");
/// assert_eq!(jsonify("UserID"), "userID");
/// assert_eq!(jsonify(""), "");
/// ```
pub fn jsonify(name: &str) -> String {
    if is_initialism(name) {
        return name.to_lowercase();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
