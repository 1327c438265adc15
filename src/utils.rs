/// Collapses every run of whitespace into a single space and trims both ends
///
/// # Arguments
///
/// * `text` - The text to clean up
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits free text into list items on commas and line breaks, trimming each item
/// and skipping empty ones.
///
/// # Arguments
///
/// * `text` - Text such as `"a, b,\nc"`
pub fn split_list_items(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Rewrites a JSON-like literal that uses single quotes into one using double quotes.
///
/// Upstream pipelines sometimes hand over the `repr` of a mapping instead of JSON,
/// e.g. `{'TITLE': 'Foo'}`. Every single quote is treated as a double quote.
pub fn requote_single_quotes(literal: &str) -> String {
    literal.replace('\'', "\"")
}

/// Checks whether a section heading names the given section, ignoring case,
/// surrounding whitespace, and trailing punctuation such as `"Abstract:"`.
pub fn is_heading(text: &str, heading: &str) -> bool {
    text.trim()
        .trim_end_matches(|c: char| c == ':' || c == '.' || c == '-')
        .trim_end()
        .eq_ignore_ascii_case(heading)
}
