//! Title slugs for generated page names.

/// Converts a title to a lowercase ASCII slug.
///
/// Characters are transliterated to ASCII first, so "Crème Brûlée" becomes
/// "creme-brulee". Every run of characters that are not ASCII alphanumerics
/// collapses into one hyphen. The result never starts or ends with a hyphen
/// and is empty when the title has no alphanumerics at all.
///
/// # Arguments
///
/// * `title`: Issue title
///
/// # Returns
///
/// Slug safe for use in file names and URLs
pub fn slugify(title: &str) -> String {
    let mut output = String::with_capacity(title.len());

    let mut need_dash = false;
    for ch in title.chars() {
        for b in deunicode::deunicode_char(ch).unwrap_or("-").bytes() {
            if b.is_ascii_alphanumeric() {
                if need_dash {
                    output.push('-');
                    need_dash = false;
                }
                output.push(b.to_ascii_lowercase() as char);
            } else {
                need_dash = !output.is_empty();
            }
        }
    }

    output
}
