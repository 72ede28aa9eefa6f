/// URL slug for a title: transliterated to ASCII, lower-cased, with every run
/// of non-alphanumeric characters turned into a single `-`.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode::deunicode(title);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn collapses_separators_and_lowercases() {
        assert_eq!(slugify("  Hello,   World! "), "hello-world");
    }

    #[test]
    fn transliterates_non_ascii() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
    }

    #[test]
    fn punctuation_only_gives_empty_slug() {
        assert_eq!(slugify("?!"), "");
    }
}
