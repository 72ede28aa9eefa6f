use std::sync::LazyLock;

use regex::{Captures, Regex};

static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r">\s+<").expect("Failed to compile between-tags regex - this is a bug")
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("Failed to compile whitespace regex - this is a bug")
});

static AFTER_OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<([A-Za-z][A-Za-z0-9]*)[^>]*>)\s+")
        .expect("Failed to compile opening-tag regex - this is a bug")
});

// Void elements have no content to trim into; the space after them is text.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

static BEFORE_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+(</[A-Za-z][^>]*>)").expect("Failed to compile closing-tag regex - this is a bug")
});

// Inline elements whose boundary spaces were removed by the between-tags pass.
static ADJACENT_INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(</(?:a|strong|em|code)>)(<(?:a|strong|em|code)[\s>])")
        .expect("Failed to compile adjacent-inline regex - this is a bug")
});

/// Collapses redundant whitespace in normalized markup.
///
/// The passes run in a fixed order and later passes depend on earlier ones:
/// 1. whitespace between two tags is removed
/// 2. remaining whitespace runs become one space
/// 3. whitespace after an opening tag and before a closing tag is removed;
///    after a void tag it stays, so `a <br> b` keeps both spaces
/// 4. the whole string is trimmed
/// 5. one space goes back between a closing and an opening inline element
pub fn canonicalize(html: &str) -> String {
    let html = BETWEEN_TAGS.replace_all(html, "><");
    let html = WHITESPACE_RUN.replace_all(&html, " ");
    let html = AFTER_OPENING_TAG.replace_all(&html, |caps: &Captures<'_>| {
        if VOID_TAGS.iter().any(|tag| caps[2].eq_ignore_ascii_case(tag)) {
            format!("{} ", &caps[1])
        } else {
            caps[1].to_string()
        }
    });
    let html = BEFORE_CLOSING_TAG.replace_all(&html, "${1}");
    let html = html.trim();
    ADJACENT_INLINE.replace_all(html, "${1} ${2}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::canonicalize;

    #[test]
    fn removes_whitespace_between_block_tags() {
        assert_eq!(
            canonicalize("<h2>Title</h2> \n <p>Body</p>"),
            "<h2>Title</h2><p>Body</p>"
        );
    }

    #[test]
    fn collapses_runs_inside_text() {
        assert_eq!(canonicalize("<p>a \t\n  b</p>"), "<p>a b</p>");
    }

    #[test]
    fn trims_inside_tag_boundaries() {
        assert_eq!(canonicalize("  <p> padded </p>  "), "<p>padded</p>");
    }

    #[test]
    fn keeps_space_between_adjacent_inline_elements() {
        assert_eq!(
            canonicalize("<p><strong>a</strong> <em>b</em></p>"),
            "<p><strong>a</strong> <em>b</em></p>"
        );
        assert_eq!(
            canonicalize(r#"<a href="x">l</a> <a href="y">m</a>"#),
            r#"<a href="x">l</a> <a href="y">m</a>"#
        );
    }

    #[test]
    fn block_neighbours_stay_tight() {
        assert_eq!(
            canonicalize("<p>a</p> <ul><li>b</li></ul>"),
            "<p>a</p><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn void_tags_keep_the_space_on_both_sides() {
        assert_eq!(canonicalize("<p>a <br>  b</p>"), "<p>a <br> b</p>");
        assert_eq!(canonicalize("<p>a<br>b</p>"), "<p>a<br>b</p>");
        assert_eq!(
            canonicalize(r#"<p>see <img src="/i.png" alt="Image"> here</p>"#),
            r#"<p>see <img src="/i.png" alt="Image"> here</p>"#
        );
    }

    #[test]
    fn canonical_output_is_stable() {
        let once = canonicalize("<p> x  <strong>y</strong>\n</p>\n<hr>");
        assert_eq!(canonicalize(&once), once);
    }
}
