//! Filename policy — deterministic mapping from submission identity to a
//! repository-relative path.
//!
//! `solution_path` is a pure function: no I/O, no side effects, identical
//! inputs always produce identical output. Re-runs recompute paths instead of
//! storing them.

use std::path::PathBuf;

use crate::types::{Language, ProblemId};

/// Slug used when a title normalizes to nothing (e.g. all punctuation).
const EMPTY_TITLE_SLUG: &str = "untitled";

/// Convert a problem title into a safe, lowercase, underscore-separated slug.
///
/// `"Best Time to Buy and Sell Stock"` → `"best_time_to_buy_and_sell_stock"`.
///
/// Total over all input strings: ASCII alphanumerics are lowercased and kept,
/// common accented Latin letters are transliterated to their ASCII base
/// (`"Résumé"` → `"resume"`), and every other character (whitespace,
/// punctuation, remaining non-ASCII) collapses into a single `_` separator
/// with leading/trailing separators stripped. Titles that normalize to
/// nothing fall back to [`EMPTY_TITLE_SLUG`] rather than erroring.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_sep = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else if let Some(folded) = fold_accent(c) {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push_str(folded);
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        EMPTY_TITLE_SLUG.to_owned()
    } else {
        slug
    }
}

/// ASCII base for common accented Latin letters; `None` for everything else.
fn fold_accent(c: char) -> Option<&'static str> {
    let folded = match c {
        'à'..='å' | 'À'..='Å' => "a",
        'è'..='ë' | 'È'..='Ë' => "e",
        'ì'..='ï' | 'Ì'..='Ï' => "i",
        'ò'..='ö' | 'Ò'..='Ö' => "o",
        'ù'..='ü' | 'Ù'..='Ü' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ñ' | 'Ñ' => "n",
        'ç' | 'Ç' => "c",
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'ø' | 'Ø' => "o",
        'œ' | 'Œ' => "oe",
        _ => return None,
    };
    Some(folded)
}

/// File extension for a normalized language tag.
///
/// Unknown tags use the tag itself as the extension — there is no failure case.
pub fn extension_for(language: &Language) -> &str {
    match language.as_str() {
        "cpp" => "cpp",
        "python" => "py",
        "java" => "java",
        "c" => "c",
        "go" => "go",
        "rust" => "rs",
        other => other,
    }
}

/// Repository-relative path for a solution: `{language}/{id}_{slug}.{ext}`.
///
/// The language tag doubles as the directory name, so the destination repo is
/// navigable by language.
pub fn solution_path(problem_id: &ProblemId, title: &str, language: &Language) -> PathBuf {
    let filename = format!(
        "{}_{}.{}",
        problem_id.as_str(),
        slugify(title),
        extension_for(language)
    );
    PathBuf::from(language.as_str()).join(filename)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Two Sum", "two_sum")]
    #[case("Best Time to Buy and Sell Stock", "best_time_to_buy_and_sell_stock")]
    #[case("3Sum", "3sum")]
    #[case("Pow(x, n)", "pow_x_n")]
    #[case("Number of 1 Bits", "number_of_1_bits")]
    #[case("  padded   title  ", "padded_title")]
    #[case("Find First and Last Position of Element in Sorted Array", "find_first_and_last_position_of_element_in_sorted_array")]
    fn slugify_cases(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(slugify(title), expected);
    }

    #[test]
    fn slugify_is_case_insensitive() {
        assert_eq!(slugify("Two Sum"), slugify("two sum"));
        assert_eq!(slugify("TWO SUM"), slugify("two sum"));
    }

    #[test]
    fn slugify_transliterates_accented_latin() {
        assert_eq!(slugify("Résumé Builder"), "resume_builder");
        assert_eq!(slugify("Crème Brûlée"), "creme_brulee");
        assert_eq!(slugify("Straße"), "strasse");
        assert_eq!(slugify("Señor Æther"), "senor_aether");
    }

    #[test]
    fn slugify_never_fails_on_non_ascii() {
        assert_eq!(slugify("日本語"), "untitled");
        assert_eq!(slugify("!!!"), "untitled");
        assert_eq!(slugify("график работы"), "untitled");
    }

    #[test]
    fn extension_table() {
        assert_eq!(extension_for(&Language::from("python")), "py");
        assert_eq!(extension_for(&Language::from("cpp")), "cpp");
        assert_eq!(extension_for(&Language::from("rust")), "rs");
        assert_eq!(extension_for(&Language::from("go")), "go");
    }

    #[test]
    fn unknown_language_uses_tag_as_extension() {
        assert_eq!(extension_for(&Language::from("kotlin")), "kotlin");
    }

    #[test]
    fn path_shape() {
        let path = solution_path(
            &ProblemId::from("121"),
            "Best Time to Buy and Sell Stock",
            &Language::from("cpp"),
        );
        assert_eq!(
            path,
            PathBuf::from("cpp/121_best_time_to_buy_and_sell_stock.cpp")
        );
    }

    #[test]
    fn path_is_deterministic() {
        let pid = ProblemId::from("1");
        let lang = Language::from("python");
        assert_eq!(
            solution_path(&pid, "Two Sum", &lang),
            solution_path(&pid, "Two Sum", &lang)
        );
    }

    #[test]
    fn distinct_problem_ids_never_collide() {
        let lang = Language::from("python");
        let a = solution_path(&ProblemId::from("1"), "Two Sum", &lang);
        let b = solution_path(&ProblemId::from("167"), "Two Sum", &lang);
        assert_ne!(a, b);
    }
}
