//! Text rendering of an [`Analysis`].

use crate::models::Analysis;
use crate::utils::char_prefix;
use itertools::Itertools;
use std::fmt::Write;

/// Characters of body text shown per article.
pub const CONTENT_PREVIEW_CHARS: usize = 200;

const NO_REPEATS: &str = "No words were repeated more than once in the headers";

/// Repeated words sorted by count descending, then alphabetically.
pub fn sorted_repeats(analysis: &Analysis) -> Vec<(&str, usize)> {
    analysis
        .repeated_words
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .collect()
}

/// Render the three report sections: original articles, translated
/// headers and repeated words.
pub fn render(analysis: &Analysis) -> String {
    let rule = "=".repeat(80);
    let thin = "-".repeat(40);
    let mut out = String::new();

    writeln!(out, "\nOriginal Articles:\n{rule}").unwrap();
    if analysis.articles.is_empty() {
        writeln!(out, "\nNo articles were retrieved").unwrap();
    }
    for (idx, article) in analysis.articles.iter().enumerate() {
        writeln!(out, "\nArticle {}:\n{thin}", idx + 1).unwrap();
        writeln!(out, "Title: {}", article.original_title).unwrap();
        match &article.content {
            Some(content) => writeln!(
                out,
                "\nContent (first {CONTENT_PREVIEW_CHARS} characters):\n{}...",
                char_prefix(content, CONTENT_PREVIEW_CHARS)
            )
            .unwrap(),
            None => writeln!(out, "\nContent: Not available").unwrap(),
        }
        match &article.image_path {
            Some(path) => writeln!(out, "\nImage saved: {}", path.display()).unwrap(),
            None => writeln!(out, "\nNo image available").unwrap(),
        }
        writeln!(out, "{thin}").unwrap();
    }

    writeln!(out, "\nTranslated Headers:\n{rule}").unwrap();
    for (idx, article) in analysis.articles.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, article.translated_title).unwrap();
    }

    writeln!(out, "\nRepeated Words Analysis:\n{rule}").unwrap();
    let repeats = sorted_repeats(analysis);
    if repeats.is_empty() {
        writeln!(out, "{NO_REPEATS}").unwrap();
    } else {
        for (word, count) in repeats {
            writeln!(out, "'{word}' appears {count} times").unwrap();
        }
    }

    out
}
