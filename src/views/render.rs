// Plain-text rendering of results for the terminal

use std::fmt::Write;

use super::board::FeatureBoard;
use crate::client::{FeedbackAnalysis, UserStory};

pub fn render_analysis(analysis: &FeedbackAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sentiment : {}", analysis.sentiment.label());
    let _ = writeln!(out);
    let _ = writeln!(out, "Résumé");
    let _ = writeln!(out, "  {}", analysis.summary);

    push_list(&mut out, "Patterns identifiés", &analysis.patterns);

    let _ = writeln!(out);
    let _ = writeln!(out, "Demandes de features");
    if analysis.feature_requests.is_empty() {
        let _ = writeln!(out, "  (aucune)");
    }
    for request in &analysis.feature_requests {
        let _ = writeln!(
            out,
            "  - {} [{}] · {} mention(s)",
            request.title, request.priority, request.mentions
        );
    }

    push_list(&mut out, "Points de douleur", &analysis.pain_points);
    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    if items.is_empty() {
        let _ = writeln!(out, "  (aucun)");
    }
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

pub fn render_stories(stories: &[UserStory]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} User Stories générées", stories.len());
    for story in stories {
        let _ = writeln!(out);
        let _ = writeln!(out, "#{} [{}]", story.id, story.complexity);
        let _ = writeln!(out, "{}", story.to_markdown());
    }
    out
}

pub fn render_rice_table(board: &FeatureBoard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<28} {:>7} {:>7} {:>9} {:>7} {:>8}",
        "#", "Feature", "Reach", "Impact", "Confiance", "Effort", "Score"
    );
    for (rank, (feature, score)) in board.ranked_by_rice().into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<28} {:>7} {:>6}x {:>8}% {:>7} {:>8.0}",
            rank + 1,
            truncate(&feature.name, 28),
            feature.reach,
            feature.impact,
            feature.confidence,
            feature.effort,
            score
        );
        if let Some(justification) = &feature.justification {
            let _ = writeln!(out, "     ↳ {justification}");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Score = (Reach × Impact × Confidence) / Effort");
    out
}

pub fn render_moscow(board: &FeatureBoard) -> String {
    let mut out = String::new();
    for (category, features) in board.by_moscow() {
        let _ = writeln!(out, "{} ({} features)", category.label(), features.len());
        if features.is_empty() {
            let _ = writeln!(out, "  Aucune feature dans cette catégorie");
        }
        for feature in features {
            let _ = writeln!(out, "  - {}", feature.name);
        }
        let _ = writeln!(out);
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
