// Colored terminal output for rankings, summaries and analyses.
//
// This module handles all terminal-specific formatting: colors and tables.
// The main.rs display calls delegate here.

use colored::Colorize;

use crate::analysis::{SentimentLabel, TextAnalysisResult};
use crate::models::{ComparativeSummary, ScoredResponse, ScoringReport, SimilarityMatrix};

/// Display a full report: ranking, summary and (if present) the similarity matrix.
pub fn display_report(report: &ScoringReport) {
    println!(
        "\n{}",
        format!("=== Prompt: \"{}\" ===", super::truncate_chars(&report.prompt, 70)).bold()
    );
    display_ranking(&report.responses);
    display_summary(&report.summary);
    if let Some(matrix) = &report.similarity_matrix {
        display_matrix(matrix);
    }
}

/// Display responses ranked by composite score, unscored ones last.
pub fn display_ranking(responses: &[ScoredResponse]) {
    if responses.is_empty() {
        println!("No responses to rank.");
        return;
    }

    let mut ranked: Vec<&ScoredResponse> = responses.iter().collect();
    ranked.sort_by_key(|r| std::cmp::Reverse(r.scores.composite.map(|c| c as i64).unwrap_or(-1)));

    println!();
    println!(
        "  {:>4}  {:<24} {:>6} {:>6} {:>6} {:>6} {:>6}  {:<6} {:<10}",
        "Rank".dimmed(),
        "Model".dimmed(),
        "Score".dimmed(),
        "Rel".dimmed(),
        "Sim".dimmed(),
        "Speed".dimmed(),
        "R-L".dimmed(),
        "Loc".dimmed(),
        "Sentiment".dimmed(),
    );
    println!("  {}", "-".repeat(86).dimmed());

    for (i, response) in ranked.iter().enumerate() {
        let scores = &response.scores;
        let location = response
            .sovereignty
            .as_ref()
            .map(|s| s.server_location.as_str())
            .unwrap_or("?");

        match scores.composite {
            Some(composite) => println!(
                "  {:>4}. {:<24} {:>6} {:>6} {:>6} {:>6} {:>6.2}  {:<6} {:<10}",
                i + 1,
                super::truncate_chars(&response.model, 21),
                colorize_score(composite),
                fmt_opt(scores.relevance),
                fmt_opt(scores.similarity),
                fmt_opt(scores.speed),
                scores.rouge.map(|r| r.rouge_l).unwrap_or(0.0),
                location,
                colorize_sentiment(&response.nlp_analysis.sentiment),
            ),
            None => println!(
                "  {:>4}  {:<24} {}",
                "-",
                super::truncate_chars(&response.model, 21),
                format!("not scored ({})", response.status).dimmed(),
            ),
        }
    }
    println!();
}

/// Display the comparative summary block.
pub fn display_summary(summary: &ComparativeSummary) {
    println!("{}", "=== Summary ===".bold());
    println!(
        "  Responses: {} total, {} successful, {} failed",
        summary.total_responses, summary.successful_responses, summary.failed_responses
    );
    println!(
        "  Averages: relevance {}  similarity {}  sovereignty {}  composite {}  time {} ms",
        summary.average_relevance,
        summary.average_similarity,
        summary.average_sovereignty,
        summary.average_composite,
        summary.average_response_time,
    );
    println!("  Consensus level: {:.1}", summary.consensus_level);

    if let Some(best) = &summary.best_response {
        println!(
            "  Best:  {} ({})",
            best.model.green().bold(),
            fmt_opt(best.composite_score)
        );
    }
    if let Some(worst) = &summary.worst_response {
        println!(
            "  Worst: {} ({})",
            worst.model.yellow(),
            fmt_opt(worst.composite_score)
        );
    }

    let distribution: Vec<String> = summary
        .sovereignty_distribution
        .iter()
        .map(|(location, count)| format!("{location}: {count}"))
        .collect();
    println!("  Server locations: {}", distribution.join(", "));
    println!();
}

/// Display the pairwise similarity matrix.
pub fn display_matrix(matrix: &SimilarityMatrix) {
    if matrix.is_empty() {
        return;
    }

    println!("{}", "=== Similarity Matrix ===".bold());
    let labels: Vec<String> = matrix
        .models
        .iter()
        .map(|m| super::truncate_chars(m, 9))
        .collect();

    print!("  {:<14}", "");
    for label in &labels {
        print!("{:>14}", label.dimmed());
    }
    println!();

    for (label, row) in labels.iter().zip(&matrix.values) {
        print!("  {:<14}", label);
        for value in row {
            print!("{:>14}", value);
        }
        println!();
    }
    println!();
}

/// Display a single text analysis.
pub fn display_analysis(analysis: &TextAnalysisResult) {
    println!("\n{}", "=== Text Analysis ===".bold());
    println!(
        "  Words: {}  Sentences: {}  Readability: {:.1}",
        analysis.word_count, analysis.sentence_count, analysis.readability
    );
    println!(
        "  Sentiment: {} ({:+.2})",
        colorize_sentiment(analysis.sentiment.label.as_str()),
        analysis.sentiment.score
    );

    if !analysis.keywords.is_empty() {
        println!("  Keywords:");
        for keyword in &analysis.keywords {
            println!(
                "    {:<20} x{:<3} {:.3}",
                keyword.word, keyword.count, keyword.relevance
            );
        }
    }
    if !analysis.topics.is_empty() {
        println!("  Topics: {}", analysis.topics.join(", ").dimmed());
    }
    println!();
}

fn fmt_opt(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Colorize a 0-100 score.
fn colorize_score(score: u32) -> colored::ColoredString {
    let text = score.to_string();
    match score {
        70.. => text.green().bold(),
        40..=69 => text.yellow(),
        _ => text.red(),
    }
}

fn colorize_sentiment(label: &str) -> colored::ColoredString {
    match label {
        l if l == SentimentLabel::Positive.as_str() => label.green(),
        l if l == SentimentLabel::Negative.as_str() => label.red(),
        _ => label.normal(),
    }
}
