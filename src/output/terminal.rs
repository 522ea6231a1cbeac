// Colored terminal output for comparison reports and table summaries.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use colored::Colorize;

use crate::keywords::frequency::FrequencyDelta;
use crate::pipeline::report::{PeriodSummary, Report};
use crate::sentiment::tally::Aggregation;
use crate::sentiment::traits::SentimentLabel;
use crate::table::TableSummary;
use crate::topics::clusters::TopicCluster;

const BAR_WIDTH: usize = 30;

/// Display a two-period comparison report in the terminal.
pub fn display_report(report: &Report) {
    println!("\n{}", "=== Period Comparison ===".bold());

    for (name, period) in [("Period 1", &report.period1), ("Period 2", &report.period2)] {
        display_period(name, period);
    }

    display_keyword_deltas(&report.top_keywords);

    if let Some(overlap) = report.topic_overlap {
        println!(
            "\n  Topic overlap between periods: {}",
            format!("{overlap:.2}").bold()
        );
    }
    println!();
}

fn display_period(name: &str, period: &PeriodSummary) {
    println!(
        "\n  {} {} ({} comments over {} days, {:.1}/day)",
        format!("{name}:").bold(),
        period.range,
        period.count,
        period.span_days,
        period.average_daily(),
    );

    let max = match period.sentiment.aggregation {
        Aggregation::Counts => period.count.max(1) as f64,
        Aggregation::Percentages => 100.0,
    };
    for label in [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ] {
        let value = period.sentiment.get(label);
        let filled = ((value / max) * BAR_WIDTH as f64).round() as usize;
        let bar = "#".repeat(filled.min(BAR_WIDTH));
        let shown = match period.sentiment.aggregation {
            Aggregation::Counts => format!("{value:>6.0}"),
            Aggregation::Percentages => format!("{value:>5.1}%"),
        };
        println!("    {:<9} {} {}", label.as_str(), shown, colorize_bar(label, &bar));
    }

    if let Some(topics) = &period.topics {
        display_topics(topics);
    }
}

fn display_keyword_deltas(deltas: &[FrequencyDelta]) {
    if deltas.is_empty() {
        println!("\n  No keyword changes between periods.");
        return;
    }
    println!("\n  {}", "Top keyword changes:".bold());
    for (i, d) in deltas.iter().enumerate() {
        let delta = format!("{:+}", d.delta);
        let delta = if d.delta > 0 {
            delta.green()
        } else if d.delta < 0 {
            delta.red()
        } else {
            delta.dimmed()
        };
        let keyword = super::truncate_chars(&d.keyword, 48);
        println!("    {:>2}. {:<50} {:>5}", i + 1, keyword, delta);
    }
}

fn display_topics(topics: &[TopicCluster]) {
    if topics.is_empty() {
        println!("    {}", "(no topics found)".dimmed());
        return;
    }
    println!("    Topics:");
    for topic in topics {
        println!(
            "      {:<40} {:>5.1}%",
            super::truncate_chars(&topic.label, 38),
            topic.weight * 100.0
        );
    }
}

/// Display coverage statistics for a loaded comment table.
pub fn display_table_summary(summary: &TableSummary) {
    println!("\n{}", "=== Comment Table ===".bold());
    println!("  Records:          {}", summary.records);
    println!(
        "  Date coverage:    {} .. {}",
        summary.first_date, summary.last_date
    );
    println!(
        "  Missing titles:   {}",
        colorize_missing(summary.missing_titles)
    );
    println!(
        "  Missing contents: {}",
        colorize_missing(summary.missing_contents)
    );
    println!();
}

fn colorize_bar(label: SentimentLabel, bar: &str) -> colored::ColoredString {
    match label {
        SentimentLabel::Positive => bar.green(),
        SentimentLabel::Negative => bar.red(),
        SentimentLabel::Neutral => bar.dimmed(),
    }
}

fn colorize_missing(count: usize) -> colored::ColoredString {
    if count == 0 {
        count.to_string().green()
    } else {
        count.to_string().yellow()
    }
}
