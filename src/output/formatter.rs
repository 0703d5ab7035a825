//! Output formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::patterns::EducationMatch;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn education_line(edu: &EducationMatch) -> String {
    format!("{} in {}", edu.degree, edu.field)
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 90.0 => ("EXCELLENT", Color::Green),
            s if s >= 80.0 => ("VERY GOOD", Color::BrightGreen),
            s if s >= 70.0 => ("GOOD", Color::Yellow),
            s if s >= 60.0 => ("FAIR", Color::BrightYellow),
            s if s >= 50.0 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_list(&self, output: &mut String, title: &str, items: &[String]) {
        output.push_str(&self.format_header(title, 3));
        if items.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("none found", Color::BrightBlack)));
        }
        for item in items {
            output.push_str(&format!("  • {}\n", item));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;
        let result = &report.analysis.result;

        output.push_str(&self.format_header("📊 RESUME ANALYSIS SUMMARY", 1));
        output.push_str(&format!(
            "Compatibility Score: {}% {}\n",
            report.analysis.compatibility_score,
            self.format_score_badge(summary.compatibility_score)
        ));
        output.push_str(&format!("Total Skills Identified: {}\n", summary.skills_identified));
        output.push_str(&format!("Education Items: {}\n", summary.education_items));
        output.push_str(&format!("Experience Items: {}\n", summary.experience_items));
        output.push_str(&format!("Words: {} | Characters: {}\n", result.word_count, result.char_count));

        output.push_str(&self.format_header("🔍 Detailed Findings", 2));

        let skills: Vec<String> = result.skills.iter().cloned().collect();
        self.format_list(&mut output, "Skills Detected", &skills);

        let education: Vec<String> = result.education.iter().map(education_line).collect();
        self.format_list(&mut output, "Education History", &education);

        self.format_list(&mut output, "Work Experience", &result.experience);

        let organizations: Vec<String> = result.organizations.iter().cloned().collect();
        self.format_list(&mut output, "Organizations Mentioned", &organizations);

        if self.detailed {
            self.format_list(&mut output, "University Mentions (NER)", &result.university_mentions);
            output.push_str(&format!(
                "\nRecognizer: {} | Scorer: {} | Processing time: {}ms\n",
                report.metadata.recognizer, report.metadata.scorer, report.analysis.processing_time_ms
            ));
        }

        if !report.tips.is_empty() {
            output.push_str(&self.format_header("💡 Tips to Improve Your Resume", 2));
            for tip in &report.tips {
                output.push_str(&format!("  • {}\n", self.colorize(tip, Color::Yellow)));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn push_list(output: &mut String, title: &str, items: &[String]) {
        output.push_str(&format!("### {}\n\n", title));
        if items.is_empty() {
            output.push_str("_None found_\n\n");
            return;
        }
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;
        let result = &report.analysis.result;

        output.push_str("# 📊 Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.analysis.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name(&report.metadata.resume_file),
                file_name(&report.metadata.job_source)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Compatibility Score | {}% |\n", report.analysis.compatibility_score));
        output.push_str(&format!("| Total Skills Identified | {} |\n", summary.skills_identified));
        output.push_str(&format!("| Education Items | {} |\n", summary.education_items));
        output.push_str(&format!("| Experience Items | {} |\n", summary.experience_items));
        output.push_str(&format!("| Word Count | {} |\n\n", result.word_count));

        output.push_str("## Detailed Findings\n\n");
        Self::push_list(&mut output, "Skills Detected", &result.skills.iter().cloned().collect::<Vec<_>>());
        Self::push_list(
            &mut output,
            "Education History",
            &result.education.iter().map(education_line).collect::<Vec<_>>(),
        );
        Self::push_list(&mut output, "Work Experience", &result.experience);
        Self::push_list(
            &mut output,
            "Organizations Mentioned",
            &result.organizations.iter().cloned().collect::<Vec<_>>(),
        );

        if !report.tips.is_empty() {
            output.push_str("## 💡 Tips to Improve Your Resume\n\n");
            for tip in &report.tips {
                output.push_str(&format!("- {}\n", tip));
            }
        }

        Ok(output)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;

    #[test]
    fn test_console_output_without_colors() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&sample_report(0.42)).unwrap();

        assert!(output.contains("Compatibility Score: 42.00% [POOR]"));
        assert!(output.contains("  • Bachelor in Science in Computer Science"));
        assert!(output.contains("  • Acme Corp"));
        assert!(output.contains("Tips to Improve Your Resume"));
        assert!(!output.contains("Stanford University"));
    }

    #[test]
    fn test_console_detailed_shows_diagnostics() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_report(0.95)).unwrap();

        assert!(output.contains("[EXCELLENT]"));
        assert!(output.contains("Stanford University"));
        assert!(!output.contains("Tips to Improve"));
    }

    #[test]
    fn test_json_output_is_parseable() {
        let generator = ReportGenerator::with_options(false, false);
        let json = generator.generate_report(&sample_report(0.5), &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["compatibility_score"], 50.0);
        assert_eq!(value["analysis"]["compatibility_score"], 50.0);
        assert_eq!(value["analysis"]["result"]["experience"][0], "5 years");
        assert_eq!(value["analysis"]["result"]["education"][0]["connector"], "of");
    }

    #[test]
    fn test_markdown_output() {
        let generator = ReportGenerator::new();
        let markdown = generator.generate_report(&sample_report(0.75), &OutputFormat::Markdown).unwrap();

        assert!(markdown.contains("| Compatibility Score | 75.00% |"));
        assert!(markdown.contains("- Python"));
        assert!(markdown.contains("**Resume:** `resume.txt`"));
    }
}
