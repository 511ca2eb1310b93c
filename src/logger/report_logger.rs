use crate::enums::analysis_status::AnalysisStatus;
use crate::structs::error_response::ErrorResponse;
use crate::structs::file_analysis_result::FileAnalysisResult;
use crate::structs::multi_file_response::MultiFilePenTestResponse;
use crate::structs::pen_test_response::PenTestResponse;
use crate::structs::security_suggestion::SecuritySuggestion;
use crate::structs::vulnerability_report::VulnerabilityReport;

/// Human-readable summaries on stderr; stdout is reserved for JSON.
pub struct ReportLogger;

impl ReportLogger {
    pub fn print_single_report(response: &PenTestResponse) {
        let status = AnalysisStatus::of_reports([&response.report]);
        Self::print_header(status);
        Self::print_report(&response.report, &response.suggestions);
        if let Some(sandbox_id) = &response.sandbox_id {
            eprintln!("📦 Sandbox: {}", sandbox_id);
        }
        Self::print_footer();
    }

    pub fn print_multi_report(response: &MultiFilePenTestResponse) {
        let result = &response.result;
        let status = AnalysisStatus::of_reports(result.files.iter().map(|f| &f.report));
        Self::print_header(status);

        eprintln!(
            "📊 {} file(s), {} finding(s), overall risk {} {}",
            result.files.len(),
            result.total_vulnerabilities,
            result.overall_risk_level.emoji(),
            result.overall_risk_level.as_str().to_uppercase()
        );

        for file in &result.files {
            Self::print_file(file);
        }
        Self::print_footer();
    }

    pub fn print_error(response: &ErrorResponse) {
        Self::print_header(response.status);
        eprintln!("❌ {}", response.error);
        if let Some(details) = &response.details {
            eprintln!("   {}", details);
        }
        Self::print_footer();
    }

    fn print_file(file: &FileAnalysisResult) {
        eprintln!("\n📄 {} ({})", file.filename, file.language);
        Self::print_report(&file.report, &file.suggestions);
    }

    fn print_report(report: &VulnerabilityReport, suggestions: &[SecuritySuggestion]) {
        eprintln!("   Risk level: {} {}", report.risk_level.emoji(), report.risk_level.as_str().to_uppercase());

        for (index, vulnerability) in report.vulnerabilities.iter().enumerate() {
            eprintln!(
                "   {}. {} [{}] {}{}",
                index + 1,
                vulnerability.severity.emoji(),
                vulnerability.kind,
                vulnerability.description,
                vulnerability.location.as_ref().map(|l| format!(" ({})", l)).unwrap_or_default()
            );
            if let Some(suggestion) = suggestions.get(index) {
                eprintln!("      💡 {}", Self::first_line(&suggestion.suggested_fix));
            }
        }

        if let Some(error) = &report.execution_error {
            eprintln!("   ⚠️ Dynamic analysis: {}", error);
        }
    }

    fn first_line(text: &str) -> &str {
        text.lines().next().unwrap_or_default()
    }

    fn print_header(status: AnalysisStatus) {
        eprintln!("\n{}", "=".repeat(60));
        eprintln!("🛡️  Security analysis: {}", status.label());
        eprintln!("{}", "=".repeat(60));
    }

    fn print_footer() {
        eprintln!("{}\n", "=".repeat(60));
    }
}
