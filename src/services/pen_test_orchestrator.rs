use futures::stream::{self, StreamExt};
use uuid::Uuid;

use crate::enums::test_type::TestType;
use crate::errors::CodeguardResult;
use crate::services::dynamic_executor::DynamicExecutor;
use crate::services::ingestion::Ingestor;
use crate::services::risk_aggregator::RiskAggregator;
use crate::services::rule_engine::RuleEngine;
use crate::services::suggestion_generator::SuggestionGenerator;
use crate::structs::code_unit::CodeUnit;
use crate::structs::config::config::Config;
use crate::structs::file_analysis_result::FileAnalysisResult;
use crate::structs::multi_file_request::MultiFilePenTestRequest;
use crate::structs::multi_file_response::MultiFilePenTestResponse;
use crate::structs::pen_test_request::PenTestRequest;
use crate::structs::pen_test_response::PenTestResponse;
use crate::structs::vulnerability_report::VulnerabilityReport;

/// Composes ingestion, static and dynamic scanning, aggregation and
/// suggestions for single- and multi-file requests. Holds no per-request state.
pub struct PenTestOrchestrator {
    ingestor: Ingestor,
    executor: DynamicExecutor,
    suggestions: SuggestionGenerator,
    max_concurrency: usize,
}

struct UnitAnalysis {
    result: FileAnalysisResult,
    sandbox_id: Option<String>,
}

impl PenTestOrchestrator {
    pub fn new(ingestor: Ingestor, executor: DynamicExecutor, suggestions: SuggestionGenerator, max_concurrency: usize) -> Self {
        Self {
            ingestor,
            executor,
            suggestions,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Ingestor::new(&config.analysis),
            DynamicExecutor::from_config(&config.sandbox),
            SuggestionGenerator::from_config(config),
            config.analysis.max_concurrency,
        )
    }

    pub async fn analyze_snippet(&self, request: &PenTestRequest) -> CodeguardResult<PenTestResponse> {
        let request_id = Uuid::new_v4();
        let unit = self.ingestor.ingest_snippet(request)?;
        log::info!("🔍 [{}] Analyzing {} ({}, {} mode)", request_id, unit.filename, unit.language, request.test_type);

        let analysis = self.analyze_unit(&unit, request.test_type).await;
        log::info!("✅ [{}] Analysis complete: risk level {}", request_id, analysis.result.report.risk_level);

        Ok(PenTestResponse {
            report: analysis.result.report,
            suggestions: analysis.result.suggestions,
            sandbox_id: analysis.sandbox_id,
            timestamp: Self::timestamp(),
        })
    }

    pub async fn analyze_files(&self, request: MultiFilePenTestRequest) -> CodeguardResult<MultiFilePenTestResponse> {
        let units = self.ingestor.normalize_units(request.files)?;
        self.analyze_units(units, request.test_type).await
    }

    pub async fn analyze_archive(&self, source_name: &str, payload: &[u8], test_type: TestType) -> CodeguardResult<MultiFilePenTestResponse> {
        let units = self.ingestor.ingest_archive(source_name, payload)?;
        self.analyze_units(units, test_type).await
    }

    async fn analyze_units(&self, units: Vec<CodeUnit>, test_type: TestType) -> CodeguardResult<MultiFilePenTestResponse> {
        let request_id = Uuid::new_v4();
        log::info!("🔍 [{}] Analyzing {} file(s) in {} mode", request_id, units.len(), test_type);

        let analyses: Vec<UnitAnalysis> = stream::iter(&units)
            .map(|unit| self.analyze_unit(unit, test_type))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let sandbox_id = analyses.iter().find_map(|a| a.sandbox_id.clone());
        let result = RiskAggregator::aggregate(analyses.into_iter().map(|a| a.result).collect());

        log::info!(
            "✅ [{}] Analysis complete: {} finding(s), overall risk {}",
            request_id,
            result.total_vulnerabilities,
            result.overall_risk_level
        );

        Ok(MultiFilePenTestResponse {
            result,
            sandbox_id,
            timestamp: Self::timestamp(),
        })
    }

    /// Static findings first, then dynamic ones; suggestions only when something was found.
    async fn analyze_unit(&self, unit: &CodeUnit, test_type: TestType) -> UnitAnalysis {
        let mut vulnerabilities = if test_type.includes_static() {
            RuleEngine::scan(&unit.content, unit.language)
        } else {
            Vec::new()
        };

        let mut report = VulnerabilityReport::default();
        let mut sandbox_id = None;

        if test_type.includes_dynamic() {
            let outcome = self.executor.execute(unit).await;
            vulnerabilities.extend(outcome.findings);
            report.execution_output = outcome.execution_output;
            report.execution_error = outcome.execution_error;
            sandbox_id = outcome.sandbox_id;
        }

        report.risk_level = RiskAggregator::risk_level(&vulnerabilities);
        report.vulnerabilities = vulnerabilities;

        let suggestions = if report.vulnerabilities.is_empty() {
            log::debug!("{}: no findings, skipping suggestions", unit.filename);
            Vec::new()
        } else {
            self.suggestions.generate(&unit.content, unit.language, &report.vulnerabilities).await
        };

        UnitAnalysis {
            result: FileAnalysisResult {
                filename: unit.filename.clone(),
                language: unit.language,
                report,
                suggestions,
            },
            sandbox_id,
        }
    }

    fn timestamp() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}
