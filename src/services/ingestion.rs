use std::io::{Cursor, Read};
use zip::ZipArchive;
use crate::config::constants::{SKIPPED_BASENAMES, SKIPPED_DIRECTORIES, SUPPORTED_FILE_EXTENSIONS};
use crate::enums::language::Language;
use crate::errors::{CodeguardError, CodeguardResult};
use crate::structs::code_unit::CodeUnit;
use crate::structs::config::analysis_config::AnalysisConfig;
use crate::structs::pen_test_request::PenTestRequest;

/// Turns raw uploads into a vetted list of code units.
pub struct Ingestor {
    max_archive_bytes: u64,
    max_files: usize,
}

impl Ingestor {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_archive_bytes: config.max_archive_bytes,
            max_files: config.max_files.max(1),
        }
    }

    /// Extracts qualifying entries from a ZIP payload, in container order.
    ///
    /// Stops silently once `max_files` units are kept. Fails when the payload is
    /// too large, is not a ZIP container, or yields no code units.
    pub fn ingest_archive(&self, source_name: &str, payload: &[u8]) -> CodeguardResult<Vec<CodeUnit>> {
        self.check_size(source_name, payload.len() as u64)?;

        let mut archive = ZipArchive::new(Cursor::new(payload)).map_err(|e| {
            CodeguardError::ingestion_error(source_name, &format!("not a recognized archive container: {}", e))
        })?;

        let mut units: Vec<CodeUnit> = Vec::new();
        let mut extracted_bytes: u64 = 0;

        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("⚠️ Skipping unreadable archive entry #{}: {}", index, e);
                    continue;
                }
            };

            if entry.is_dir() {
                continue;
            }

            let filename = entry.name().to_string();
            if !Self::is_code_file(&filename) {
                continue;
            }

            if units.len() >= self.max_files {
                log::info!("📦 Reached max files limit ({}), skipping remaining files", self.max_files);
                break;
            }

            if extracted_bytes.saturating_add(entry.size()) > self.max_archive_bytes {
                log::warn!("⚠️ Skipping {}: extracted size would exceed {} bytes", filename, self.max_archive_bytes);
                continue;
            }

            let mut bytes = Vec::new();
            if let Err(e) = entry.read_to_end(&mut bytes) {
                log::warn!("⚠️ Error processing file {}: {}", filename, e);
                continue;
            }
            extracted_bytes += bytes.len() as u64;

            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(_) => {
                    log::warn!("⚠️ Skipping {}: content is not valid UTF-8", filename);
                    continue;
                }
            };

            if let Some(unit) = Self::to_code_unit(filename, content) {
                units.push(unit);
            }
        }

        if units.is_empty() {
            return Err(CodeguardError::ingestion_error(source_name, "No valid code files found in ZIP archive"));
        }

        log::info!("📦 Extracted {} code file(s) from {}", units.len(), source_name);
        Ok(units)
    }

    /// Vets a caller-supplied list of units with the same rules used for archives.
    pub fn normalize_units(&self, files: Vec<CodeUnit>) -> CodeguardResult<Vec<CodeUnit>> {
        let total: u64 = files.iter().map(|f| f.content.len() as u64).sum();
        self.check_size("files", total)?;

        let mut units = Vec::new();
        for file in files {
            if units.len() >= self.max_files {
                log::info!("📦 Reached max files limit ({}), skipping remaining files", self.max_files);
                break;
            }

            let language = if file.language.is_known() {
                file.language
            } else {
                Language::from_filename(&file.filename)
            };

            if file.content.trim().is_empty() || !language.is_known() {
                log::debug!("Dropping {}: empty content or unknown language", file.filename);
                continue;
            }

            units.push(CodeUnit { language, ..file });
        }

        if units.is_empty() {
            return Err(CodeguardError::ingestion_error("files", "No valid code files found"));
        }

        Ok(units)
    }

    pub fn ingest_snippet(&self, request: &PenTestRequest) -> CodeguardResult<CodeUnit> {
        self.check_size("snippet", request.code.len() as u64)?;

        if request.code.trim().is_empty() {
            return Err(CodeguardError::ingestion_error("snippet", "Code is required"));
        }
        if !request.language.is_known() {
            return Err(CodeguardError::ingestion_error("snippet", "A supported language is required"));
        }

        let filename = request
            .filename
            .clone()
            .unwrap_or_else(|| format!("main.{}", request.language.default_extension()));

        Ok(CodeUnit::new(filename, request.code.clone(), request.language))
    }

    /// Allowlisted extension, not a known non-code basename, not hidden, and not
    /// under a denylisted directory segment.
    pub fn is_code_file(path: &str) -> bool {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let basename = match segments.pop() {
            Some(name) => name,
            None => return false,
        };

        if SKIPPED_BASENAMES.contains(&basename) || basename.starts_with('.') {
            return false;
        }

        if segments.iter().any(|segment| SKIPPED_DIRECTORIES.contains(segment)) {
            return false;
        }

        match basename.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => {
                let extension = extension.to_lowercase();
                SUPPORTED_FILE_EXTENSIONS.iter().any(|(ext, _)| *ext == extension)
            }
            _ => false,
        }
    }

    fn to_code_unit(filename: String, content: String) -> Option<CodeUnit> {
        if content.trim().is_empty() {
            return None;
        }

        let language = Language::from_filename(&filename);
        if !language.is_known() {
            return None;
        }

        Some(CodeUnit { filename, content, language })
    }

    /// Rejects payloads above the configured ceiling. Callers holding only a
    /// file size can check it before reading anything.
    pub fn check_size(&self, source_name: &str, size: u64) -> CodeguardResult<()> {
        if size > self.max_archive_bytes {
            return Err(CodeguardError::ingestion_error(
                source_name,
                &format!("File size exceeds limit of {}MB", self.max_archive_bytes / 1024 / 1024),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_code_file_allowlist() {
        assert!(Ingestor::is_code_file("app.py"));
        assert!(Ingestor::is_code_file("src/components/App.TSX"));
        assert!(Ingestor::is_code_file("scripts/deploy.sh"));
        assert!(!Ingestor::is_code_file("README.md"));
        assert!(!Ingestor::is_code_file("styles/site.css"));
        assert!(!Ingestor::is_code_file("py"));
    }

    #[test]
    fn test_is_code_file_skips_manifests_and_hidden() {
        assert!(!Ingestor::is_code_file("package.json"));
        assert!(!Ingestor::is_code_file("web/tsconfig.json"));
        assert!(!Ingestor::is_code_file(".eslintrc.js"));
        assert!(!Ingestor::is_code_file("config/.env"));
    }

    #[test]
    fn test_is_code_file_denylisted_segments() {
        assert!(!Ingestor::is_code_file("node_modules/lodash/index.js"));
        assert!(!Ingestor::is_code_file("pkg/__pycache__/mod.py"));
        assert!(!Ingestor::is_code_file("repo/.git/hooks/pre-commit.sh"));
        assert!(!Ingestor::is_code_file("web/dist/bundle.js"));
        assert!(!Ingestor::is_code_file("build/gen.go"));
        assert!(Ingestor::is_code_file("src/distribution/pricing.py"));
        assert!(Ingestor::is_code_file("rebuild/steps.sh"));
    }

    #[test]
    fn test_snippet_requires_code_and_known_language() {
        let ingestor = Ingestor::new(&AnalysisConfig::default());
        let mut request = PenTestRequest {
            code: "   \n".to_string(),
            language: Language::Python,
            test_type: Default::default(),
            filename: None,
        };
        assert!(ingestor.ingest_snippet(&request).is_err());

        request.code = "print('hi')".to_string();
        let unit = ingestor.ingest_snippet(&request).unwrap();
        assert_eq!(unit.filename, "main.py");

        request.language = Language::Unknown;
        assert!(ingestor.ingest_snippet(&request).is_err());
    }

    #[test]
    fn test_normalize_units_redetects_and_caps() {
        let config = AnalysisConfig { max_files: 2, ..AnalysisConfig::default() };
        let ingestor = Ingestor::new(&config);
        let files = vec![
            CodeUnit::new("a.go", "package main", Language::Unknown),
            CodeUnit::new("b.txt", "hello", Language::Unknown),
            CodeUnit::new("c.py", "", Language::Python),
            CodeUnit::new("d.py", "x = 1", Language::Python),
            CodeUnit::new("e.py", "y = 2", Language::Python),
        ];

        let units = ingestor.normalize_units(files).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].language, Language::Go);
        assert_eq!(units[1].filename, "d.py");
    }
}
