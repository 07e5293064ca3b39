//! Heuristic detection of package names in generated text.
//!
//! Only explicit install invocations are recognized. This is a narrow
//! detector, not a general package-name recognizer.

use crate::entities::CandidateSet;
use crate::error::AppError;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    patterns: Vec<Regex>,
}

impl CandidateExtractor {
    /// Compiles the install patterns. Each one needs a capture group holding
    /// the package name.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, AppError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let regex = Regex::new(pattern.as_ref())?;
                if regex.captures_len() < 2 {
                    return Err(AppError::Config(format!(
                        "extraction pattern has no capture group: {}",
                        pattern.as_ref()
                    )));
                }
                Ok(regex)
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { patterns })
    }

    pub fn extract_candidates(&self, text: &str) -> CandidateSet {
        let mut candidates = CandidateSet::new();
        for pattern in &self.patterns {
            for captures in pattern.captures_iter(text) {
                if let Some(name) = captures.get(1) {
                    let name = name.as_str().trim();
                    if !name.is_empty() {
                        candidates.insert(name.to_string());
                    }
                }
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::ExtractionConfig;

    fn extractor() -> CandidateExtractor {
        CandidateExtractor::new(&ExtractionConfig::default().patterns).unwrap()
    }

    #[test]
    fn finds_pip_and_npm_installs() {
        let text = "First run `pip install requests`, then `npm install @types/node`.";
        let candidates = extractor().extract_candidates(text);
        assert_eq!(
            candidates.into_iter().collect::<Vec<_>>(),
            vec!["@types/node".to_string(), "requests".to_string()]
        );
    }

    #[test]
    fn no_install_pattern_yields_empty_set() {
        let candidates = extractor().extract_candidates("Use the standard library's json module.");
        assert!(candidates.is_empty());
    }

    #[test]
    fn duplicates_collapse_case_is_kept() {
        let text = "pip install Flask\npip install Flask\npip install flask";
        let candidates = extractor().extract_candidates(text);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains("Flask"));
        assert!(candidates.contains("flask"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = extractor();
        let text = "npm install left-pad and pip install colorama, or npm install left-pad";
        assert_eq!(extractor.extract_candidates(text), extractor.extract_candidates(text));
    }

    #[test]
    fn stops_at_version_specifiers() {
        let candidates = extractor().extract_candidates("pip install numpy==1.26");
        assert!(candidates.contains("numpy"));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn rejects_pattern_without_capture_group() {
        let result = CandidateExtractor::new(&["pip install [a-z]+"]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_invalid_regex() {
        assert!(CandidateExtractor::new(&["pip install ([a-z"]).is_err());
    }
}
