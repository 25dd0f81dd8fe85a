use regex::Regex;

/// Compiled filter for searching record lines
#[derive(Clone)]
pub struct CompiledFilter {
    /// Regex pattern (if any)
    regex: Option<Regex>,

    /// Original pattern string
    pattern: String,

    /// Restrict the search to one record (None = all records)
    record_scope: Option<String>,

    /// Case sensitivity
    case_insensitive: bool,
}

impl CompiledFilter {
    /// Filter with no pattern; matches every line in scope
    pub fn empty() -> Self {
        Self {
            regex: None,
            pattern: String::new(),
            record_scope: None,
            case_insensitive: false,
        }
    }

    /// Create a new filter from a pattern string
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern)?)
        };

        Ok(Self {
            regex,
            pattern: pattern.to_string(),
            record_scope: None,
            case_insensitive: false,
        })
    }

    /// Create a case-insensitive filter
    pub fn new_case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        let regex = if pattern.is_empty() {
            None
        } else {
            // Prepend (?i) for case insensitive matching
            Some(Regex::new(&format!("(?i){}", pattern))?)
        };

        Ok(Self {
            regex,
            pattern: pattern.to_string(),
            record_scope: None,
            case_insensitive: true,
        })
    }

    /// Restrict matching to a single record id
    pub fn scoped_to(mut self, record_id: Option<String>) -> Self {
        self.record_scope = record_id;
        self
    }

    /// Check whether a record id falls inside the filter's scope
    pub fn in_scope(&self, record_id: &str) -> bool {
        match &self.record_scope {
            Some(scope) => scope == record_id,
            None => true,
        }
    }

    /// Check if a line matches this filter
    pub fn matches(&self, line: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(line),
            None => true,
        }
    }

    /// Find all match positions in a line (for highlighting)
    pub fn find_spans(&self, line: &str) -> Vec<(usize, usize)> {
        match &self.regex {
            Some(re) => re.find_iter(line).map(|m| (m.start(), m.end())).collect(),
            None => Vec::new(),
        }
    }

    /// Get the original pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Check if the filter has a text pattern
    pub fn has_pattern(&self) -> bool {
        self.regex.is_some()
    }

    /// Check if the filter is scoped to a single record
    pub fn is_scoped(&self) -> bool {
        self.record_scope.is_some()
    }

    /// Check if filter is case insensitive
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

impl std::fmt::Debug for CompiledFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledFilter")
            .field("pattern", &self.pattern)
            .field("record_scope", &self.record_scope)
            .field("case_insensitive", &self.case_insensitive)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_match() {
        let filter = CompiledFilter::new("error").unwrap();
        assert!(filter.matches("an error occurred"));
        assert!(!filter.matches("everything is fine"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let filter = CompiledFilter::new_case_insensitive("ERROR").unwrap();
        assert!(filter.matches("an error occurred"));
        assert!(filter.is_case_insensitive());
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let filter = CompiledFilter::new("").unwrap();
        assert!(filter.matches("anything"));
        assert!(!filter.has_pattern());
    }

    #[test]
    fn test_scope() {
        let filter = CompiledFilter::new("x")
            .unwrap()
            .scoped_to(Some("rec-1".to_string()));
        assert!(filter.in_scope("rec-1"));
        assert!(!filter.in_scope("rec-2"));
    }

    #[test]
    fn test_find_spans() {
        let filter = CompiledFilter::new("error").unwrap();
        let spans = filter.find_spans("an error occurred, another error here");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], (3, 8));
    }

    #[test]
    fn test_invalid_regex_is_error() {
        assert!(CompiledFilter::new("(unclosed").is_err());
    }
}
