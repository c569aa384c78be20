//! List query
//!
//! Sorting, paging and filtering for the public benchmark list. Raw query
//! parameters are normalized here so that storage backends and the read
//! cache only ever see whitelisted values.

use std::fmt;

/// Page size used when `limit` is absent or unparsable
pub const DEFAULT_LIMIT: u32 = 10;

/// `limit=0` means "everything", bounded by this cap
pub const MAX_LIMIT: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Timestamp,
    TokensPerSecond,
    EvalCount,
    Duration,
    ModelName,
    ReceivedAt,
}

impl SortField {
    /// Unknown names fall back to the default
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("tokens_per_second") => SortField::TokensPerSecond,
            Some("eval_count") => SortField::EvalCount,
            Some("duration") => SortField::Duration,
            Some("model_name") => SortField::ModelName,
            Some("received_at") => SortField::ReceivedAt,
            _ => SortField::Timestamp,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Timestamp => "timestamp",
            SortField::TokensPerSecond => "tokens_per_second",
            SortField::EvalCount => "eval_count",
            SortField::Duration => "duration",
            SortField::ModelName => "model_name",
            SortField::ReceivedAt => "received_at",
        }
    }

    /// Column name in the `benchmarks` table
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Timestamp => "benchmark_timestamp",
            SortField::TokensPerSecond => "tokens_per_second",
            SortField::EvalCount => "eval_count",
            SortField::Duration => "duration_secs",
            SortField::ModelName => "model_name",
            SortField::ReceivedAt => "received_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only `asc` sorts ascending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Active filters; empty values are dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkFilter {
    /// Exact match
    pub model: Option<String>,
    /// Exact match
    pub ollama_version: Option<String>,
    /// Case-insensitive substring of `sys_info.os`
    pub os: Option<String>,
    /// Case-insensitive substring of `sys_info.cpu_name`
    pub cpu: Option<String>,
    /// Case-insensitive substring of `gpu_info.name`
    pub gpu: Option<String>,
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl BenchmarkFilter {
    pub fn new(
        model: Option<&str>,
        ollama_version: Option<&str>,
        os: Option<&str>,
        cpu: Option<&str>,
        gpu: Option<&str>,
    ) -> Self {
        Self {
            model: non_empty(model),
            ollama_version: non_empty(ollama_version),
            os: non_empty(os),
            cpu: non_empty(cpu),
            gpu: non_empty(gpu),
        }
    }

    /// Evaluate against already-extracted fields
    pub fn matches(
        &self,
        model_name: &str,
        ollama_version: &str,
        os: &str,
        cpu_name: &str,
        gpu_name: &str,
    ) -> bool {
        self.model.as_deref().is_none_or(|m| m == model_name)
            && self
                .ollama_version
                .as_deref()
                .is_none_or(|v| v == ollama_version)
            && self
                .os
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(os, needle))
            && self
                .cpu
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(cpu_name, needle))
            && self
                .gpu
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(gpu_name, needle))
    }
}

/// Normalized list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_by: SortField,
    pub order: SortOrder,
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub filter: BenchmarkFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            sort_by: SortField::default(),
            order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_LIMIT,
            filter: BenchmarkFilter::default(),
        }
    }
}

impl ListQuery {
    /// Unparsable numbers fall back to defaults instead of failing the request
    pub fn parse(
        sort_by: Option<&str>,
        order: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
        filter: BenchmarkFilter,
    ) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        let limit = match limit.and_then(|l| l.trim().parse::<u32>().ok()) {
            None => DEFAULT_LIMIT,
            Some(0) => MAX_LIMIT,
            Some(n) => n.min(MAX_LIMIT),
        };

        Self {
            sort_by: SortField::parse(sort_by),
            order: SortOrder::parse(order),
            page,
            limit,
            filter,
        }
    }

    /// Rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Deterministic cache key
    ///
    /// Filter values are length-prefixed so that a `:` inside a value
    /// cannot make two different queries collide.
    pub fn cache_key(&self) -> String {
        fn part(value: &Option<String>) -> String {
            match value {
                Some(v) => format!("{}#{}", v.len(), v),
                None => "-".to_string(),
            }
        }

        let f = &self.filter;
        format!(
            "benchmarks:{}:{}:{}:{}:{}:{}:{}:{}:{}",
            self.sort_by.as_str(),
            self.order,
            self.page,
            self.limit,
            part(&f.model),
            part(&f.ollama_version),
            part(&f.os),
            part(&f.cpu),
            part(&f.gpu),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(
        sort_by: Option<&str>,
        order: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> ListQuery {
        ListQuery::parse(sort_by, order, page, limit, BenchmarkFilter::default())
    }

    #[test]
    fn test_defaults() {
        let query = parse(None, None, None, None);
        assert_eq!(query, ListQuery::default());
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_sort_whitelist() {
        assert_eq!(SortField::parse(Some("eval_count")), SortField::EvalCount);
        assert_eq!(SortField::parse(Some("received_at")), SortField::ReceivedAt);
        assert_eq!(
            SortField::parse(Some("payload; DROP TABLE benchmarks")),
            SortField::Timestamp
        );
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("ascending")), SortOrder::Desc);
    }

    #[test]
    fn test_paging() {
        let query = parse(None, None, Some("3"), Some("20"));
        assert_eq!(query.offset(), 40);

        assert_eq!(parse(None, None, Some("0"), None).page, 1);
        assert_eq!(parse(None, None, Some("-2"), None).page, 1);
        assert_eq!(parse(None, None, Some("abc"), None).page, 1);
        assert_eq!(parse(None, None, None, Some("abc")).limit, DEFAULT_LIMIT);
        assert_eq!(parse(None, None, None, Some("0")).limit, MAX_LIMIT);
        assert_eq!(parse(None, None, None, Some("4000000000")).limit, MAX_LIMIT);
    }

    #[test]
    fn test_filter_matching() {
        let filter = BenchmarkFilter::new(Some("llama3"), None, Some("linux"), None, Some("RTX"));
        let rtx = "NVIDIA GeForce RTX 4090";
        assert!(filter.matches("llama3", "0.1.38", "Linux", "AMD", rtx));
        assert!(!filter.matches("llama3:70b", "0.1.38", "Linux", "AMD", rtx));
        assert!(!filter.matches("llama3", "0.1.38", "Darwin", "Apple M2", "Apple M2"));

        let empty = BenchmarkFilter::new(Some(""), Some("  "), None, None, None);
        assert_eq!(empty, BenchmarkFilter::default());
        assert!(empty.matches("", "", "", "", ""));
    }

    #[test]
    fn test_cache_key_distinguishes_queries() {
        let colon = BenchmarkFilter::new(Some("a:b"), None, None, None, None);
        let split = BenchmarkFilter::new(Some("a"), Some("b"), None, None, None);
        let a = ListQuery::parse(None, None, None, None, colon);
        let b = ListQuery::parse(None, None, None, None, split);
        assert_ne!(a.cache_key(), b.cache_key());

        let normalized = parse(Some("bogus"), Some("DESC"), Some("1"), Some("10"));
        assert_eq!(parse(None, None, None, None).cache_key(), normalized.cache_key());
        assert_ne!(
            parse(None, None, Some("1"), None).cache_key(),
            parse(None, None, Some("2"), None).cache_key()
        );
    }
}
