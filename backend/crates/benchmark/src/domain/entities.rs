//! Domain Entities
//!
//! Benchmark results as submitted by clients, and the record persisted for
//! each accepted submission.

use chrono::{DateTime, Utc};
use kernel::id::SubmissionId;
use pow::ProofOfWorkSolution;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::domain::model_catalog;

/// Host description reported by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysInfo {
    pub os: String,
    pub arch: String,
    pub version: String,
    pub kernel: String,
    pub cpu: String,
    pub cpu_name: String,
    pub memory: String,
}

/// GPU description reported by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuInfo {
    pub name: String,
    pub vendor: String,
    pub memory: String,
    pub driver_version: String,
    pub count: i64,
}

/// One LLM inference benchmark run
///
/// Missing scalars decode to their zero value so that a sparse payload is
/// reported as a metrics or model problem rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    #[serde(default)]
    pub model_name: String,
    /// Unix seconds
    #[serde(default)]
    pub timestamp: i64,
    /// Seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub tokens_per_second: f64,
    #[serde(default)]
    pub eval_count: i64,
    #[serde(default)]
    pub eval_duration: i64,
    #[serde(default)]
    pub iterations: i64,
    #[serde(default)]
    pub sys_info: Option<SysInfo>,
    #[serde(default)]
    pub gpu_info: Option<GpuInfo>,
    #[serde(default)]
    pub ollama_version: String,
    #[serde(default)]
    pub client_type: String,
    #[serde(default)]
    pub client_version: String,
    #[serde(default)]
    pub submission_id: String,
    /// Self-reported address; analytics only, never used for throttling
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
    pub proof_of_work: ProofOfWorkSolution,
}

impl BenchmarkResult {
    /// Domain checks applied after decoding
    pub fn validate(&self) -> Result<(), &'static str> {
        let metrics_ok = self.eval_count > 0
            && self.tokens_per_second.is_finite()
            && self.tokens_per_second > 0.0;
        if !metrics_ok {
            return Err("Invalid benchmark metrics");
        }
        if !model_catalog::is_supported(&self.model_name) {
            return Err("Invalid model name");
        }
        // TEXT and JSONB columns cannot hold U+0000
        if self.text_fields().any(|field| field.contains('\0')) {
            return Err("Invalid benchmark data");
        }
        Ok(())
    }

    fn text_fields(&self) -> impl Iterator<Item = &str> {
        let own = [
            &self.model_name,
            &self.ollama_version,
            &self.client_type,
            &self.client_version,
            &self.submission_id,
            &self.ip,
            &self.proof_of_work.challenge,
            &self.proof_of_work.nonce,
        ];
        let sys = self.sys_info.iter().flat_map(|s| {
            [&s.os, &s.arch, &s.version, &s.kernel, &s.cpu, &s.cpu_name, &s.memory]
        });
        let gpu = self
            .gpu_info
            .iter()
            .flat_map(|g| [&g.name, &g.vendor, &g.memory, &g.driver_version]);

        own.into_iter().chain(sys).chain(gpu).map(String::as_str)
    }

    pub fn os(&self) -> &str {
        self.sys_info.as_ref().map_or("", |s| s.os.as_str())
    }

    pub fn cpu_name(&self) -> &str {
        self.sys_info.as_ref().map_or("", |s| s.cpu_name.as_str())
    }

    pub fn gpu_name(&self) -> &str {
        self.gpu_info.as_ref().map_or("", |g| g.name.as_str())
    }

    /// Copy for public read endpoints, without the self-reported address
    pub fn redacted(&self) -> Self {
        Self {
            ip: String::new(),
            ..self.clone()
        }
    }
}

/// What gets persisted for an accepted submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub submission_id: SubmissionId,
    pub result: BenchmarkResult,
    /// Transport-level peer address
    pub client_ip: IpAddr,
    pub received_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// The stored result always carries the authenticated submission id
    pub fn new(
        submission_id: SubmissionId,
        mut result: BenchmarkResult,
        client_ip: IpAddr,
        received_at: DateTime<Utc>,
    ) -> Self {
        result.submission_id = submission_id.to_string();
        Self {
            submission_id,
            result,
            client_ip,
            received_at,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn benchmark(model: &str) -> BenchmarkResult {
        BenchmarkResult {
            model_name: model.to_string(),
            timestamp: 1_717_000_000,
            duration: 12.5,
            tokens_per_second: 42.0,
            eval_count: 512,
            eval_duration: 12_000_000_000,
            iterations: 3,
            sys_info: Some(SysInfo {
                os: "Linux".into(),
                arch: "x86_64".into(),
                version: "6.8".into(),
                kernel: "6.8.0".into(),
                cpu: "x86_64".into(),
                cpu_name: "AMD Ryzen 9 7950X".into(),
                memory: "64 GB".into(),
            }),
            gpu_info: Some(GpuInfo {
                name: "NVIDIA GeForce RTX 4090".into(),
                vendor: "NVIDIA".into(),
                memory: "24 GB".into(),
                driver_version: "550.54".into(),
                count: 1,
            }),
            ollama_version: "0.1.38".into(),
            client_type: "cli".into(),
            client_version: "1.0.0".into(),
            submission_id: String::new(),
            ip: "198.51.100.7".into(),
            proof_of_work: ProofOfWorkSolution {
                challenge: String::new(),
                nonce: String::new(),
                timestamp: 0,
                difficulty: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::benchmark;
    use super::*;

    #[test]
    fn test_validate_accepts_catalog_model() {
        assert_eq!(benchmark("llama3").validate(), Ok(()));
        assert_eq!(benchmark("qwen2:0.5b").validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_metrics() {
        for tps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut result = benchmark("llama3");
            result.tokens_per_second = tps;
            assert_eq!(result.validate(), Err("Invalid benchmark metrics"));
        }

        let mut result = benchmark("llama3");
        result.eval_count = 0;
        assert_eq!(result.validate(), Err("Invalid benchmark metrics"));
    }

    #[test]
    fn test_validate_rejects_unknown_model() {
        assert_eq!(benchmark("gpt-4").validate(), Err("Invalid model name"));
        assert_eq!(benchmark("").validate(), Err("Invalid model name"));
    }

    #[test]
    fn test_validate_rejects_nul_in_any_text_field() {
        let mut result = benchmark("llama3");
        result.sys_info = Some(SysInfo {
            cpu_name: "Ryzen\u{0}9".into(),
            ..SysInfo::default()
        });
        assert_eq!(result.validate(), Err("Invalid benchmark data"));

        let mut result = benchmark("llama3");
        result.gpu_info = Some(GpuInfo {
            driver_version: "\0".into(),
            ..GpuInfo::default()
        });
        assert_eq!(result.validate(), Err("Invalid benchmark data"));

        let mut result = benchmark("llama3");
        result.proof_of_work.nonce = "12\03".into();
        assert_eq!(result.validate(), Err("Invalid benchmark data"));
    }

    #[test]
    fn test_sparse_payload_decodes_with_defaults() {
        let json = r#"{
            "model_name": "llama3",
            "tokens_per_second": 10.5,
            "eval_count": 100,
            "sys_info": {"os": "Darwin"},
            "proof_of_work": {"challenge": "ab", "nonce": "1", "timestamp": 0, "difficulty": 4}
        }"#;
        let result: BenchmarkResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.os(), "Darwin");
        assert_eq!(result.cpu_name(), "");
        assert_eq!(result.gpu_name(), "");
        assert!(result.gpu_info.is_none());
        assert_eq!(result.ollama_version, "");
    }

    #[test]
    fn test_missing_proof_of_work_is_a_parse_error() {
        let json = r#"{"model_name": "llama3", "tokens_per_second": 1.0, "eval_count": 1}"#;
        assert!(serde_json::from_str::<BenchmarkResult>(json).is_err());
    }

    #[test]
    fn test_record_overwrites_submission_id() {
        let id = SubmissionId::new();
        let mut result = benchmark("llama3");
        result.submission_id = "client-chosen".into();

        let record = SubmissionRecord::new(id, result, "127.0.0.1".parse().unwrap(), Utc::now());
        assert_eq!(record.result.submission_id, id.to_string());
    }

    #[test]
    fn test_redacted_drops_reported_ip() {
        let redacted = benchmark("llama3").redacted();
        let json = serde_json::to_value(&redacted).unwrap();
        assert!(json.get("ip").is_none());
        assert_eq!(json["model_name"], "llama3");
    }
}
