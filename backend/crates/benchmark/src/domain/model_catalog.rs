//! Supported model catalog

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub parameters: &'static str,
    pub quantization: &'static str,
}

const fn model(name: &'static str, parameters: &'static str) -> ModelInfo {
    ModelInfo {
        name,
        parameters,
        quantization: "Q4_0",
    }
}

pub const MODELS: &[ModelInfo] = &[
    model("llama3", "8B"),
    ModelInfo {
        name: "phi3",
        parameters: "3B",
        quantization: "Q4_K_M",
    },
    model("phi3:14b", "14B"),
    model("aya", "8B"),
    model("aya:35b", "35B"),
    model("gemma", "7B"),
    model("gemma:2b", "2B"),
    model("falcon2", "11B"),
    model("mistral", "7B"),
    model("mixtral:8x22b", "176B"),
    model("mixtral:8x7b", "56B"),
    model("command-r", "35B"),
    model("command-r-plus", "104B"),
    model("dolphin-llama3", "8B"),
    model("dolphin-llama3:70b", "70B"),
    model("dolphin-mixtral:8x22b", "176B"),
    model("dolphin-mixtral:8x7b", "56B"),
    model("llama3-chatqa", "8B"),
    model("llama3:70b", "70B"),
    model("llama3-gradient:8b", "8B"),
    model("llama3-gradient:70b", "70B"),
    model("qwen", "7B"),
    model("qwen2", "7B"),
    model("qwen2:0.5b", "0.5B"),
    model("qwen2:1.5b", "1.5B"),
    model("llama2", "7B"),
];

/// Exact, case-sensitive catalog lookup
pub fn is_supported(name: &str) -> bool {
    MODELS.iter().any(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_contents() {
        assert_eq!(MODELS.len(), 26);
        let names: HashSet<_> = MODELS.iter().map(|m| m.name).collect();
        assert_eq!(names.len(), MODELS.len());

        let phi3 = MODELS.iter().find(|m| m.name == "phi3").unwrap();
        assert_eq!(phi3.quantization, "Q4_K_M");
        assert!(
            MODELS
                .iter()
                .filter(|m| m.name != "phi3")
                .all(|m| m.quantization == "Q4_0")
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(is_supported("mixtral:8x22b"));
        assert!(!is_supported("Llama3"));
        assert!(!is_supported("llama3 "));
        assert!(!is_supported("llama3:8b"));
    }
}
