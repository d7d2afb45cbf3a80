use secrecy::ExposeSecret;
use serde::Serialize;
use shopbot_core::config::{AppConfig, LoadOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

const DEPENDENT_CHECKS: [&str; 3] = ["llm_readiness", "retrieval_readiness", "catalog_lexicon"];

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_llm(&config));
            checks.push(check_retrieval(&config));
            checks.push(check_lexicon(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.extend(DEPENDENT_CHECKS.into_iter().map(|name| DoctorCheck {
                name,
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            }));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_llm(config: &AppConfig) -> DoctorCheck {
    let has_key = config
        .llm
        .api_key
        .as_ref()
        .is_some_and(|key| !key.expose_secret().trim().is_empty());

    if config.llm.provider.requires_api_key() && !has_key {
        return DoctorCheck {
            name: "llm_readiness",
            status: CheckStatus::Fail,
            details: format!("{:?} requires llm.api_key", config.llm.provider),
        };
    }

    DoctorCheck {
        name: "llm_readiness",
        status: CheckStatus::Pass,
        details: format!(
            "{:?} model `{}` at {}",
            config.llm.provider,
            config.llm.model,
            config.llm.resolved_base_url()
        ),
    }
}

fn check_retrieval(config: &AppConfig) -> DoctorCheck {
    DoctorCheck {
        name: "retrieval_readiness",
        status: CheckStatus::Pass,
        details: format!(
            "search endpoint `{}` (top_k={}, token {})",
            config.retrieval.endpoint,
            config.retrieval.top_k,
            if config.retrieval.api_token.is_some() { "set" } else { "unset" }
        ),
    }
}

fn check_lexicon(config: &AppConfig) -> DoctorCheck {
    let lexicon = config.catalog.lexicon();
    if lexicon.categories.is_empty() {
        return DoctorCheck {
            name: "catalog_lexicon",
            status: CheckStatus::Fail,
            details: "no product categories configured".to_string(),
        };
    }

    DoctorCheck {
        name: "catalog_lexicon",
        status: CheckStatus::Pass,
        details: format!(
            "{} categories, {} brands",
            lexicon.categories.len(),
            lexicon.brands.len()
        ),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
