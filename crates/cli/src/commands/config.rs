use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use shopbot_core::config::{AppConfig, LoadOptions};
use toml::Value;

/// Effective value of one config key plus the env var that can override it.
struct Field {
    key_path: &'static str,
    env_keys: &'static [&'static str],
    value: String,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in effective_fields(&config) {
        let source = field_source(
            field.key_path,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key_path, &field.value, source));
    }

    lines.join("\n")
}

fn effective_fields(config: &AppConfig) -> Vec<Field> {
    let lexicon = config.catalog.lexicon();

    vec![
        Field {
            key_path: "llm.provider",
            env_keys: &["SHOPBOT_LLM_PROVIDER"],
            value: format!("{:?}", config.llm.provider),
        },
        Field {
            key_path: "llm.model",
            env_keys: &["SHOPBOT_LLM_MODEL"],
            value: config.llm.model.clone(),
        },
        Field {
            key_path: "llm.base_url",
            env_keys: &["SHOPBOT_LLM_BASE_URL"],
            value: config.llm.resolved_base_url().to_string(),
        },
        Field {
            key_path: "llm.api_key",
            env_keys: &["SHOPBOT_LLM_API_KEY"],
            value: redact_secret(config.llm.api_key.as_ref()),
        },
        Field {
            key_path: "llm.timeout_secs",
            env_keys: &["SHOPBOT_LLM_TIMEOUT_SECS"],
            value: config.llm.timeout_secs.to_string(),
        },
        Field {
            key_path: "retrieval.endpoint",
            env_keys: &["SHOPBOT_RETRIEVAL_ENDPOINT"],
            value: config.retrieval.endpoint.clone(),
        },
        Field {
            key_path: "retrieval.api_token",
            env_keys: &["SHOPBOT_RETRIEVAL_API_TOKEN"],
            value: redact_secret(config.retrieval.api_token.as_ref()),
        },
        Field {
            key_path: "retrieval.top_k",
            env_keys: &["SHOPBOT_RETRIEVAL_TOP_K"],
            value: config.retrieval.top_k.to_string(),
        },
        Field {
            key_path: "server.bind_address",
            env_keys: &["SHOPBOT_SERVER_BIND_ADDRESS"],
            value: config.server.bind_address.clone(),
        },
        Field {
            key_path: "server.port",
            env_keys: &["SHOPBOT_SERVER_PORT"],
            value: config.server.port.to_string(),
        },
        Field {
            key_path: "logging.level",
            env_keys: &["SHOPBOT_LOGGING_LEVEL", "SHOPBOT_LOG_LEVEL"],
            value: config.logging.level.clone(),
        },
        Field {
            key_path: "logging.format",
            env_keys: &["SHOPBOT_LOGGING_FORMAT", "SHOPBOT_LOG_FORMAT"],
            value: format!("{:?}", config.logging.format),
        },
        Field {
            key_path: "catalog.categories",
            env_keys: &[],
            value: format!("{} categories", lexicon.categories.len()),
        },
        Field {
            key_path: "catalog.brands",
            env_keys: &["SHOPBOT_CATALOG_BRANDS"],
            value: format!("{} brands", lexicon.brands.len()),
        },
    ]
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("shopbot.toml"), PathBuf::from("config/shopbot.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps a recognizable key prefix such as `gsk_` or `sk-` and hides the rest.
fn redact_secret(secret: Option<&SecretString>) -> String {
    let Some(secret) = secret else {
        return "<unset>".to_string();
    };

    let trimmed = secret.expose_secret().trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    match trimmed.find(['-', '_']) {
        Some(index) if index > 0 && index <= 4 => format!("{}***", &trimmed[..=index]),
        _ => "<redacted>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use toml::Value;

    use super::{contains_path, redact_secret};

    #[test]
    fn redaction_keeps_only_known_prefix() {
        let groq = SecretString::from("gsk_abcdef123456".to_string());
        let openai = SecretString::from("sk-proj-abcdef".to_string());
        let opaque = SecretString::from("abcdef123456".to_string());

        assert_eq!(redact_secret(Some(&groq)), "gsk_***");
        assert_eq!(redact_secret(Some(&openai)), "sk-***");
        assert_eq!(redact_secret(Some(&opaque)), "<redacted>");
        assert_eq!(redact_secret(None), "<unset>");
    }

    #[test]
    fn nested_key_lookup() {
        let doc = "[llm]\nmodel = \"llama3.1\"\n".parse::<Value>().expect("toml");
        assert!(contains_path(&doc, "llm.model"));
        assert!(!contains_path(&doc, "llm.api_key"));
        assert!(!contains_path(&doc, "retrieval.endpoint"));
    }
}
