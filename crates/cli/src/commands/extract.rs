use shopbot_core::config::{AppConfig, LoadOptions};
use shopbot_core::ConstraintExtractor;

use super::CommandResult;

pub fn run(query: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "extract",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    let query = query.trim();
    if query.is_empty() {
        return CommandResult::failure("extract", "invalid_request", "query must not be empty", 4);
    }

    let constraints = ConstraintExtractor::new(config.catalog.lexicon()).extract(query);
    CommandResult::success_with_data("extract", format!("constraints for `{query}`"), &constraints)
}
