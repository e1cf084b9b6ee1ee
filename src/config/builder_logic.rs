// src/config/builder_logic.rs

use super::ConfigBuilder;
use crate::constants::MAX_WORKERS;
use crate::core_types::RepoCoordinate;
use crate::errors::ConfigError;
use crate::github::{parse_repo_spec, Endpoints, DEFAULT_API_BASE, DEFAULT_RAW_BASE};

/// Validates the numeric options on the `ConfigBuilder`.
pub(super) fn validate_builder_options(builder: &ConfigBuilder) -> Result<(), ConfigError> {
    if let Some(workers) = builder.workers {
        if workers == 0 || workers > MAX_WORKERS {
            return Err(ConfigError::InvalidValue {
                option: "workers".to_string(),
                reason: format!("must be between 1 and {}, got {}", MAX_WORKERS, workers),
            });
        }
    }
    if builder.retries == Some(0) {
        return Err(ConfigError::InvalidValue {
            option: "retries".to_string(),
            reason: "at least one attempt is required".to_string(),
        });
    }
    Ok(())
}

/// Determines the coordinate and the requested path.
///
/// `repo` wins over `username` + `repository`. An explicit `git_ref` wins over a
/// ref found in `repo`, and an explicit `path` wins over a path found in a
/// browse URL.
pub(super) fn resolve_repository(
    repo: Option<&str>,
    username: Option<&str>,
    repository: Option<&str>,
    git_ref: Option<&str>,
    path: Option<&str>,
) -> Result<(RepoCoordinate, String), ConfigError> {
    let git_ref = git_ref.map(str::trim).filter(|r| !r.is_empty());

    let spec = match (repo.map(str::trim).filter(|r| !r.is_empty()), username, repository) {
        (Some(repo), _, _) => {
            if username.is_some() || repository.is_some() {
                log::debug!("Both 'repo' and 'username'/'repository' given; using '{}'.", repo);
            }
            parse_repo_spec(repo)?
        }
        (None, Some(user), Some(name)) => {
            let (user, name) = (user.trim(), name.trim());
            if user.contains('/') || name.contains('/') {
                return Err(ConfigError::InvalidRepository {
                    input: format!("{}/{}", user, name),
                    reason: "username and repository must not contain '/'".to_string(),
                });
            }
            parse_repo_spec(&format!("{}/{}", user, name))?
        }
        _ => return Err(ConfigError::MissingRepository),
    };

    let path = path
        .map(str::to_string)
        .or_else(|| spec.path.clone())
        .unwrap_or_default();
    Ok((spec.coordinate(git_ref), path.trim().to_string()))
}

/// Determines the endpoints from explicit values or the public GitHub hosts.
pub(super) fn determine_endpoints(
    endpoints: Option<Endpoints>,
    api_url: Option<&str>,
    raw_url: Option<&str>,
) -> Result<Endpoints, ConfigError> {
    match (endpoints, api_url, raw_url) {
        (Some(endpoints), None, None) => Ok(endpoints),
        (base, api, raw) => {
            let base = base.unwrap_or_default();
            Endpoints::new(
                api.unwrap_or(base.api_base()),
                raw.unwrap_or(base.raw_base()),
            )
        }
    }
}
