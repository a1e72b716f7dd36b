//! Environment toggle parsing for session configuration.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean variable and the value debug builds assume when it is unusable.
pub(super) struct BoolToggle {
    name: &'static str,
    debug_default: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, debug_default: bool) -> Self {
        Self {
            name,
            debug_default,
        }
    }
}

/// Debug builds warn and substitute `fallback`; release builds fail.
fn fallback_in_debug<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_bool_toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    toggle: BoolToggle,
) -> Result<bool, SessionConfigError> {
    let BoolToggle {
        name,
        debug_default,
    } = toggle;
    let Some(value) = env.string(name) else {
        return fallback_in_debug(
            mode,
            debug_default,
            SessionConfigError::MissingEnv { name },
            || warn!(variable = name, default = debug_default, "session toggle not set"),
        );
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => fallback_in_debug(
            mode,
            debug_default,
            SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || {
                warn!(
                    variable = name,
                    value = %value,
                    default = debug_default,
                    "invalid session toggle"
                );
            },
        ),
    }
}

pub(super) fn parse_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return fallback_in_debug(
            mode,
            default,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        );
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => fallback_in_debug(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without secure cookies; browsers may reject them"),
        ),
        _ => fallback_in_debug(
            mode,
            default,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_SAMESITE; using default"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
