use std::fmt;

use regex::{Captures, Regex};

/// Scrubs credentials from text before it is logged
///
/// Tracker error bodies occasionally echo request headers back; this removes
/// OAuth tokens, organization ids and password/token fields.
#[derive(Clone)]
pub struct SecretScrubber {
    oauth_pattern: Regex,
    yandex_token_pattern: Regex,
    org_id_pattern: Regex,
    field_pattern: Regex,
}

impl SecretScrubber {
    pub fn new() -> Self {
        Self {
            // Authorization header values: OAuth <token> / Bearer <token>
            oauth_pattern: Regex::new(r"(OAuth|Bearer)\s+[A-Za-z0-9\-_\.]+")
                .expect("oauth pattern is valid"),
            // Bare Yandex OAuth tokens
            yandex_token_pattern: Regex::new(r"\b(?:y0_|AQAAAA)[A-Za-z0-9\-_]{16,}")
                .expect("token pattern is valid"),
            org_id_pattern: Regex::new(r#"(?i)(x-org-id["']?\s*[:=]\s*["']?)[^"'\s,}]+"#)
                .expect("org id pattern is valid"),
            field_pattern: Regex::new(
                r#"(?i)(["']?(?:password|token|login|secret)["']?\s*[:=]\s*["']?)[^"'\s,}]+"#,
            )
            .expect("field pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .oauth_pattern
            .replace_all(message, |caps: &Captures| format!("{} [REDACTED]", &caps[1]));
        let scrubbed = self
            .yandex_token_pattern
            .replace_all(&scrubbed, "[REDACTED]");
        let scrubbed = self.org_id_pattern.replace_all(&scrubbed, "${1}[REDACTED]");
        self.field_pattern
            .replace_all(&scrubbed, "${1}[REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
