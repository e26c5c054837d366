use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ui::login::{FormPolicy, PasswordPolicy};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub mock_login: MockLoginConfig,
}

/// Login form input rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Email is truncated to this many characters (default: 25).
    #[serde(default = "default_email_max_chars")]
    pub email_max_chars: usize,
    /// Minimum email length for the button to enable (default: 6).
    #[serde(default = "default_min_email_chars")]
    pub min_email_chars: usize,
    /// Minimum password length for the button to enable (default: 8).
    #[serde(default = "default_min_password_chars")]
    pub min_password_chars: usize,
    /// Password cap in characters. Absent means uncapped.
    #[serde(default)]
    pub password_max_chars: Option<usize>,
}

/// Carousel timing and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Time between advances in milliseconds (default: 5000).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_items")]
    pub items: Vec<String>,
}

/// Behavior of the in-process mock login service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MockLoginConfig {
    /// Simulated round-trip time in milliseconds (default: 0).
    #[serde(default)]
    pub latency_ms: u64,
    /// Token handed out on success.
    #[serde(default)]
    pub token: Option<String>,
    /// When set, every login fails with this message.
    #[serde(default)]
    pub fail_with: Option<String>,
}

fn default_email_max_chars() -> usize {
    25
}

fn default_min_email_chars() -> usize {
    6
}

fn default_min_password_chars() -> usize {
    8
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_items() -> Vec<String> {
    vec![
        "Welcome".to_string(),
        "Sign in with your email".to_string(),
        "Your data stays yours".to_string(),
    ]
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            email_max_chars: default_email_max_chars(),
            min_email_chars: default_min_email_chars(),
            min_password_chars: default_min_password_chars(),
            password_max_chars: None,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            items: default_items(),
        }
    }
}

impl FormConfig {
    pub fn policy(&self) -> FormPolicy {
        FormPolicy {
            email_max_chars: self.email_max_chars,
            min_email_chars: self.min_email_chars,
            min_password_chars: self.min_password_chars,
            password: match self.password_max_chars {
                Some(max_chars) => PasswordPolicy::Capped { max_chars },
                None => PasswordPolicy::Uncapped,
            },
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
