use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Persisted scroll preferences, shared by every viewer.
///
/// Serialized with camelCase keys; absent fields deserialize to their
/// documented defaults rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSettings {
    /// Hostnames where wheel interception is active (exact match)
    #[serde(default)]
    pub enabled_sites: Vec<String>,
    /// Whether the speed multiplier applies
    #[serde(default = "default_speed_enabled")]
    pub speed_enabled: bool,
    /// Multiplier applied to each wheel delta
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: f64,
    /// Whether to animate the accumulated scroll
    #[serde(default)]
    pub smooth_scrolling: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_smooth_duration")]
    pub smooth_duration: u64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            enabled_sites: Vec::new(),
            speed_enabled: default_speed_enabled(),
            scroll_speed: default_scroll_speed(),
            smooth_scrolling: false,
            smooth_duration: default_smooth_duration(),
        }
    }
}

fn default_speed_enabled() -> bool {
    true
}

fn default_scroll_speed() -> f64 {
    1.0
}

fn default_smooth_duration() -> u64 {
    300
}

impl ScrollSettings {
    /// Whether interception is enabled for a hostname (exact match, no wildcards)
    pub fn is_enabled_for(&self, hostname: &str) -> bool {
        self.enabled_sites.iter().any(|site| site == hostname)
    }

    /// Add a hostname to the enabled set. Returns false if it was already present.
    pub fn enable_site(&mut self, hostname: &str) -> bool {
        if self.is_enabled_for(hostname) {
            return false;
        }
        self.enabled_sites.push(hostname.to_string());
        true
    }

    /// Remove a hostname from the enabled set. Returns false if it was absent.
    pub fn disable_site(&mut self, hostname: &str) -> bool {
        let before = self.enabled_sites.len();
        self.enabled_sites.retain(|site| site != hostname);
        self.enabled_sites.len() != before
    }

    /// Restore the four preference fields to their defaults.
    ///
    /// The enabled-sites list is deliberately left untouched.
    pub fn reset_preferences(&mut self) {
        self.speed_enabled = default_speed_enabled();
        self.scroll_speed = default_scroll_speed();
        self.smooth_scrolling = false;
        self.smooth_duration = default_smooth_duration();
    }

    /// Derive the per-page snapshot a viewer on `hostname` should apply
    pub fn snapshot_for(&self, hostname: &str) -> PageSettings {
        PageSettings {
            enabled_on_site: self.is_enabled_for(hostname),
            speed_enabled: self.speed_enabled,
            scroll_speed: self.scroll_speed,
            smooth_scrolling: self.smooth_scrolling,
            smooth_duration: self.smooth_duration,
        }
    }
}

/// In-memory settings snapshot owned by a single viewer.
///
/// This is also the payload of the `settings.update` push message. The
/// default snapshot is the safe pre-load state: interception off, everything
/// else at its stored default, so wheel events before the initial settings
/// load pass straight through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    #[serde(rename = "isEnabledOnSite")]
    pub enabled_on_site: bool,
    pub speed_enabled: bool,
    pub scroll_speed: f64,
    pub smooth_scrolling: bool,
    pub smooth_duration: u64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            enabled_on_site: false,
            speed_enabled: default_speed_enabled(),
            scroll_speed: default_scroll_speed(),
            smooth_scrolling: false,
            smooth_duration: default_smooth_duration(),
        }
    }
}

impl PageSettings {
    /// The multiplier actually applied to a wheel delta
    pub fn effective_multiplier(&self) -> f64 {
        if self.speed_enabled {
            self.scroll_speed
        } else {
            1.0
        }
    }

    /// Whether wheel events should be captured at all.
    ///
    /// False when the site is not enabled, or when the effective multiplier
    /// is exactly 1.0 with animation off (capturing would be a no-op, so
    /// native scrolling is preserved).
    pub fn intercepts(&self) -> bool {
        if !self.enabled_on_site {
            return false;
        }
        self.effective_multiplier() != 1.0 || self.smooth_scrolling
    }

    /// Animation duration as a [`Duration`]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.smooth_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ScrollSettings::default();
        assert!(settings.enabled_sites.is_empty());
        assert!(settings.speed_enabled);
        assert_eq!(settings.scroll_speed, 1.0);
        assert!(!settings.smooth_scrolling);
        assert_eq!(settings.smooth_duration, 300);
    }

    #[test]
    fn test_camel_case_keys() {
        let settings = ScrollSettings {
            enabled_sites: vec!["example.com".to_string()],
            speed_enabled: false,
            scroll_speed: 2.5,
            smooth_scrolling: true,
            smooth_duration: 450,
        };

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["enabledSites"][0], "example.com");
        assert_eq!(json["speedEnabled"], false);
        assert_eq!(json["scrollSpeed"], 2.5);
        assert_eq!(json["smoothScrolling"], true);
        assert_eq!(json["smoothDuration"], 450);
    }

    #[test]
    fn test_absent_fields_use_defaults() {
        let settings: ScrollSettings = serde_json::from_str(r#"{"scrollSpeed": 3.0}"#).unwrap();
        assert_eq!(settings.scroll_speed, 3.0);
        assert!(settings.speed_enabled);
        assert!(!settings.smooth_scrolling);
        assert_eq!(settings.smooth_duration, 300);
        assert!(settings.enabled_sites.is_empty());

        let settings: ScrollSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ScrollSettings::default());
    }

    #[test]
    fn test_enable_disable_roundtrip() {
        let mut settings = ScrollSettings::default();
        settings.enable_site("news.ycombinator.com");
        let original = settings.enabled_sites.clone();

        assert!(settings.enable_site("example.com"));
        assert!(!settings.enable_site("example.com"));
        assert!(settings.disable_site("example.com"));
        assert!(!settings.disable_site("example.com"));

        assert_eq!(settings.enabled_sites, original);
    }

    #[test]
    fn test_membership_is_exact_match() {
        let mut settings = ScrollSettings::default();
        settings.enable_site("example.com");

        assert!(settings.is_enabled_for("example.com"));
        assert!(!settings.is_enabled_for("www.example.com"));
        assert!(!settings.is_enabled_for("example.co"));
    }

    #[test]
    fn test_reset_keeps_sites() {
        let mut settings = ScrollSettings {
            enabled_sites: vec!["a.com".to_string(), "b.com".to_string()],
            speed_enabled: false,
            scroll_speed: 4.2,
            smooth_scrolling: true,
            smooth_duration: 800,
        };

        settings.reset_preferences();

        assert!(settings.speed_enabled);
        assert_eq!(settings.scroll_speed, 1.0);
        assert!(!settings.smooth_scrolling);
        assert_eq!(settings.smooth_duration, 300);
        assert_eq!(settings.enabled_sites, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_snapshot_for_hostname() {
        let mut settings = ScrollSettings::default();
        settings.enable_site("example.com");
        settings.scroll_speed = 2.0;

        let snap = settings.snapshot_for("example.com");
        assert!(snap.enabled_on_site);
        assert_eq!(snap.scroll_speed, 2.0);

        let snap = settings.snapshot_for("other.com");
        assert!(!snap.enabled_on_site);
        assert_eq!(snap.scroll_speed, 2.0);
    }

    #[test]
    fn test_default_snapshot_is_safe() {
        let snap = PageSettings::default();
        assert!(!snap.enabled_on_site);
        assert!(!snap.intercepts());
    }

    #[test]
    fn test_effective_multiplier() {
        let mut snap = PageSettings {
            enabled_on_site: true,
            scroll_speed: 3.0,
            ..PageSettings::default()
        };
        assert_eq!(snap.effective_multiplier(), 3.0);

        snap.speed_enabled = false;
        assert_eq!(snap.effective_multiplier(), 1.0);
    }

    #[test]
    fn test_intercepts_guards() {
        // Not enabled on site: never intercepts
        let snap = PageSettings {
            scroll_speed: 5.0,
            smooth_scrolling: true,
            ..PageSettings::default()
        };
        assert!(!snap.intercepts());

        // Enabled, multiplier 1.0, no animation: pure pass-through
        let snap = PageSettings {
            enabled_on_site: true,
            ..PageSettings::default()
        };
        assert!(!snap.intercepts());

        // Speed scaling disabled neutralizes a non-unit multiplier
        let snap = PageSettings {
            enabled_on_site: true,
            speed_enabled: false,
            scroll_speed: 5.0,
            ..PageSettings::default()
        };
        assert!(!snap.intercepts());

        // Animation alone is enough to capture
        let snap = PageSettings {
            enabled_on_site: true,
            smooth_scrolling: true,
            ..PageSettings::default()
        };
        assert!(snap.intercepts());

        // Non-unit multiplier alone is enough to capture
        let snap = PageSettings {
            enabled_on_site: true,
            scroll_speed: 0.5,
            ..PageSettings::default()
        };
        assert!(snap.intercepts());
    }

    #[test]
    fn test_update_message_key_names() {
        let snap = PageSettings {
            enabled_on_site: true,
            ..PageSettings::default()
        };

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["isEnabledOnSite"], true);
        assert_eq!(json["speedEnabled"], true);
        assert_eq!(json["scrollSpeed"], 1.0);
        assert_eq!(json["smoothScrolling"], false);
        assert_eq!(json["smoothDuration"], 300);
    }
}
