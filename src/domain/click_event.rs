//! Click event model for asynchronous analytics recording.

/// A click event in flight between the resolution engine and the
/// background worker.
///
/// Carries only derived analytics: the referrer header, a device class
/// computed from the user agent, and coarse geography taken from CDN
/// headers. Raw IP addresses never enter this pipeline.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub referrer: Option<String>,
    pub device: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl ClickEvent {
    /// Builds an event from raw request metadata, deriving the device
    /// class and dropping everything identifying.
    pub fn from_request(
        link_id: i64,
        referrer: Option<&str>,
        user_agent: Option<&str>,
        country: Option<&str>,
        city: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            referrer: referrer.map(str::to_string),
            device: user_agent.map(|ua| device_class(ua).to_string()),
            country: country.map(str::to_string),
            city: city.map(str::to_string),
        }
    }
}

/// Coarse device classification from a User-Agent string.
///
/// Intentionally rough: the analytics views only distinguish bot, mobile,
/// tablet and desktop traffic.
pub fn device_class(user_agent: &str) -> &'static str {
    let ua = user_agent.to_ascii_lowercase();

    if ua.contains("bot") || ua.contains("crawler") || ua.contains("spider") {
        "bot"
    } else if ua.contains("ipad") || ua.contains("tablet") {
        "tablet"
    } else if ua.contains("mobile") || ua.contains("android") || ua.contains("iphone") {
        "mobile"
    } else {
        "desktop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_classification() {
        assert_eq!(device_class("Googlebot/2.1"), "bot");
        assert_eq!(
            device_class("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"),
            "mobile"
        );
        assert_eq!(device_class("Mozilla/5.0 (iPad; CPU OS 16_0)"), "tablet");
        assert_eq!(
            device_class("Mozilla/5.0 (X11; Linux x86_64) Firefox/126.0"),
            "desktop"
        );
    }

    #[test]
    fn test_event_carries_no_raw_user_agent() {
        let event = ClickEvent::from_request(
            1,
            Some("https://news.ycombinator.com/"),
            Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
            Some("DE"),
            None,
        );

        assert_eq!(event.device.as_deref(), Some("desktop"));
        assert_eq!(event.country.as_deref(), Some("DE"));
        assert_eq!(event.referrer.as_deref(), Some("https://news.ycombinator.com/"));
    }
}
