// src/state/notice.rs
use std::time::{Duration, Instant};

/// How long an inline notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Short message shown next to the control that produced it; goes away on
/// its own.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    created: Instant,
    ttl: Duration,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }

    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created: Instant::now(),
            ttl: NOTICE_TTL,
        }
    }

    #[cfg(test)]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= self.ttl
    }

    pub fn remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.created.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_ttl() {
        let notice = Notice::error("Solo se aceptan archivos .txt");
        let start = Instant::now();
        assert!(!notice.is_expired_at(start));
        assert!(notice.is_expired_at(start + NOTICE_TTL + Duration::from_millis(1)));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let notice = Notice::info("ok").with_ttl(Duration::ZERO);
        assert!(notice.is_expired());
        assert_eq!(notice.remaining(), Duration::ZERO);
    }
}
