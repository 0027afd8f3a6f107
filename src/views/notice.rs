// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot notifications shown at the top of the next rendered page.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(NoticeLevel::Success),
            "error" => Some(NoticeLevel::Error),
            "info" => Some(NoticeLevel::Info),
            _ => None,
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Cookie value: `level|message`. The cookie jar percent-encodes it on
    /// the way out and decodes it on the way back in.
    pub fn encode(&self) -> String {
        format!("{}|{}", self.level, self.message)
    }

    /// Inverse of [`Notice::encode`]. Anything unreadable is dropped.
    pub fn decode(value: &str) -> Option<Self> {
        let (level, message) = value.split_once('|')?;
        Some(Self {
            level: NoticeLevel::parse(level)?,
            message: message.to_string(),
        })
    }
}
