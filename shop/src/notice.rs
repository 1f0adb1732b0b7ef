// shop/src/notice.rs

//! One-shot user feedback returned alongside successful responses.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
  Success,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

  pub fn warning(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Warning,
      message: message.into(),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      level: NoticeLevel::Error,
      message: message.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn levels_serialize_lowercase() {
    let body = serde_json::to_value(Notice::warning("Only 2 left.")).unwrap();
    assert_eq!(body["level"], "warning");
    assert_eq!(serde_json::to_value(Notice::error("x").level).unwrap(), "error");
    assert_eq!(Notice::success("ok").level, NoticeLevel::Success);
  }
}
