//! Event payload types

use chrono::{DateTime, Utc};
use faultline_core::{StackFrame, Stacktrace};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Crates whose frames belong to the toolchain or runtime
const NON_APP_CRATES: &[&str] = &["std", "core", "alloc", "tokio", "futures"];

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Fatal,
    Error,
}

/// User affected by the failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }
}

/// A frame in the monitoring service's format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFrame {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,
    pub in_app: bool,
}

impl From<&StackFrame> for EventFrame {
    fn from(frame: &StackFrame) -> Self {
        let krate = frame
            .module
            .trim_start_matches('<')
            .split("::")
            .next()
            .unwrap_or_default();
        let in_app = !NON_APP_CRATES.contains(&krate);
        Self {
            function: frame.function.clone(),
            module: frame.module.clone(),
            filename: frame.file_path.clone(),
            lineno: (frame.line > 0).then_some(frame.line),
            in_app,
        }
    }
}

/// Frames of one exception, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStacktrace {
    pub frames: Vec<EventFrame>,
}

impl From<&Stacktrace> for EventStacktrace {
    fn from(trace: &Stacktrace) -> Self {
        Self {
            frames: trace.iter().map(EventFrame::from).collect(),
        }
    }
}

/// One chain link as an exception entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    /// The link's code
    #[serde(rename = "type")]
    pub kind: String,
    /// The link's rendered text
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<EventStacktrace>,
}

/// Exceptions ordered root cause first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionList {
    pub values: Vec<Exception>,
}

/// Diagnostic input of one chain link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAnnotation {
    /// `<code>_<position>`, position counted from the outermost link
    pub key: String,
    pub value: Value,
}

/// Payload handed to the monitoring service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub platform: String,
    pub logger: String,
    pub message: String,
    pub culprit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
    pub fingerprint: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub exception: ExceptionList,
    /// Per-link inputs, outermost link first
    #[serde(skip)]
    pub input_annotations: Vec<InputAnnotation>,
}

impl Event {
    /// An empty error-level event with a fresh id
    pub fn new(logger: impl Into<String>, message: impl Into<String>) -> Self {
        let logger = logger.into();
        Self {
            event_id: Uuid::new_v4().simple().to_string(),
            timestamp: Utc::now(),
            level: Level::Error,
            platform: "rust".to_string(),
            fingerprint: vec![logger.clone()],
            logger,
            message: message.into(),
            culprit: String::new(),
            environment: None,
            release: None,
            server_name: None,
            tags: Vec::new(),
            extra: Map::new(),
            user: None,
            exception: ExceptionList::default(),
            input_annotations: Vec::new(),
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Add a tag, replacing an earlier tag with the same key
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_tag(key, value);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Append fingerprint components
    pub fn with_fingerprint<S: Into<String>>(mut self, parts: impl IntoIterator<Item = S>) -> Self {
        self.fingerprint.extend(parts.into_iter().map(Into::into));
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_culprit(&mut self, culprit: impl Into<String>) {
        self.culprit = culprit.into();
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.tags.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.tags.push((key, value)),
        }
    }

    /// Tag value for `key`
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_fatal(&self) -> bool {
        self.level == Level::Fatal
    }

    /// Serialize as the JSON body sent to the service
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
