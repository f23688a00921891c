//! Flattening an error chain into an event

use super::types::{Event, EventStacktrace, Exception, InputAnnotation, Level};
use crate::config::ReportConfig;
use faultline_core::AppError;

/// Key under which a link's input is annotated
pub fn input_annotation_key(code: &str, position: usize) -> String {
    format!("{}_{}", code, position)
}

/// Build the event describing `err` and its chain.
///
/// Exceptions are listed root cause first; input annotations and the
/// fingerprint follow the chain from the outermost link.
pub fn build_event(err: &AppError, config: &ReportConfig) -> Event {
    let mut event = Event::new(config.logger.clone(), err.message());
    event.environment = config.environment.clone();
    event.release = config.release.clone();
    event.server_name = config.server_name.clone();
    event.extra = config.default_extra.clone();
    for (key, value) in &config.tags {
        event.set_tag(key.clone(), value.clone());
    }

    let mut exceptions = Vec::new();
    let mut culprit = err.message();
    for (position, link) in err.chain().enumerate() {
        exceptions.push(Exception {
            kind: link.code().to_string(),
            value: link.to_string(),
            stacktrace: link.stacktrace().map(EventStacktrace::from),
        });
        event.fingerprint.push(link.code().to_string());

        if let Some(input) = link.input() {
            let key = input_annotation_key(link.code(), position);
            event.extra.insert(key.clone(), input.clone());
            event.input_annotations.push(InputAnnotation {
                key,
                value: input.clone(),
            });
        }
        culprit = link.message();
    }
    exceptions.reverse();

    event.set_culprit(culprit);
    event.exception.values = exceptions;
    event.level = if err.is_panic() {
        Level::Fatal
    } else {
        Level::Error
    };

    if let Some(status) = err.status_code() {
        event.set_tag("classification", err.classification().as_str());
        event.set_tag("status_code", status.to_string());
    }

    tracing::debug!(
        event_id = %event.event_id,
        exceptions = event.exception.values.len(),
        level = ?event.level,
        "Built event from error chain"
    );
    event
}
