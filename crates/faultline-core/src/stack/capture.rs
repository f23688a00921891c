//! Call stack capture

use super::frame::StackFrame;
use serde::Serialize;
use std::ffi::c_void;
use std::fmt;

/// Upper bound on frames kept per capture
pub const MAX_FRAMES: usize = 50;

/// Extra raw frames walked so the capture machinery itself does not eat
/// into [`MAX_FRAMES`].
const CAPTURE_SLACK: usize = 16;

/// Symbol fragments that identify runtime and unwinder bookkeeping frames.
const RUNTIME_FRAMES: &[&str] = &[
    "std::rt::",
    "std::sys::",
    "std::sys_common::",
    "std::panicking::",
    "std::panic::",
    "std::thread::",
    "core::ops::function::",
    "__rust_begin_short_backtrace",
    "__rust_try",
    "__libc_start",
    "start_thread",
];

/// Bare symbols emitted by the C runtime around `main` and thread entry.
const RUNTIME_SYMBOLS: &[&str] = &["main", "_start", "clone", "clone3", "__clone", "__clone3"];

/// Ordered snapshot of a call stack, oldest caller first.
///
/// A `Stacktrace` always holds at least one frame; a capture that
/// resolves nothing yields `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Stacktrace {
    frames: Vec<StackFrame>,
}

impl Stacktrace {
    /// Capture the calling thread's stack.
    ///
    /// `skip` counts frames above the caller of `capture`: with `skip = 0`
    /// the function that called `capture` is the last (most recent) frame.
    #[inline(never)]
    pub fn capture(skip: usize) -> Option<Self> {
        let budget = MAX_FRAMES + skip + CAPTURE_SLACK;
        let mut ips: Vec<*mut c_void> = Vec::with_capacity(budget);

        backtrace::trace(|frame| {
            ips.push(frame.ip());
            ips.len() < budget
        });

        // Innermost first, one entry per symbol so inlined calls stay visible.
        let mut raw: Vec<(String, StackFrame)> = Vec::with_capacity(ips.len());
        for ip in ips {
            backtrace::resolve(ip, |symbol| {
                let name = symbol
                    .name()
                    .map(|n| format!("{:#}", n))
                    .unwrap_or_default();
                let file = symbol
                    .filename()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let line = symbol.lineno().unwrap_or(0);
                if name.is_empty() && file.is_empty() {
                    return;
                }
                let frame = StackFrame::from_symbol(&name, file, line);
                raw.push((name, frame));
            });
        }

        // Everything up to and including `capture` belongs to us or the unwinder.
        let window = &raw[..raw.len().min(CAPTURE_SLACK)];
        let internal = match window
            .iter()
            .rposition(|(name, _)| name.contains("Stacktrace::capture"))
        {
            Some(pos) => pos + 1,
            None => raw
                .iter()
                .take_while(|(name, _)| name.starts_with("backtrace::"))
                .count(),
        };
        raw.drain(..internal);

        let mut frames: Vec<StackFrame> = raw
            .into_iter()
            .skip(skip)
            .filter(|(name, _)| !is_runtime_frame(name))
            .map(|(_, frame)| frame)
            .take(MAX_FRAMES)
            .collect();

        frames.reverse();

        let trace = Self::from_frames(frames);
        if trace.is_none() {
            tracing::debug!(skip, "stack capture resolved no frames");
        }
        trace
    }

    /// Wrap an oldest-first frame list. Empty input yields `None`.
    pub fn from_frames(frames: Vec<StackFrame>) -> Option<Self> {
        if frames.is_empty() {
            None
        } else {
            Some(Self { frames })
        }
    }

    /// Frames, oldest caller first
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// The capture site (most recent frame)
    pub fn caller(&self) -> &StackFrame {
        // Non-empty by construction.
        &self.frames[self.frames.len() - 1]
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate frames, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, StackFrame> {
        self.frames.iter()
    }

    /// One `function file:line` string per frame
    pub fn strings(&self) -> Vec<String> {
        self.frames.iter().map(ToString::to_string).collect()
    }

    /// Consume into the underlying frames
    pub fn into_frames(self) -> Vec<StackFrame> {
        self.frames
    }
}

impl fmt::Display for Stacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            writeln!(f, "{}\t{}:{}", frame.function, frame.file_path, frame.line)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Stacktrace {
    type Item = &'a StackFrame;
    type IntoIter = std::slice::Iter<'a, StackFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

fn is_runtime_frame(name: &str) -> bool {
    RUNTIME_SYMBOLS.contains(&name) || RUNTIME_FRAMES.iter().any(|p| name.contains(p))
}
