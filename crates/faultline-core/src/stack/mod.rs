//! Stack capture
//!
//! Captures an ordered, oldest-first snapshot of the calling thread's stack.
//! Capture never fails: a stack that resolves to no meaningful frames is
//! reported as `None`, so callers can tell "not captured" apart from a
//! captured trace.

mod capture;
mod frame;


pub use capture::{MAX_FRAMES, Stacktrace};
pub use frame::StackFrame;
