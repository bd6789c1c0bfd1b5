//! Non-fatal diagnostics reported while parsing tags.
//!
//! A malformed tag value never fails classification. Features report the
//! anomaly to a [`DiagnosticSink`] and carry on without the value.

use std::fmt;
use std::sync::Mutex;

/// Kind of source object a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Node,
    Way,
    Relation,
}

impl ObjectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Node => "Node",
            ObjectKind::Way => "Way",
            ObjectKind::Relation => "Relation",
        }
    }
}

/// Reference to the source object being processed.
///
/// # Examples
///
/// ```
/// use geoclass::ObjectRef;
///
/// assert_eq!(ObjectRef::way(42).to_string(), "Way 42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub id: u64,
    pub kind: ObjectKind,
}

impl ObjectRef {
    #[must_use]
    pub const fn new(id: u64, kind: ObjectKind) -> Self {
        Self { id, kind }
    }

    #[must_use]
    pub const fn node(id: u64) -> Self {
        Self::new(id, ObjectKind::Node)
    }

    #[must_use]
    pub const fn way(id: u64) -> Self {
        Self::new(id, ObjectKind::Way)
    }

    #[must_use]
    pub const fn relation(id: u64) -> Self {
        Self::new(id, ObjectKind::Relation)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.id)
    }
}

/// One-way channel for parse anomalies.
///
/// Implementations must not block for long and cannot fail the caller.
pub trait DiagnosticSink {
    fn warn(&self, object: &ObjectRef, message: &str);
}

/// Forwards diagnostics to the process logger at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, object: &ObjectRef, message: &str) {
        geoclass_log::warn!("{object}: {message}");
    }
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _object: &ObjectRef, _message: &str) {}
}

/// A diagnostic kept by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub object: ObjectRef,
    pub message: String,
}

/// Accumulates diagnostics in memory.
///
/// The sink is `Sync`, so one instance can be shared by several workers.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a snapshot of the collected diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Removes and returns all collected diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // a panic while holding the lock leaves a valid Vec behind
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, object: &ObjectRef, message: &str) {
        self.lock().push(Diagnostic {
            object: *object,
            message: message.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_display() {
        assert_eq!(ObjectRef::node(7).to_string(), "Node 7");
        assert_eq!(ObjectRef::relation(1).to_string(), "Relation 1");
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.warn(&ObjectRef::way(3), "bad width");
        sink.warn(&ObjectRef::way(4), "bad layer");

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.diagnostics()[0].message, "bad width");

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[1].object, ObjectRef::way(4));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sinks_are_shareable() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<CollectingSink>();
        assert_sync::<LogSink>();
        assert_sync::<NullSink>();
    }
}
