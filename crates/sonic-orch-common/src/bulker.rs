//! SAI-call bulker: buffers create/set/remove requests and flushes them in
//! one batch at the end of an event-loop iteration, then hands the caller a
//! per-request status to act on individually.

use std::collections::HashMap;

use sonic_sai::{SaiError, SaiStatus};

/// The kind of SAI call a buffered request represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkOp {
    Create,
    Set,
    Remove,
}

/// The five-way classification of a SAI call outcome used throughout the
/// Orch framework (spec §4.1 / §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// The call succeeded.
    Success,
    /// `create` returned `ITEM_ALREADY_EXISTS` — logged and swallowed.
    AlreadyExists,
    /// `remove` returned `ITEM_NOT_FOUND` — logged and swallowed.
    NotFound,
    /// The call should be retried; the row stays in the batch.
    TransientRetry,
    /// An unexpected status; the process should log, flush, and terminate.
    Fatal,
}

impl StatusClass {
    /// Classifies a SAI status given the operation that produced it.
    pub fn classify(op: BulkOp, status: SaiStatus) -> Self {
        match status {
            SaiStatus::Success => StatusClass::Success,
            SaiStatus::ItemAlreadyExists if op == BulkOp::Create => StatusClass::AlreadyExists,
            SaiStatus::ItemNotFound if op == BulkOp::Remove => StatusClass::NotFound,
            SaiStatus::InsufficientResources | SaiStatus::NoMemory | SaiStatus::NotExecuted => {
                StatusClass::TransientRetry
            }
            _ => StatusClass::Fatal,
        }
    }

    /// Classifies a [`SaiError`] the same way, for callers that work in
    /// `Result` space rather than raw statuses.
    pub fn classify_error(op: BulkOp, error: &SaiError) -> Self {
        if let Some(status) = error.status() {
            return Self::classify(op, status);
        }
        match error {
            SaiError::AlreadyExists { .. } if op == BulkOp::Create => StatusClass::AlreadyExists,
            SaiError::NotFound { .. } if op == BulkOp::Remove => StatusClass::NotFound,
            SaiError::TableFull { .. } | SaiError::ObjectInUse { .. } => StatusClass::Fatal,
            _ if error.is_retryable() => StatusClass::TransientRetry,
            _ => StatusClass::Fatal,
        }
    }

    /// True for `Success`, `AlreadyExists` and `NotFound` — the three
    /// classes the caller treats as "the row is done, move on".
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            StatusClass::Success | StatusClass::AlreadyExists | StatusClass::NotFound
        )
    }
}

/// A single pending SAI call, keyed by `K` (usually the object's identity —
/// a route prefix, a neighbor key, an NHG member key) so the post-flush
/// status can be matched back to the row that requested it.
struct PendingRequest<K, Req> {
    key: K,
    op: BulkOp,
    request: Req,
}

/// Generic buffer of pending create/set/remove requests, flushed together.
///
/// `Req` is whatever the caller's SAI binding needs to perform the call
/// (e.g. a `(RouteEntry, NextHopGroupOid)` pair). The bulker itself does not
/// know how to talk to SAI; `flush` takes a closure that executes the whole
/// batch and returns one [`SaiStatus`] per request, in the same order they
/// were buffered.
pub struct Bulker<K, Req> {
    pending: Vec<PendingRequest<K, Req>>,
}

impl<K, Req> Bulker<K, Req> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Buffers a request. Returns the position it was inserted at, stable
    /// until the next `flush`.
    pub fn push(&mut self, key: K, op: BulkOp, request: Req) -> usize {
        self.pending.push(PendingRequest { key, op, request });
        self.pending.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Removes every pending request and returns it as `(key, op, request)`
    /// triples, in insertion order. Unlike `flush`/`flush_async`, the caller
    /// gets the key back alongside each request — needed when the SAI
    /// binding itself needs the key (e.g. a bulk route call keyed by VRF and
    /// prefix) rather than just the opaque request payload.
    pub fn drain(&mut self) -> Vec<(K, BulkOp, Req)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|p| (p.key, p.op, p.request))
            .collect()
    }

    /// Flushes the batch by calling `executor` once with the buffered
    /// requests (consumed, in insertion order) and expecting back exactly
    /// one [`SaiStatus`] per request in the same order.
    ///
    /// Returns `(key, op, classified status)` triples. The bulker is empty
    /// after this call whether or not the executor succeeds structurally;
    /// a panic inside `executor` leaves the bulker's contents dropped,
    /// matching the "in-flight bulker contents are dropped" shutdown
    /// behavior described in spec §5.
    pub fn flush<F>(&mut self, executor: F) -> Vec<(K, BulkOp, StatusClass)>
    where
        F: FnOnce(Vec<Req>) -> Vec<SaiStatus>,
    {
        let pending = std::mem::take(&mut self.pending);
        let (keys_ops, requests): (Vec<(K, BulkOp)>, Vec<Req>) = pending
            .into_iter()
            .map(|p| ((p.key, p.op), p.request))
            .unzip();

        let statuses = executor(requests);
        debug_assert_eq!(
            statuses.len(),
            keys_ops.len(),
            "bulker executor must return one status per request"
        );

        keys_ops
            .into_iter()
            .zip(statuses)
            .map(|((key, op), status)| (key, op, StatusClass::classify(op, status)))
            .collect()
    }
}

impl<K, Req> Default for Bulker<K, Req> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience grouping of post-flush results by [`StatusClass`], for
/// callers that want to act on each class in bulk (e.g. re-queue every
/// `TransientRetry` row, log every swallowed benign race).
pub fn group_by_class<K: Eq + std::hash::Hash>(
    results: Vec<(K, BulkOp, StatusClass)>,
) -> HashMap<StatusClass, Vec<(K, BulkOp)>> {
    let mut grouped: HashMap<StatusClass, Vec<(K, BulkOp)>> = HashMap::new();
    for (key, op, class) in results {
        grouped.entry(class).or_default().push((key, op));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_benign_races() {
        assert_eq!(
            StatusClass::classify(BulkOp::Create, SaiStatus::ItemAlreadyExists),
            StatusClass::AlreadyExists
        );
        assert_eq!(
            StatusClass::classify(BulkOp::Remove, SaiStatus::ItemNotFound),
            StatusClass::NotFound
        );
        // ItemAlreadyExists on a remove (not create) is not a benign race.
        assert_eq!(
            StatusClass::classify(BulkOp::Remove, SaiStatus::ItemAlreadyExists),
            StatusClass::Fatal
        );
    }

    #[test]
    fn classify_transient_and_fatal() {
        assert_eq!(
            StatusClass::classify(BulkOp::Create, SaiStatus::InsufficientResources),
            StatusClass::TransientRetry
        );
        assert_eq!(
            StatusClass::classify(BulkOp::Create, SaiStatus::InvalidParameter),
            StatusClass::Fatal
        );
    }

    #[test]
    fn flush_matches_statuses_to_keys_in_order() {
        let mut bulker: Bulker<&str, u32> = Bulker::new();
        bulker.push("a", BulkOp::Create, 1);
        bulker.push("b", BulkOp::Create, 2);
        bulker.push("c", BulkOp::Remove, 3);
        assert_eq!(bulker.len(), 3);

        let results = bulker.flush(|reqs| {
            assert_eq!(reqs, vec![1, 2, 3]);
            vec![
                SaiStatus::Success,
                SaiStatus::ItemAlreadyExists,
                SaiStatus::ItemNotFound,
            ]
        });

        assert!(bulker.is_empty());
        assert_eq!(results[0], ("a", BulkOp::Create, StatusClass::Success));
        assert_eq!(results[1], ("b", BulkOp::Create, StatusClass::AlreadyExists));
        assert_eq!(results[2], ("c", BulkOp::Remove, StatusClass::NotFound));
    }

    #[test]
    fn drain_preserves_order_and_empties_the_bulker() {
        let mut bulker: Bulker<&str, u32> = Bulker::new();
        bulker.push("a", BulkOp::Create, 1);
        bulker.push("b", BulkOp::Remove, 2);

        let drained = bulker.drain();
        assert!(bulker.is_empty());
        assert_eq!(drained, vec![("a", BulkOp::Create, 1), ("b", BulkOp::Remove, 2)]);
    }

    #[test]
    fn group_by_class_buckets_results() {
        let results = vec![
            ("a", BulkOp::Create, StatusClass::Success),
            ("b", BulkOp::Create, StatusClass::TransientRetry),
            ("c", BulkOp::Remove, StatusClass::TransientRetry),
        ];
        let grouped = group_by_class(results);
        assert_eq!(grouped[&StatusClass::Success].len(), 1);
        assert_eq!(grouped[&StatusClass::TransientRetry].len(), 2);
    }
}
