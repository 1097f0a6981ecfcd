//! Batch processing with conflict-free lanes for async operation replay
//!
//! This module provides the `BatchProcessor` struct, which replays a batch of
//! operations on a `SharedTokenEngine` with as much parallelism as the batch
//! allows while producing exactly the state sequential replay would.
//!
//! # Design
//!
//! A batch is cut into segments at every administration operation; an
//! administration operation runs alone, after everything before it and
//! before everything after it. Within a segment, transfers are grouped into
//! lanes: two transfers share a lane when they share a party (sender or
//! receiver), transitively. Lanes touch disjoint accounts, so they run
//! concurrently, each in its original order.
//!
//! Tax credits to the liquidity manager cross lanes, but they only add to
//! one balance and commute. A segment where any transfer names the
//! liquidity manager as sender or receiver runs as a single lane.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<SharedTokenEngine>  (shared, thread-safe engine)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::SharedTokenEngine;
use crate::types::{Address, LedgerError, OperationRecord, OperationType};

/// Result of processing a single operation
///
/// Contains the original operation record and the result of processing it.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation record that was processed
    pub record: OperationRecord,

    /// The result of processing (success or error)
    pub result: Result<(), LedgerError>,
}

/// Batch processor with lane partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe token engine
    ///
    /// Wrapped in Arc to enable sharing across async tasks.
    engine: Arc<SharedTokenEngine>,
}

/// Disjoint-set forest over transfer parties
#[derive(Default)]
struct PartyUnion {
    index: HashMap<Address, usize>,
    parent: Vec<usize>,
}

impl PartyUnion {
    fn id(&mut self, address: &Address) -> usize {
        if let Some(&id) = self.index.get(address) {
            return id;
        }
        let id = self.parent.len();
        self.parent.push(id);
        self.index.insert(address.clone(), id);
        id
    }

    fn find(&mut self, mut id: usize) -> usize {
        while self.parent[id] != id {
            self.parent[id] = self.parent[self.parent[id]];
            id = self.parent[id];
        }
        id
    }

    fn union(&mut self, a: usize, b: usize) {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a != root_b {
            self.parent[root_b] = root_a;
        }
    }
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `engine` - Arc-wrapped SharedTokenEngine for operation processing
    pub fn new(engine: Arc<SharedTokenEngine>) -> Self {
        Self { engine }
    }

    /// Partition a segment of transfers into independent lanes
    ///
    /// # Guarantees
    ///
    /// - Each operation appears in exactly one lane
    /// - Operations within a lane keep their original relative order
    /// - No account is a party in two different lanes
    /// - Lanes are ordered by their first operation
    /// - A segment that contains an administration operation, or names the
    ///   liquidity manager as a party, comes back as a single lane
    pub fn partition_into_lanes(&self, segment: Vec<OperationRecord>) -> Vec<Vec<OperationRecord>> {
        if segment.is_empty() {
            return Vec::new();
        }

        let manager = self.engine.liquidity_manager();
        let serial = segment.iter().any(|record| match &record.kind {
            OperationType::Transfer { to, .. } => record.caller == manager || *to == manager,
            _ => true,
        });
        if serial {
            return vec![segment];
        }

        let mut parties = PartyUnion::default();
        for record in &segment {
            if let OperationType::Transfer { to, .. } = &record.kind {
                let from = parties.id(&record.caller);
                let to = parties.id(to);
                parties.union(from, to);
            }
        }

        let mut lane_of_root: HashMap<usize, usize> = HashMap::new();
        let mut lanes: Vec<Vec<OperationRecord>> = Vec::new();
        for record in segment {
            let id = parties.id(&record.caller);
            let root = parties.find(id);
            let lane = *lane_of_root.entry(root).or_insert_with(|| {
                lanes.push(Vec::new());
                lanes.len() - 1
            });
            lanes[lane].push(record);
        }

        lanes
    }

    /// Process the operations of one lane sequentially
    ///
    /// All operations are processed even if some fail; results keep the
    /// input order.
    pub async fn process_lane(&self, lane: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(lane.len());

        for record in lane {
            let result = self.engine.process(&record);
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a segment of transfers, one tokio task per lane
    async fn process_segment(&self, segment: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let lanes = self.partition_into_lanes(segment);

        let mut tasks = Vec::with_capacity(lanes.len());
        for lane in lanes {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move { processor.process_lane(lane).await }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(lane_results) => results.extend(lane_results),
                Err(e) => tracing::error!(error = ?e, "lane task panicked"),
            }
        }

        results
    }

    /// Process a batch of operations
    ///
    /// Administration operations act as barriers; the transfers between
    /// two barriers run lane-parallel.
    ///
    /// # Returns
    ///
    /// A vector of `ProcessingResult`, one per operation. Results are
    /// grouped by lane within each segment, so they may not be in input
    /// order.
    pub async fn process_batch(&self, batch: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(batch.len());
        let mut segment = Vec::new();

        for record in batch {
            if record.kind.is_admin() {
                results.extend(self.process_segment(std::mem::take(&mut segment)).await);
                let result = self.engine.process(&record);
                results.push(ProcessingResult { record, result });
            } else {
                segment.push(record);
            }
        }
        results.extend(self.process_segment(segment).await);

        results
    }
}
