//! Batch orchestration
//!
//! Drives the traversal over enqueued root entities as discrete,
//! single-threaded operations. Each step resolves one root and appends its
//! result to the shared batch context; the finishing step consumes the
//! context exactly once, writes the sitemap if anything resolved, and
//! reports the aggregate outcome. The host may pause between steps; if it
//! drops the runner without finishing, no file is written.

use crate::entity::{EntityId, MediaLocation};
use crate::schema::SchemaAccessor;
use crate::sitemap::SitemapWriter;
use crate::store::EntityStore;
use crate::traverse::MediaResolver;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};

/// One success entry: a root's canonical URL and the media locations
/// collected from its reachable subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub images: Vec<MediaLocation>,
}

/// Accumulating result state for one batch run
///
/// Entries form an insertion-ordered map keyed by root canonical URL; keys
/// are disjoint per root, so no cross-root merging ever happens. The
/// processed set guards against a root being resolved twice in one run.
#[derive(Debug, Default)]
pub struct BatchContext {
    pub entries: Vec<SitemapEntry>,
    pub failures: Vec<String>,
    processed: HashSet<EntityId>,
}

/// Outcome of one batch step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Root resolved to at least one media location and was recorded.
    Recorded { loc: String, images: usize },
    /// Root produced no media (or could not be keyed); recorded as a
    /// failure entry, the batch continues.
    Failed { message: String },
    /// Root was already processed in this run; nothing recorded.
    Skipped { id: EntityId },
}

/// Aggregate outcome of a finished batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// True iff the sitemap file write succeeded.
    pub written: bool,
    /// Number of url entries written.
    pub urls: usize,
    /// Accumulated per-entity failure messages, itemized for the operator.
    pub failures: Vec<String>,
}

impl BatchSummary {
    /// Operator-facing aggregate message.
    pub fn message(&self) -> &'static str {
        if self.written {
            "Process finished successfully."
        } else {
            "Process finished with errors."
        }
    }
}

/// Checkpointed batch runner over root entities
///
/// Operations execute strictly in enqueue order, one at a time.
pub struct BatchRunner<'a> {
    resolver: MediaResolver<'a>,
    store: &'a dyn EntityStore,
    queue: VecDeque<EntityId>,
    context: BatchContext,
}

impl<'a> BatchRunner<'a> {
    pub fn new(schema: &'a dyn SchemaAccessor, store: &'a dyn EntityStore) -> Self {
        Self {
            resolver: MediaResolver::new(schema, store),
            store,
            queue: VecDeque::new(),
            context: BatchContext::default(),
        }
    }

    /// Enqueue one root entity for top-level traversal.
    pub fn enqueue(&mut self, id: EntityId) {
        self.queue.push_back(id);
    }

    /// Number of operations not yet executed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Read access to the accumulated context (for progress reporting).
    pub fn context(&self) -> &BatchContext {
        &self.context
    }

    /// Execute exactly one operation. Returns None once the queue is empty.
    pub fn step(&mut self) -> Option<StepOutcome> {
        let id = self.queue.pop_front()?;

        if !self.context.processed.insert(id.clone()) {
            warn!(id = %id, "Root enqueued twice, skipping");
            return Some(StepOutcome::Skipped { id });
        }

        let entity = match self.store.by_id(&id) {
            Some(entity) => entity,
            None => return Some(self.fail(format!("Root entity {} not found", id))),
        };

        let loc = match entity.canonical_url() {
            Some(url) => url.to_string(),
            None => {
                return Some(self.fail(format!("Entity {} has no canonical URL", id)));
            }
        };

        let images = self.resolver.resolve_media(entity);
        if images.is_empty() {
            return Some(self.fail(format!("No media found for {}", loc)));
        }

        info!(loc = %loc, images = images.len(), "Root resolved");
        let count = images.len();
        self.context.entries.push(SitemapEntry { loc: loc.clone(), images });
        Some(StepOutcome::Recorded { loc, images: count })
    }

    fn fail(&mut self, message: String) -> StepOutcome {
        warn!("{}", message);
        self.context.failures.push(message.clone());
        StepOutcome::Failed { message }
    }

    /// Drive all remaining operations to completion.
    pub fn run(&mut self) {
        while self.step().is_some() {}
    }

    /// Finishing step: consume the context, write the sitemap once if any
    /// root resolved, and report the aggregate outcome.
    ///
    /// The serializer is never invoked with an empty result, and a write
    /// failure surfaces in the summary rather than as a hard error.
    pub fn finish(self, writer: &SitemapWriter) -> BatchSummary {
        let BatchContext {
            entries,
            mut failures,
            ..
        } = self.context;

        let mut written = false;
        if !entries.is_empty() {
            match writer.write(&entries) {
                Ok(ok) => written = ok,
                Err(e) => failures.push(e.to_string()),
            }
        }

        BatchSummary {
            written,
            urls: entries.len(),
            failures,
        }
    }
}
