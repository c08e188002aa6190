// src/fetch/pages.rs

/// Decision after observing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Request the next page at this offset.
    Next { offset: u64 },
    /// The collection is complete (or the API says so); stop requesting.
    Finished,
}

/// Offset/total bookkeeping for the paged rank endpoint.
///
/// The driver asks for `offset()`, performs the request, then feeds the page
/// size and the reported total back through `observe`. Termination rules, in
/// the order the upstream applies them:
///
/// 1. an empty page always ends the walk, even when fewer records than the
///    reported total have been seen — the endpoint signals end-of-collection
///    this way and short totals do happen;
/// 2. once the accumulated count reaches the reported total, stop.
///
/// The total is adopted from whichever response first reports a non-zero one.
#[derive(Debug)]
pub struct Paginator {
    limit: u64,
    offset: u64,
    fetched: u64,
    total: u64,
}

impl Paginator {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            offset: 0,
            fetched: 0,
            total: 0,
        }
    }

    /// Offset for the next request.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Records retrieved so far.
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    /// Collection total as last reported by the API (0 until known).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Feed back one page's row count and reported total, get the next step.
    pub fn observe(&mut self, page_len: usize, reported_total: u64) -> Step {
        if self.total == 0 {
            self.total = reported_total;
        }
        if page_len == 0 {
            return Step::Finished;
        }
        self.fetched += page_len as u64;
        if self.fetched >= self.total {
            return Step::Finished;
        }
        self.offset += self.limit;
        Step::Next {
            offset: self.offset,
        }
    }
}
