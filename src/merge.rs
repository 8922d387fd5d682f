//! Span merger: reconciles candidate batches into the final entity list.

use std::cmp::Reverse;

use log::debug;

use crate::entity::Entity;
use crate::offset::DocView;
use crate::recognizers::{Candidate, Source};

/// Resolves candidate batches into a sorted, non-overlapping entity list.
///
/// Batches must arrive in merge priority order, gazetteer first. The first
/// pass is first-writer-wins across batches: a span is accepted unless it
/// overlaps an already-accepted one, and earlier-priority spans are never
/// evicted here. The second pass re-sorts everything once accepted by
/// `(start, length descending)` and sweeps again, keeping the longer span
/// on overlap and preferring the gazetteer on an exact length tie.
/// Provenance is dropped from the returned entities.
pub(crate) fn resolve(doc: &DocView<'_>, batches: &[Vec<Candidate>]) -> Vec<Entity> {
    let mut accepted: Vec<Candidate> = Vec::new();
    for batch in batches {
        for &cand in batch {
            if cand.start >= cand.end || cand.end > doc.len() {
                debug!("merge: discarding out-of-bounds span {cand:?}");
                continue;
            }
            if let Some(held) = accepted.iter().find(|held| held.overlaps(&cand)) {
                debug!("merge: {cand:?} loses to earlier {held:?}");
                continue;
            }
            accepted.push(cand);
        }
    }

    merge_overlapping(accepted)
        .into_iter()
        .map(|c| Entity::new(doc.slice(c.start, c.end), c.label, c.start))
        .collect()
}

/// Final overlap sweep. Kept spans stay sorted by start and pairwise
/// non-overlapping, so each incoming span can only collide with the last
/// kept one.
fn merge_overlapping(mut spans: Vec<Candidate>) -> Vec<Candidate> {
    spans.sort_by_key(|c| (c.start, Reverse(c.len())));
    let mut kept: Vec<Candidate> = Vec::new();
    for cand in spans {
        match kept.last().copied() {
            Some(last) if last.overlaps(&cand) => {
                let replace = cand.len() > last.len()
                    || (cand.len() == last.len()
                        && cand.source == Source::Gazetteer
                        && last.source != Source::Gazetteer);
                if replace {
                    debug!("merge: {cand:?} evicts {last:?}");
                    kept.pop();
                    kept.push(cand);
                } else {
                    debug!("merge: {cand:?} absorbed by {last:?}");
                }
            }
            _ => kept.push(cand),
        }
    }
    kept
}
