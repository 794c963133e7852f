//! Generates calendar-shifted duplicates of a transaction.

use chrono::NaiveDate;

use crate::core::context::CommandContext;
use crate::errors::Result;
use crate::ledger::{TimeInterval, Transaction};

/// Produces clone batches and appends them to a store.
pub struct CloneEngine;

impl CloneEngine {
    /// Computes the ordered clone batch without touching any store.
    ///
    /// A zero count yields one clone dated `today`. Otherwise clone `i` for
    /// `i in 1..=count` is dated `i` steps after the source date; the source
    /// date itself is never reproduced. Only the date differs from the source,
    /// so kind, description, value, remark, and tags carry over.
    pub fn plan(
        source: &Transaction,
        step: TimeInterval,
        count: u32,
        today: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        if count == 0 {
            return Ok(vec![source.with_date(today)]);
        }
        (1..=count)
            .map(|steps| {
                step.advance(source.date(), steps)
                    .map(|date| source.with_date(date))
            })
            .collect()
    }

    /// Plans the batch, then appends each clone in step order.
    ///
    /// Every date is computed before the first append, so a failure leaves the
    /// store untouched. Each append is reported to the display hook on its own.
    pub fn clone_into(
        ctx: &mut CommandContext<'_>,
        source: &Transaction,
        step: TimeInterval,
        count: u32,
    ) -> Result<Vec<Transaction>> {
        let batch = Self::plan(source, step, count, ctx.today())?;
        for (step, clone) in batch.iter().enumerate() {
            ctx.store.append(clone.clone());
            ctx.scroll_if_visible(clone);
            tracing::info!(
                step = step + 1,
                total = batch.len(),
                "cloned transaction [{}]",
                clone
            );
        }
        Ok(batch)
    }
}
