use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::tick::PriceTick;
use crate::StockWatch;

/// External market-data boundary. Implementations own their transport
/// and pacing; the engine only sees batches of ticks.
#[async_trait]
pub trait TickSource: Send {
    /// Next batch of ticks. An empty batch signals the source is
    /// exhausted (or has nothing for this round).
    async fn next_ticks(&mut self) -> Result<Vec<PriceTick>, CoreError>;
}

/// Drives a [`StockWatch`] from a tick source: pull a batch, evaluate
/// each tick in order, repeat.
pub struct TickFeed<S: TickSource> {
    source: S,
}

impl<S: TickSource> TickFeed<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// One poll round. Returns the number of ticks processed.
    pub async fn pump(&mut self, watch: &mut StockWatch) -> Result<usize, CoreError> {
        let ticks = self.source.next_ticks().await?;
        for tick in &ticks {
            watch.on_tick(tick);
        }
        Ok(ticks.len())
    }

    /// Pump until the source reports an empty batch.
    pub async fn run(&mut self, watch: &mut StockWatch) -> Result<(), CoreError> {
        loop {
            if self.pump(watch).await? == 0 {
                return Ok(());
            }
        }
    }

    /// Give the source back, e.g. to inspect a scripted source after a
    /// run.
    pub fn into_source(self) -> S {
        self.source
    }
}
