//! The running fan-out.

use async_trait::async_trait;
use multilog_core::errors::StreamError;
use multilog_core::{MultilogResult, RecordConsumer};
use tracing::warn;

use super::builder::FanoutBuilder;
use super::output::FanoutOutput;

/// Dispatches each record to every output in configuration order, in a
/// single pass. The first failing output poisons the whole fan-out: the
/// error is returned, later outputs are not fed, and every later call fails
/// with [`StreamError::Aborted`].
pub struct FanoutConsumer<T, D> {
    outputs: Vec<Box<dyn FanoutOutput<T, D>>>,
    poisoned: bool,
}

impl<T, D> FanoutConsumer<T, D>
where
    T: Send + Sync + 'static,
    D: Send + 'static,
{
    pub fn builder() -> FanoutBuilder<T, D> {
        FanoutBuilder::new()
    }

    pub(crate) fn new(outputs: Vec<Box<dyn FanoutOutput<T, D>>>) -> Self {
        Self {
            outputs,
            poisoned: false,
        }
    }

    /// Output names in configuration order.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|output| output.name())
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn check_poisoned(&self) -> MultilogResult<()> {
        if self.poisoned {
            return Err(StreamError::Aborted.into());
        }
        Ok(())
    }
}

#[async_trait]
impl<T, D> RecordConsumer<T> for FanoutConsumer<T, D>
where
    T: Send + Sync + 'static,
    D: Send + 'static,
{
    type Diff = D;

    async fn accept(&mut self, record: T) -> MultilogResult<()> {
        self.check_poisoned()?;
        for output in &mut self.outputs {
            if let Err(e) = output.accept(&record).await {
                warn!(output = output.name(), error = %e, "fan-out output failed");
                self.poisoned = true;
                return Err(e);
            }
        }
        Ok(())
    }

    async fn finish(&mut self) -> MultilogResult<Vec<D>> {
        self.check_poisoned()?;
        let mut diffs = Vec::new();
        for output in &mut self.outputs {
            match output.finish().await {
                Ok(output_diffs) => diffs.extend(output_diffs),
                Err(e) => {
                    warn!(output = output.name(), error = %e, "fan-out output failed to finish");
                    self.poisoned = true;
                    return Err(e);
                }
            }
        }
        Ok(diffs)
    }
}
