//! Fan-out topology, fixed before the first record flows.

use std::collections::HashSet;

use multilog_core::errors::StreamError;
use multilog_core::{MultilogResult, RecordConsumer};

use super::consumer::FanoutConsumer;
use super::output::{FanoutOutput, RoutedOutput};

/// Collects outputs in configuration order; [`FanoutBuilder::build`]
/// freezes them into a [`FanoutConsumer`].
///
/// # Examples
///
/// ```
/// use multilog_pipeline::FanoutConsumer;
/// use test_fixtures::{CounterOp, RecordingConsumer};
///
/// let fanout = FanoutConsumer::<u32, CounterOp>::builder()
///     .output_all("all", RecordingConsumer::new("all"))
///     .output("even", |r: &u32| (r % 2 == 0).then_some(*r), RecordingConsumer::new("even"))
///     .build()
///     .unwrap();
/// assert_eq!(fanout.output_names().collect::<Vec<_>>(), ["all", "even"]);
/// ```
pub struct FanoutBuilder<T, D> {
    outputs: Vec<Box<dyn FanoutOutput<T, D>>>,
}

impl<T, D> FanoutBuilder<T, D>
where
    T: Send + Sync + 'static,
    D: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }

    /// Add an output fed with whatever `route` maps each input record to:
    /// nothing, one record, or several.
    pub fn output<U, I, F, C>(mut self, name: impl Into<String>, route: F, consumer: C) -> Self
    where
        F: Fn(&T) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = U>,
        U: Send + 'static,
        C: RecordConsumer<U, Diff = D> + 'static,
    {
        self.outputs
            .push(Box::new(RoutedOutput::new(name.into(), route, consumer)));
        self
    }

    /// Add an output receiving a copy of every input record.
    pub fn output_all<C>(self, name: impl Into<String>, consumer: C) -> Self
    where
        T: Clone,
        C: RecordConsumer<T, Diff = D> + 'static,
    {
        self.output(name, |record: &T| std::iter::once(record.clone()), consumer)
    }

    pub fn build(self) -> MultilogResult<FanoutConsumer<T, D>> {
        if self.outputs.is_empty() {
            return Err(StreamError::Topology("fan-out needs at least one output".to_string()).into());
        }
        let mut seen = HashSet::new();
        for output in &self.outputs {
            if !seen.insert(output.name()) {
                return Err(StreamError::Topology(format!(
                    "duplicate output name `{}`",
                    output.name()
                ))
                .into());
            }
        }
        Ok(FanoutConsumer::new(self.outputs))
    }
}

impl<T, D> Default for FanoutBuilder<T, D>
where
    T: Send + Sync + 'static,
    D: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
