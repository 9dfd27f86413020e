//! Type-erased fan-out output: a routing function plus its consumer.

use std::marker::PhantomData;

use async_trait::async_trait;
use multilog_core::{MultilogResult, RecordConsumer};

#[async_trait]
pub(crate) trait FanoutOutput<T, D>: Send {
    fn name(&self) -> &str;

    async fn accept(&mut self, record: &T) -> MultilogResult<()>;

    async fn finish(&mut self) -> MultilogResult<Vec<D>>;
}

pub(crate) struct RoutedOutput<F, C, U> {
    name: String,
    route: F,
    consumer: C,
    _routed: PhantomData<fn() -> U>,
}

impl<F, C, U> RoutedOutput<F, C, U> {
    pub(crate) fn new(name: String, route: F, consumer: C) -> Self {
        Self {
            name,
            route,
            consumer,
            _routed: PhantomData,
        }
    }
}

#[async_trait]
impl<T, D, F, I, C, U> FanoutOutput<T, D> for RoutedOutput<F, C, U>
where
    T: Send + Sync + 'static,
    D: Send + 'static,
    F: Fn(&T) -> I + Send + Sync,
    I: IntoIterator<Item = U>,
    U: Send + 'static,
    C: RecordConsumer<U, Diff = D>,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn accept(&mut self, record: &T) -> MultilogResult<()> {
        let routed: Vec<U> = (self.route)(record).into_iter().collect();
        for item in routed {
            self.consumer.accept(item).await?;
        }
        Ok(())
    }

    async fn finish(&mut self) -> MultilogResult<Vec<D>> {
        self.consumer.finish().await
    }
}
