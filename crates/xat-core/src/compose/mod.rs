//! Composition engine
//!
//! A [`Composer`] holds an ordered list of tasks. Each task is a fragment,
//! a fragment list, or a deferred computation yielding a list (usually a
//! provider that loads plugins). [`Composer::compose`] runs every deferred
//! task concurrently, waits for all of them, and concatenates the results
//! in task order. The first failure aborts the whole call.
//!
//! Renaming and editor-mode suppression are separate passes over the
//! composed [`FragmentSequence`].

mod rename;
mod suppress;

pub use rename::{DEFAULT_PLUGIN_RENAMES, RenameTable, rename_rules, rename_sequence};
pub use suppress::{DEFAULT_EDITOR_SUPPRESSIONS, SuppressionSet, suppress_autofix};

use crate::fragment::{ConfigFragment, FragmentSequence};
use crate::providers::{FragmentProvider, ProviderContext};
use crate::result::Result;
use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use tracing::{debug, trace};

/// One entry of the composition list
pub enum ComposeTask {
    Fragment(ConfigFragment),
    Sequence(Vec<ConfigFragment>),
    Deferred(BoxFuture<'static, Result<Vec<ConfigFragment>>>),
}

impl ComposeTask {
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Vec<ConfigFragment>>> + Send + 'static,
    {
        ComposeTask::Deferred(future.boxed())
    }

    /// Defer `provider` until composition, running it against `ctx`
    pub fn from_provider(provider: Box<dyn FragmentProvider>, ctx: ProviderContext) -> Self {
        Self::deferred(async move {
            let fragments = provider.provide(&ctx).await?;
            trace!(
                "Provider {} yielded {} fragments",
                provider.name(),
                fragments.len()
            );
            Ok(fragments)
        })
    }

    fn into_future(self) -> BoxFuture<'static, Result<Vec<ConfigFragment>>> {
        match self {
            ComposeTask::Fragment(fragment) => future::ok(vec![fragment]).boxed(),
            ComposeTask::Sequence(fragments) => future::ok(fragments).boxed(),
            ComposeTask::Deferred(future) => future,
        }
    }
}

impl fmt::Debug for ComposeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeTask::Fragment(fragment) => f.debug_tuple("Fragment").field(&fragment.name).finish(),
            ComposeTask::Sequence(fragments) => {
                f.debug_tuple("Sequence").field(&fragments.len()).finish()
            }
            ComposeTask::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

impl From<ConfigFragment> for ComposeTask {
    fn from(fragment: ConfigFragment) -> Self {
        ComposeTask::Fragment(fragment)
    }
}

impl From<Vec<ConfigFragment>> for ComposeTask {
    fn from(fragments: Vec<ConfigFragment>) -> Self {
        ComposeTask::Sequence(fragments)
    }
}

impl From<FragmentSequence> for ComposeTask {
    fn from(sequence: FragmentSequence) -> Self {
        ComposeTask::Sequence(sequence.into_vec())
    }
}

/// Ordered collection of composition tasks
#[derive(Debug, Default)]
pub struct Composer {
    tasks: Vec<ComposeTask>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: impl Into<ComposeTask>) -> &mut Self {
        self.tasks.push(task.into());
        self
    }

    pub fn extend<I, T>(&mut self, tasks: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ComposeTask>,
    {
        self.tasks.extend(tasks.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub async fn compose(self) -> Result<FragmentSequence> {
        compose(self.tasks).await
    }
}

/// Resolve `tasks` and concatenate their fragments in task order.
///
/// Output order depends only on task order, never on completion order.
pub async fn compose(tasks: Vec<ComposeTask>) -> Result<FragmentSequence> {
    let task_count = tasks.len();
    let resolved =
        future::try_join_all(tasks.into_iter().map(ComposeTask::into_future)).await?;

    let fragments: Vec<ConfigFragment> = resolved.into_iter().flatten().collect();
    debug!(
        "Composed {} fragments from {} tasks",
        fragments.len(),
        task_count
    );
    Ok(FragmentSequence::new(fragments))
}
