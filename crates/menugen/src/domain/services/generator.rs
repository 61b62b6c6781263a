use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch, Mutex};

use super::{PageLayout, Renderer};
use crate::domain::models::{
    Cuisine, FetchStrategy, InvocationId, Menu, MenuClient, Outcome, Page, Phase, PlaylistRef,
    DEFAULT_PLACEHOLDER, SELECT_NOTICE,
};
use crate::errors::MenuError;

/// Generic notice for any failed fetch; details go to the log only.
pub const RETRY_NOTICE: &str = "Please try again";

/// Runs the select → validate → fetch → render → reveal cycle against one page.
///
/// Invocations are re-entrant. Each one takes an [`InvocationId`]; only the most recent
/// invocation may write to the page, so a slow response can never overwrite a newer one.
pub struct Generator<P: Page> {
    client: Arc<dyn MenuClient>,
    page: Arc<Mutex<P>>,
    layout: PageLayout<P::Element>,
    strategy: FetchStrategy,
    placeholder: String,
    latest: AtomicU64,
    // Visibility of the result container before the oldest unsettled invocation hid it.
    // Only touched while the page lock is held.
    restore_visibility: StdMutex<Option<bool>>,
    phase: watch::Sender<Phase>,
    transitions: broadcast::Sender<Phase>,
}

impl<P: Page> Generator<P> {
    pub fn new(
        client: Arc<dyn MenuClient>,
        page: Arc<Mutex<P>>,
        layout: PageLayout<P::Element>,
    ) -> Self {
        let (phase, _) = watch::channel(Phase::Idle);
        let (transitions, _) = broadcast::channel(64);
        Self {
            client,
            page,
            layout,
            strategy: FetchStrategy::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            latest: AtomicU64::new(0),
            restore_visibility: StdMutex::new(None),
            phase,
            transitions,
        }
    }

    /// Resolves the page layout and builds a generator bound to it.
    pub async fn attach(
        client: Arc<dyn MenuClient>,
        page: Arc<Mutex<P>>,
    ) -> Result<Self, MenuError> {
        let layout = PageLayout::resolve(&*page.lock().await)?;
        Ok(Generator::new(client, page, layout))
    }

    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn page(&self) -> Arc<Mutex<P>> {
        self.page.clone()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Every phase change in order, unlike [`Generator::subscribe`] which only keeps the latest.
    pub fn transitions(&self) -> broadcast::Receiver<Phase> {
        self.transitions.subscribe()
    }

    /// Allocates the next invocation id, superseding every earlier one.
    pub fn begin(&self) -> InvocationId {
        InvocationId(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, id: InvocationId) -> bool {
        self.latest.load(Ordering::SeqCst) == id.0
    }

    pub async fn generate(&self) -> Outcome {
        let id = self.begin();
        self.run(id).await
    }

    pub async fn run(&self, id: InvocationId) -> Outcome {
        self.set_phase(Phase::Validating);

        let cuisine = {
            let mut page = self.page.lock().await;
            let raw = page.value(&self.layout.selector);
            let cuisine = match Cuisine::parse(&raw, &self.placeholder) {
                Ok(cuisine) => cuisine,
                Err(err) => {
                    tracing::debug!(invocation = %id, error = %err, "selection rejected");
                    if self.is_current(id) {
                        self.restore(&mut *page);
                    }
                    page.alert(SELECT_NOTICE);
                    self.set_phase(Phase::Rejected);
                    self.set_phase(Phase::Idle);
                    return Outcome::Rejected;
                }
            };

            // Only the first of overlapping invocations records what to go back to.
            self.saved_visibility()
                .get_or_insert(page.is_visible(&self.layout.content));
            page.set_visible(&self.layout.content, false);
            cuisine
        };

        self.set_phase(Phase::Fetching);
        tracing::info!(invocation = %id, cuisine = %cuisine, strategy = %self.strategy, "generating menu");
        let fetched = self.fetch(&cuisine).await;

        let mut page = self.page.lock().await;
        if !self.is_current(id) {
            tracing::debug!(invocation = %id, "superseded by a newer invocation");
            return Outcome::Superseded;
        }

        match fetched {
            Err(err) => {
                tracing::error!(invocation = %id, cuisine = %cuisine, error = %err, "Error fetching recipes");
                self.restore(&mut *page);
                page.alert(RETRY_NOTICE);
                self.set_phase(Phase::Failed);
                self.set_phase(Phase::Idle);
                Outcome::Failed(err)
            }
            Ok((menu, playlist)) => {
                self.set_phase(Phase::Rendering);
                let report = Renderer::render_menu(&mut *page, &self.layout, &menu);
                Renderer::render_playlist(&mut *page, &self.layout, &playlist);
                page.set_visible(&self.layout.content, true);
                self.saved_visibility().take();
                self.set_phase(Phase::Idle);

                tracing::info!(
                    invocation = %id,
                    rendered = report.rendered.len(),
                    diagnostics = report.diagnostics.len(),
                    "menu rendered"
                );
                Outcome::Rendered(report)
            }
        }
    }

    /// Abandons every in-flight invocation and puts the result container back the way
    /// it was before they started.
    pub async fn cancel(&self) {
        let mut page = self.page.lock().await;
        self.begin();
        self.restore(&mut *page);
        self.set_phase(Phase::Idle);
    }

    fn restore(&self, page: &mut P) {
        if let Some(visible) = self.saved_visibility().take() {
            page.set_visible(&self.layout.content, visible);
        }
    }

    fn saved_visibility(&self) -> MutexGuard<'_, Option<bool>> {
        self.restore_visibility
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch(&self, cuisine: &Cuisine) -> Result<(Menu, PlaylistRef), MenuError> {
        match self.strategy {
            FetchStrategy::Sequential => {
                let menu = self.client.fetch_recipes(cuisine).await?;
                let playlist = self.client.fetch_playlist(cuisine).await?;
                Ok((menu, playlist))
            }
            FetchStrategy::Concurrent => tokio::try_join!(
                self.client.fetch_recipes(cuisine),
                self.client.fetch_playlist(cuisine)
            ),
        }
    }

    fn set_phase(&self, phase: Phase) {
        self.phase.send_replace(phase);
        // No subscribers is fine.
        let _ = self.transitions.send(phase);
    }
}
