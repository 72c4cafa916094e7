//! Binds user actions to the item store, the gateway and a front-end view.
//!
//! Every action runs to completion before the next one starts: methods take
//! `&mut self`, and network-bound actions disable their trigger on the view
//! for the duration of the request.

use serde_json::Value;
use shared::{
    domain::{display_value, IndexRange, SampleIndex},
    protocol::{ItemsQuery, LabelPayload, ProgressResponse},
};
use tracing::{debug, info, warn};

use crate::{
    field_groups::FieldGroupRegistry, gateway::LabelingApi, item_store::ItemStore,
    render::Screen,
};

pub const EMPTY_LABELS_PROMPT: &str = "No labels selected. Save empty labels?";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load range";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoadRange,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// Input failed validation before any request was made.
    Invalid,
    /// The annotator declined the confirmation prompt.
    Declined,
    /// Nothing to act on.
    Skipped,
    Failed,
}

/// Accepts the structured groups for the current position.
pub trait ScreenRenderer {
    fn render(&mut self, screen: &Screen);
}

/// Front-end adapter driven by [`ReviewController`].
pub trait ReviewView: ScreenRenderer {
    fn show_progress(&mut self, text: &str);
    fn seed_range(&mut self, start: i64, end: i64);
    fn clear_labels(&mut self);
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, prompt: &str) -> bool;
    fn set_action_enabled(&mut self, action: Action, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    pub start: i64,
    pub end: i64,
    pub skip_labeled: bool,
    pub show_labeled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelInputs {
    pub critical_success_label: String,
    pub popular_success_label: String,
    pub commercial_success_label: String,
    pub annotator: String,
}

impl LabelInputs {
    fn payload_for(&self, sample_index: SampleIndex) -> LabelPayload {
        LabelPayload {
            sample_index,
            critical_success_label: self.critical_success_label.clone(),
            popular_success_label: self.popular_success_label.clone(),
            commercial_success_label: self.commercial_success_label.clone(),
            annotator: self.annotator.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub store: ItemStore,
    pub range_start: i64,
    pub range_end: i64,
}

pub struct ReviewController<A, V> {
    api: A,
    view: V,
    registry: FieldGroupRegistry,
    state: AppState,
}

impl<A: LabelingApi, V: ReviewView> ReviewController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self::with_registry(api, view, FieldGroupRegistry::standard())
    }

    pub fn with_registry(api: A, view: V, registry: FieldGroupRegistry) -> Self {
        Self {
            api,
            view,
            registry,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Seeds the range bounds from dataset-wide progress.
    pub async fn initial_load(&mut self) -> ActionOutcome {
        let progress = match self.api.dataset_progress().await {
            Ok(progress) => progress,
            Err(err) => {
                warn!(error = %err, "dataset progress unavailable");
                return ActionOutcome::Failed;
            }
        };

        let total = display_value(&progress.dataset_total());
        self.state.range_start = 0;
        self.state.range_end = progress.dataset_last_index();
        self.view.seed_range(self.state.range_start, self.state.range_end);
        self.view.show_progress(&format!("Labeled 0 / {total} (dataset)"));
        info!(%total, "dataset progress loaded");
        ActionOutcome::Completed
    }

    pub async fn load_range(&mut self, request: RangeRequest) -> ActionOutcome {
        self.view.set_action_enabled(Action::LoadRange, false);
        let outcome = self.load_range_inner(request).await;
        self.view.set_action_enabled(Action::LoadRange, true);
        outcome
    }

    async fn load_range_inner(&mut self, request: RangeRequest) -> ActionOutcome {
        let range = match IndexRange::new(request.start, request.end) {
            Ok(range) => range,
            Err(err) => {
                debug!(start = request.start, end = request.end, "rejected range");
                self.view.alert(&err.to_string());
                return ActionOutcome::Invalid;
            }
        };

        let query = ItemsQuery::new(range, request.skip_labeled, request.show_labeled);
        let items = match self.api.items(query).await {
            Ok(items) => items,
            Err(err) => {
                warn!(start = range.start(), end = range.end(), error = %err, "range load failed");
                self.view.alert(LOAD_FAILED_MESSAGE);
                return ActionOutcome::Failed;
            }
        };

        info!(
            start = range.start(),
            end = range.end(),
            count = items.len(),
            "range loaded"
        );
        self.state.range_start = range.start();
        self.state.range_end = range.end();
        self.state.store.replace(items);
        self.refresh_range_progress().await;
        self.render_current();
        ActionOutcome::Completed
    }

    pub fn previous(&mut self) {
        self.state.store.advance(-1);
        self.render_current();
    }

    pub fn next(&mut self) {
        self.state.store.advance(1);
        self.render_current();
    }

    pub async fn save(&mut self, inputs: &LabelInputs) -> ActionOutcome {
        self.view.set_action_enabled(Action::Save, false);
        let outcome = self.save_inner(inputs).await;
        self.view.set_action_enabled(Action::Save, true);
        outcome
    }

    async fn save_inner(&mut self, inputs: &LabelInputs) -> ActionOutcome {
        let Some(item) = self.state.store.current() else {
            return ActionOutcome::Skipped;
        };
        let payload = inputs.payload_for(item.sample_index);

        if payload.labels_blank() && !self.view.confirm(EMPTY_LABELS_PROMPT) {
            return ActionOutcome::Declined;
        }

        if let Err(err) = self.api.submit_label(&payload).await {
            warn!(sample_index = payload.sample_index.0, error = %err, "label rejected");
            self.view.alert(&format!("Save failed: {}", err.user_message()));
            return ActionOutcome::Failed;
        }

        info!(sample_index = payload.sample_index.0, "label saved");
        self.state.store.remove_current();
        self.refresh_range_progress().await;
        self.render_current();
        ActionOutcome::Completed
    }

    /// Redraws from scratch. Label inputs reset only when an item is shown.
    pub fn render_current(&mut self) {
        let screen = Screen::for_item(&self.registry, self.state.store.current());
        self.view.render(&screen);
        if matches!(screen, Screen::Item { .. }) {
            self.view.clear_labels();
        }
    }

    async fn refresh_range_progress(&mut self) {
        let Ok(range) = IndexRange::new(self.state.range_start, self.state.range_end) else {
            return;
        };
        match self.api.range_progress(range).await {
            Ok(progress) => self.view.show_progress(&range_progress_text(&progress)),
            Err(err) => warn!(error = %err, "range progress unavailable"),
        }
    }
}

pub fn range_progress_text(progress: &ProgressResponse) -> String {
    let show = |value: Option<&Value>| value.map_or_else(|| "?".to_string(), display_value);
    format!(
        "Labeled {} / {} (range)",
        show(progress.labeled_in_range.as_ref()),
        show(progress.range_total.as_ref())
    )
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
