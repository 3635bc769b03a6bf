//! Report session: record store, view state and rendering surface together.
//!
//! The two public operations are [`Report::apply_filter`] and
//! [`Report::apply_sort`]. Each one recomputes its result over the full
//! record set and pushes it to the view. Filtering never changes the order
//! and sorting never changes visibility.

use std::fmt;

use tracing::debug;

use crate::filter::compute_visibility;
use crate::model::ContainerRecord;
use crate::sorter::compute_order;
use crate::store::RecordStore;
use crate::types::{SortKey, SortOrder, SortSpec, ViewState};
use crate::view::ReportView;

/// Aggregates over the currently visible containers.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportSummary {
    pub total: usize,
    pub visible: usize,
    /// Sum of item counts of visible containers, saturating at `u64::MAX`.
    /// Unreadable counts are skipped.
    pub visible_items: u64,
    /// Mean utilization of visible containers with a readable value.
    pub mean_utilization: Option<f64>,
}

impl ReportSummary {
    fn from_records(records: &[ContainerRecord]) -> Self {
        let visible: Vec<&ContainerRecord> = records.iter().filter(|r| r.is_visible()).collect();
        let utilizations: Vec<f64> = visible
            .iter()
            .filter_map(|r| r.volume_utilization())
            .collect();
        let mean_utilization = if utilizations.is_empty() {
            None
        } else {
            Some(utilizations.iter().sum::<f64>() / utilizations.len() as f64)
        };

        Self {
            total: records.len(),
            visible: visible.len(),
            visible_items: visible
                .iter()
                .filter_map(|r| r.item_count())
                .fold(0u64, u64::saturating_add),
            mean_utilization,
        }
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} totes shown, {} items",
            self.visible, self.total, self.visible_items
        )?;
        match self.mean_utilization {
            Some(mean) => write!(f, ", mean utilization {:.2}%", mean),
            None => write!(f, ", mean utilization n/a"),
        }
    }
}

/// An interactive report over a fixed set of containers.
#[derive(Debug)]
pub struct Report<V: ReportView> {
    store: RecordStore,
    state: ViewState,
    view: V,
}

impl<V: ReportView> Report<V> {
    /// Creates a session and renders every record once in store order.
    pub fn new(store: RecordStore, mut view: V) -> Self {
        for record in store.all() {
            view.append(record.id());
            view.set_visible(record.id(), record.is_visible());
        }
        Self {
            store,
            state: ViewState::default(),
            view,
        }
    }

    /// Recomputes visibility of every record from the search term.
    pub fn apply_filter(&mut self, text: &str) {
        self.state.filter = text.to_owned();
        let flags = compute_visibility(&self.state, self.store.all());
        self.store.set_visibility(&flags);
        for record in self.store.all() {
            self.view.set_visible(record.id(), record.is_visible());
        }
        debug!(
            filter = %self.state.filter,
            visible = self.store.visible_count(),
            total = self.store.len(),
            "filter applied"
        );
    }

    /// Reorders every record and re-renders the list in the new order.
    pub fn apply_sort(&mut self, key: SortKey, order: SortOrder) {
        let spec = SortSpec::new(key, order);
        self.state.sort = Some(spec);
        let new_order = compute_order(spec, self.store.all());
        self.store.reorder(&new_order);
        for id in &new_order {
            self.view.append(id);
        }
        debug!(%key, %order, "sort applied");
    }

    /// Sorts by a key given by name. Unknown names leave the order unchanged.
    pub fn apply_sort_named(&mut self, key: &str, order: SortOrder) {
        match key.parse::<SortKey>() {
            Ok(key) => self.apply_sort(key, order),
            Err(err) => debug!("{err}; order unchanged"),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Records in current display order.
    pub fn records(&self) -> &[ContainerRecord] {
        self.store.all()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_records(self.store.all())
    }
}
