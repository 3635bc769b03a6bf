//! Interactive filtering and sorting of packed-tote report summaries.
//!
//! A packing simulation produces one summary per tote. This crate loads those
//! summaries once into a [`store::RecordStore`] and lets a viewer narrow them
//! down by SKU and reorder them through a [`report::Report`] session.
//!
//! ```
//! use tote_report::report::Report;
//! use tote_report::store::RecordStore;
//! use tote_report::types::{SortKey, SortOrder};
//! use tote_report::view::NullView;
//!
//! let store = RecordStore::from_json_str(
//!     r#"[{"id": "A_10", "item_count": 8, "skus": "X"},
//!         {"id": "A_2", "item_count": 2, "skus": "Z"}]"#,
//! )
//! .unwrap();
//! let mut report = Report::new(store, NullView);
//!
//! report.apply_filter("x");
//! report.apply_sort(SortKey::Id, SortOrder::Ascending);
//!
//! let ids: Vec<&str> = report.records().iter().map(|r| r.id()).collect();
//! assert_eq!(ids, ["A_2", "A_10"]);
//! assert_eq!(report.store().visible_count(), 1);
//! ```

pub mod config;
pub mod filter;
pub mod model;
pub mod report;
pub mod session;
pub mod sorter;
pub mod store;
pub mod types;
pub mod view;
