//! Job card lifecycle and totals engine.
//!
//! Leaf components first: [`totals`] is pure arithmetic, [`job_status`] the
//! state machine and lock policy, [`ledger`] and [`settings`] the storage
//! facing pieces, [`assignment`] mechanic binding. [`job_cards`] ties them
//! together under per-job locks from [`job_locks`].

pub mod assignment;
pub mod job_cards;
pub mod job_locks;
pub mod job_status;
pub mod ledger;
pub mod settings;
pub mod totals;

pub use job_cards::{
    CreateJobInput, JobCardDetails, JobCardPage, JobCardQuery, JobCardService, TaxRateUpdate,
};
pub use ledger::{LineItem, LineItemChange, LineItemKind, NewLineItem};
pub use totals::Totals;
