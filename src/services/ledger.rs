//! Line-item ledger: the billed services and parts attached to a job card.
//!
//! Every mutating function takes the job's [`LockPolicy`] and refuses to
//! touch a locked ledger. None of them recompute totals; that is the
//! orchestrator's job and happens in the same transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{
    job_status::{JobField, LockPolicy},
    totals::PricedItem,
};
use crate::{
    entities::{job_card_part, job_card_service, JobCardPart, JobCardService},
    errors::ServiceError,
};

/// Upper bound for a single unit price.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000);

/// Upper bound for a single line quantity.
pub const MAX_QUANTITY: Decimal = dec!(1000000);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LineItemKind {
    Service,
    Part,
}

/// A line item to be added to a job card.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewLineItem {
    pub kind: LineItemKind,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub part_number: Option<String>,
    pub unit_price: Decimal,
    pub quantity: Decimal,
}

impl NewLineItem {
    pub fn priced(&self) -> PricedItem {
        PricedItem {
            kind: self.kind,
            unit_price: self.unit_price,
            quantity: self.quantity,
        }
    }

    pub fn service(description: impl Into<String>, unit_price: Decimal, quantity: Decimal) -> Self {
        Self {
            kind: LineItemKind::Service,
            description: description.into(),
            part_number: None,
            unit_price,
            quantity,
        }
    }

    pub fn part(description: impl Into<String>, unit_price: Decimal, quantity: Decimal) -> Self {
        Self {
            kind: LineItemKind::Part,
            description: description.into(),
            part_number: None,
            unit_price,
            quantity,
        }
    }

    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }

    /// Field validation plus the non-negative price and quantity rule.
    pub fn check(&self) -> Result<(), ServiceError> {
        self.validate()?;
        if self.unit_price.is_sign_negative() {
            return Err(ServiceError::ValidationError(format!(
                "unit price must not be negative (got {})",
                self.unit_price
            )));
        }
        if self.quantity.is_sign_negative() {
            return Err(ServiceError::ValidationError(format!(
                "quantity must not be negative (got {})",
                self.quantity
            )));
        }
        if self.unit_price > MAX_UNIT_PRICE {
            return Err(ServiceError::ValidationError(format!(
                "unit price must be at most {} (got {})",
                MAX_UNIT_PRICE, self.unit_price
            )));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(ServiceError::ValidationError(format!(
                "quantity must be at most {} (got {})",
                MAX_QUANTITY, self.quantity
            )));
        }
        if self.kind == LineItemKind::Service && self.part_number.is_some() {
            return Err(ServiceError::ValidationError(
                "part number is only allowed on parts".to_string(),
            ));
        }
        Ok(())
    }
}

/// One ledger mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LineItemChange {
    Add(NewLineItem),
    Remove { kind: LineItemKind, id: i64 },
}

impl LineItemChange {
    pub fn check(&self) -> Result<(), ServiceError> {
        match self {
            LineItemChange::Add(item) => item.check(),
            LineItemChange::Remove { .. } => Ok(()),
        }
    }
}

/// A stored service or part, flattened into one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,
    pub job_card_id: i64,
    pub kind: LineItemKind,
    pub description: String,
    pub part_number: Option<String>,
    pub unit_price: Decimal,
    pub quantity: Decimal,
    pub line_total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl LineItem {
    pub fn priced(&self) -> PricedItem {
        PricedItem {
            kind: self.kind,
            unit_price: self.unit_price,
            quantity: self.quantity,
        }
    }
}

impl From<job_card_service::Model> for LineItem {
    fn from(model: job_card_service::Model) -> Self {
        Self {
            id: model.id,
            job_card_id: model.job_card_id,
            kind: LineItemKind::Service,
            description: model.description,
            part_number: None,
            unit_price: model.unit_price,
            quantity: model.quantity,
            line_total: model.line_total,
            created_at: model.created_at,
        }
    }
}

impl From<job_card_part::Model> for LineItem {
    fn from(model: job_card_part::Model) -> Self {
        Self {
            id: model.id,
            job_card_id: model.job_card_id,
            kind: LineItemKind::Part,
            description: model.description,
            part_number: model.part_number,
            unit_price: model.unit_price,
            quantity: model.quantity,
            line_total: model.line_total,
            created_at: model.created_at,
        }
    }
}

pub async fn add_line_item<C: ConnectionTrait>(
    conn: &C,
    policy: &LockPolicy,
    job_id: i64,
    item: &NewLineItem,
) -> Result<LineItem, ServiceError> {
    policy.ensure_editable(JobField::LineItems)?;
    item.check()?;

    let line_total = item.priced().line_total()?;
    let now = Utc::now();

    let stored: LineItem = match item.kind {
        LineItemKind::Service => job_card_service::ActiveModel {
            job_card_id: Set(job_id),
            description: Set(item.description.clone()),
            unit_price: Set(item.unit_price),
            quantity: Set(item.quantity),
            line_total: Set(line_total),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?
        .into(),
        LineItemKind::Part => job_card_part::ActiveModel {
            job_card_id: Set(job_id),
            description: Set(item.description.clone()),
            part_number: Set(item.part_number.clone()),
            unit_price: Set(item.unit_price),
            quantity: Set(item.quantity),
            line_total: Set(line_total),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?
        .into(),
    };

    Ok(stored)
}

pub async fn remove_line_item<C: ConnectionTrait>(
    conn: &C,
    policy: &LockPolicy,
    job_id: i64,
    kind: LineItemKind,
    item_id: i64,
) -> Result<(), ServiceError> {
    policy.ensure_editable(JobField::LineItems)?;

    let missing =
        || ServiceError::NotFound(format!("{} {} not found on job card {}", kind, item_id, job_id));

    match kind {
        LineItemKind::Service => {
            let item = JobCardService::find_by_id(item_id)
                .filter(job_card_service::Column::JobCardId.eq(job_id))
                .one(conn)
                .await?
                .ok_or_else(missing)?;
            item.delete(conn).await?;
        }
        LineItemKind::Part => {
            let item = JobCardPart::find_by_id(item_id)
                .filter(job_card_part::Column::JobCardId.eq(job_id))
                .one(conn)
                .await?
                .ok_or_else(missing)?;
            item.delete(conn).await?;
        }
    }

    Ok(())
}

/// Applies one change and returns the added item, if any.
pub async fn apply_change<C: ConnectionTrait>(
    conn: &C,
    policy: &LockPolicy,
    job_id: i64,
    change: &LineItemChange,
) -> Result<Option<LineItem>, ServiceError> {
    match change {
        LineItemChange::Add(item) => add_line_item(conn, policy, job_id, item).await.map(Some),
        LineItemChange::Remove { kind, id } => {
            remove_line_item(conn, policy, job_id, *kind, *id).await?;
            Ok(None)
        }
    }
}

/// Services first, then parts, each in insertion order.
pub async fn list_line_items<C: ConnectionTrait>(
    conn: &C,
    job_id: i64,
) -> Result<Vec<LineItem>, ServiceError> {
    let services = JobCardService::find()
        .filter(job_card_service::Column::JobCardId.eq(job_id))
        .order_by_asc(job_card_service::Column::Id)
        .all(conn)
        .await?;
    let parts = JobCardPart::find()
        .filter(job_card_part::Column::JobCardId.eq(job_id))
        .order_by_asc(job_card_part::Column::Id)
        .all(conn)
        .await?;

    Ok(services
        .into_iter()
        .map(LineItem::from)
        .chain(parts.into_iter().map(LineItem::from))
        .collect())
}
