use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::services::totals::Totals;

/// Job card (service order) for one vehicle visit
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub job_no: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub status: JobStatus,
    #[sea_orm(nullable)]
    pub assigned_mechanic_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mechanic_notes: Option<String>,
    #[sea_orm(column_type = "Decimal(None)")]
    pub services_amount: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub parts_amount: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub tax_amount: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub grand_total: Decimal,
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// Persisted totals as last computed for this job.
    pub fn totals(&self) -> Totals {
        Totals {
            services_amount: self.services_amount,
            parts_amount: self.parts_amount,
            tax_amount: self.tax_amount,
            grand_total: self.grand_total,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::job_card_service::Entity")]
    Services,
    #[sea_orm(has_many = "super::job_card_part::Entity")]
    Parts,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
}

impl Related<super::job_card_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Services.def()
    }
}

impl Related<super::job_card_part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parts.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Job card lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum JobStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "BILLED")]
    Billed,
}
