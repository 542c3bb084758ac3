use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Part fitted to the vehicle on a job card
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_card_parts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub job_card_id: i64,
    pub description: String,
    #[sea_orm(nullable)]
    pub part_number: Option<String>,
    #[sea_orm(column_type = "Decimal(None)")]
    pub unit_price: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub line_total: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job_card::Entity",
        from = "Column::JobCardId",
        to = "super::job_card::Column::Id",
        on_delete = "Cascade"
    )]
    JobCard,
}

impl Related<super::job_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobCard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
