//! Settings store access for the keys this service consumes.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use super::totals::{check_tax_rate, parse_tax_rate};
use crate::{
    entities::{setting, Setting},
    errors::ServiceError,
};

pub const TAX_RATE_KEY: &str = "tax_rate";

pub async fn get_setting<C: ConnectionTrait>(
    conn: &C,
    key: &str,
) -> Result<Option<String>, ServiceError> {
    Ok(Setting::find_by_id(key.to_string())
        .one(conn)
        .await?
        .map(|setting| setting.value))
}

/// Inserts or overwrites a setting.
pub async fn put_setting<C: ConnectionTrait>(
    conn: &C,
    key: &str,
    value: String,
) -> Result<(), ServiceError> {
    let now = Utc::now();
    match Setting::find_by_id(key.to_string()).one(conn).await? {
        Some(existing) => {
            let mut active: setting::ActiveModel = existing.into();
            active.value = Set(value);
            active.updated_at = Set(now);
            active.update(conn).await?;
        }
        None => {
            setting::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value),
                updated_at: Set(now),
            }
            .insert(conn)
            .await?;
        }
    }
    Ok(())
}

/// Current tax rate percent, defaulting when unset or unreadable.
pub async fn get_tax_rate<C: ConnectionTrait>(conn: &C) -> Result<Decimal, ServiceError> {
    let raw = get_setting(conn, TAX_RATE_KEY).await?;
    Ok(parse_tax_rate(raw.as_deref()))
}

pub async fn set_tax_rate<C: ConnectionTrait>(
    conn: &C,
    rate_percent: Decimal,
) -> Result<(), ServiceError> {
    check_tax_rate(rate_percent)?;
    put_setting(conn, TAX_RATE_KEY, rate_percent.normalize().to_string()).await
}
