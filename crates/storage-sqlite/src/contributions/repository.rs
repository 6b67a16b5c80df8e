use courtfund_core::contributions::{
    CompletionUpdate, Contribution, ContributionRepositoryTrait, ContributionStatus,
    NewContribution,
};
use courtfund_core::Result;

use super::model::{ContributionDB, NewContributionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{campaigns, contribution_tiers, contributions};
use crate::utils::parse_decimal;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use std::sync::Arc;
use uuid::Uuid;

pub struct ContributionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

#[derive(AsChangeset)]
#[diesel(table_name = contributions)]
struct CompletionChangesDB {
    status: String,
    completed_at: NaiveDateTime,
    stripe_payment_intent_id: Option<String>,
    stripe_charge_id: Option<String>,
    payment_method: Option<String>,
}

impl ContributionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ContributionRepository { pool, writer }
    }

    fn load(conn: &mut SqliteConnection, contribution_id: &str) -> Result<ContributionDB> {
        contributions::table
            .find(contribution_id)
            .first::<ContributionDB>(conn)
            .into_core()
    }

    /// Moves the campaign running total by `delta` and the tier backer count
    /// by `backer_delta`, inside the caller's transaction.
    fn adjust_counters(
        conn: &mut SqliteConnection,
        row: &ContributionDB,
        delta: Decimal,
        backer_delta: i32,
    ) -> Result<()> {
        let current: String = campaigns::table
            .find(&row.campaign_id)
            .select(campaigns::current_amount)
            .first(conn)
            .into_core()?;
        let updated = parse_decimal(&current, "campaigns.current_amount") + delta;
        diesel::update(campaigns::table.find(&row.campaign_id))
            .set(campaigns::current_amount.eq(updated.to_string()))
            .execute(conn)
            .into_core()?;

        if let Some(tier_id) = row.tier_id.as_deref() {
            let count: i32 = contribution_tiers::table
                .find(tier_id)
                .select(contribution_tiers::current_backers)
                .first(conn)
                .into_core()?;
            diesel::update(contribution_tiers::table.find(tier_id))
                .set(contribution_tiers::current_backers.eq((count + backer_delta).max(0)))
                .execute(conn)
                .into_core()?;
        }
        Ok(())
    }
}

#[async_trait]
impl ContributionRepositoryTrait for ContributionRepository {
    fn get_by_id(&self, contribution_id: &str) -> Result<Contribution> {
        let mut conn = get_connection(&self.pool)?;
        let row = contributions::table
            .find(contribution_id)
            .first::<ContributionDB>(&mut conn)
            .into_core()?;
        Ok(Contribution::from(row))
    }

    fn find_by_checkout_session(&self, session_id: &str) -> Result<Option<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let row = contributions::table
            .filter(contributions::stripe_checkout_session_id.eq(session_id))
            .first::<ContributionDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Contribution::from))
    }

    fn find_by_payment_intent(&self, payment_intent_id: &str) -> Result<Option<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let row = contributions::table
            .filter(contributions::stripe_payment_intent_id.eq(payment_intent_id))
            .first::<ContributionDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Contribution::from))
    }

    fn find_by_charge(&self, charge_id: &str) -> Result<Option<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let row = contributions::table
            .filter(contributions::stripe_charge_id.eq(charge_id))
            .first::<ContributionDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Contribution::from))
    }

    fn list_by_status(&self, status: ContributionStatus) -> Result<Vec<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contributions::table
            .filter(contributions::status.eq(status.as_str()))
            .order(contributions::created_at.asc())
            .load::<ContributionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Contribution::from).collect())
    }

    fn list_public_completed(&self, campaign_id: Option<&str>) -> Result<Vec<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = contributions::table
            .filter(contributions::status.eq(ContributionStatus::Completed.as_str()))
            .filter(contributions::is_public.eq(true))
            .into_boxed();
        if let Some(campaign_id) = campaign_id {
            query = query.filter(contributions::campaign_id.eq(campaign_id.to_string()));
        }
        let rows = query
            .order(contributions::completed_at.desc())
            .load::<ContributionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Contribution::from).collect())
    }

    fn sum_completed_public_by_backer(&self, backer_id: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let amounts: Vec<String> = contributions::table
            .filter(contributions::backer_id.eq(backer_id))
            .filter(contributions::status.eq(ContributionStatus::Completed.as_str()))
            .filter(contributions::is_public.eq(true))
            .select(contributions::amount)
            .load(&mut conn)
            .into_core()?;
        Ok(amounts
            .iter()
            .map(|a| parse_decimal(a, "contributions.amount"))
            .sum())
    }

    async fn insert(&self, new_contribution: NewContribution) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                let new_db =
                    NewContributionDB::from_domain(new_contribution, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(contributions::table)
                    .values(&new_db)
                    .returning(ContributionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Contribution::from(result_db))
            })
            .await
    }

    async fn mark_completed(
        &self,
        contribution_id: String,
        update: CompletionUpdate,
    ) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                let before = Self::load(conn, &contribution_id)?;

                diesel::update(contributions::table.find(&contribution_id))
                    .set(CompletionChangesDB {
                        status: ContributionStatus::Completed.as_str().to_string(),
                        completed_at: Utc::now().naive_utc(),
                        stripe_payment_intent_id: update.payment_intent_id,
                        stripe_charge_id: update.charge_id,
                        payment_method: update.payment_method,
                    })
                    .execute(conn)
                    .into_core()?;

                // First arrival in completed: fold the amount into the
                // campaign total and claim the tier spot.
                if before.status != ContributionStatus::Completed.as_str() {
                    let amount = parse_decimal(&before.amount, "contributions.amount");
                    Self::adjust_counters(conn, &before, amount, 1)?;
                }

                Ok(Contribution::from(Self::load(conn, &contribution_id)?))
            })
            .await
    }

    async fn mark_failed(&self, contribution_id: String) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                diesel::update(contributions::table.find(&contribution_id))
                    .set(contributions::status.eq(ContributionStatus::Failed.as_str()))
                    .execute(conn)
                    .into_core()?;
                Ok(Contribution::from(Self::load(conn, &contribution_id)?))
            })
            .await
    }

    async fn mark_refunded(&self, contribution_id: String) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                let before = Self::load(conn, &contribution_id)?;

                diesel::update(contributions::table.find(&contribution_id))
                    .set((
                        contributions::status.eq(ContributionStatus::Refunded.as_str()),
                        contributions::refunded_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                if before.status == ContributionStatus::Completed.as_str() {
                    let amount = parse_decimal(&before.amount, "contributions.amount");
                    Self::adjust_counters(conn, &before, -amount, -1)?;
                }

                Ok(Contribution::from(Self::load(conn, &contribution_id)?))
            })
            .await
    }

    async fn record_charge(
        &self,
        contribution_id: String,
        charge_id: String,
    ) -> Result<Contribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                diesel::update(contributions::table.find(&contribution_id))
                    .set(contributions::stripe_charge_id.eq(charge_id))
                    .execute(conn)
                    .into_core()?;
                Ok(Contribution::from(Self::load(conn, &contribution_id)?))
            })
            .await
    }
}
