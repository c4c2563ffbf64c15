//! Relational lead store backed by Postgres.
//!
//! The pool is created lazily so a configured-but-unreachable database shows
//! up as a per-write failure (and a fallback to the next backend) instead of
//! a startup crash. The table is created on first use; the DDL is idempotent.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, warn};

use crate::common::{AuditSubmission, Lead, AUDIT_FORM_SOURCE};
use crate::kernel::BaseLeadStore;

const CREATE_TABLE_SQL: &str = r#"
create table if not exists audit_leads (
    id bigserial primary key,
    name text not null,
    email text not null,
    website text not null,
    business_type text not null,
    current_challenges text,
    time_spent_daily int,
    optin_marketing boolean default false,
    source text,
    inserted_at timestamp with time zone default now()
)
"#;

const INSERT_SQL: &str = r#"
insert into audit_leads
    (name, email, website, business_type, current_challenges, time_spent_daily, optin_marketing, source)
values ($1, $2, $3, $4, $5, $6, $7, $8)
returning id
"#;

const LIST_SQL: &str = r#"
select
    id,
    name,
    email,
    website,
    business_type,
    coalesce(current_challenges, '') as current_challenges,
    coalesce(time_spent_daily, 0) as time_spent_daily,
    coalesce(optin_marketing, false) as optin_marketing,
    inserted_at,
    source
from audit_leads
order by inserted_at desc
limit $1
"#;

const LIST_LIMIT: i64 = 1000;

pub struct PostgresLeadStore {
    pool: PgPool,
    webhook_url: Option<String>,
    http: reqwest::Client,
}

impl PostgresLeadStore {
    pub fn connect(database_url: &str, webhook_url: Option<String>) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)
            .context("Invalid Postgres connection string")?;

        Ok(Self {
            pool,
            webhook_url,
            http: reqwest::Client::new(),
        })
    }

    async fn ensure_table(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .context("Failed to ensure audit_leads table")?;
        Ok(())
    }

    /// One-way chat notification for a fresh lead. Failure is logged and
    /// otherwise ignored.
    async fn notify_webhook(&self, submission: &AuditSubmission) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        let payload = serde_json::json!({
            "text": format!(
                "New audit lead: {} <{}> ({}) - {}",
                submission.name, submission.email, submission.business_type, submission.website
            )
        });

        match self.http.post(url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Lead webhook notification sent");
            }
            Ok(response) => {
                warn!(status = %response.status(), "Lead webhook notification rejected");
            }
            Err(err) => {
                warn!(error = %err, "Lead webhook notification failed");
            }
        }
    }
}

#[async_trait]
impl BaseLeadStore for PostgresLeadStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn save(&self, submission: &AuditSubmission) -> Result<bool> {
        self.ensure_table().await?;

        let row = sqlx::query(INSERT_SQL)
            .bind(&submission.name)
            .bind(&submission.email)
            .bind(&submission.website)
            .bind(&submission.business_type)
            .bind(&submission.current_challenges)
            // time_spent_daily is an int column; fractional hours truncate
            // here and survive only in the airtable/file backends
            .bind(submission.time_spent_daily as i32)
            .bind(submission.opt_in_marketing)
            .bind(AUDIT_FORM_SOURCE)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to insert audit lead")?;

        let accepted = row.is_some();
        if accepted {
            self.notify_webhook(submission).await;
        }
        Ok(accepted)
    }

    async fn list(&self) -> Result<Vec<Lead>> {
        self.ensure_table().await?;

        let rows = sqlx::query(LIST_SQL)
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list audit leads")?;

        rows.into_iter()
            .map(|row| {
                Ok(Lead {
                    id: row.try_get::<i64, _>("id")?.to_string(),
                    name: row.try_get("name")?,
                    email: row.try_get("email")?,
                    website: row.try_get("website")?,
                    business_type: row.try_get("business_type")?,
                    current_challenges: row.try_get("current_challenges")?,
                    time_spent_daily: row.try_get::<i32, _>("time_spent_daily")? as f64,
                    opt_in_marketing: row.try_get("optin_marketing")?,
                    timestamp: row.try_get::<DateTime<Utc>, _>("inserted_at")?,
                    source: row.try_get("source")?,
                })
            })
            .collect()
    }
}
