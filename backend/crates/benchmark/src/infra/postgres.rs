//! PostgreSQL Repository Implementation

use kernel::id::SubmissionId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{BenchmarkResult, SubmissionRecord};
use crate::domain::query::{BenchmarkFilter, ListQuery};
use crate::domain::repository::{BenchmarkPage, BenchmarkRepository, InsertOutcome};
use crate::error::StorageResult;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgBenchmarkRepository {
    pool: PgPool,
}

impl PgBenchmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `%`, `_` and `\` for use inside an ILIKE pattern
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &BenchmarkFilter) {
    builder.push(" WHERE TRUE");

    if let Some(model) = &filter.model {
        builder.push(" AND model_name = ").push_bind(model.clone());
    }
    if let Some(version) = &filter.ollama_version {
        builder.push(" AND ollama_version = ").push_bind(version.clone());
    }
    for (column, needle) in [
        ("os", &filter.os),
        ("cpu_name", &filter.cpu),
        ("gpu_name", &filter.gpu),
    ] {
        if let Some(needle) = needle {
            builder
                .push(format!(" AND {column} ILIKE "))
                .push_bind(like_pattern(needle));
        }
    }
}

impl BenchmarkRepository for PgBenchmarkRepository {
    async fn exists(&self, submission_id: SubmissionId) -> StorageResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM benchmarks WHERE submission_id = $1)",
        )
        .bind(submission_id.into_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert_if_absent(&self, record: &SubmissionRecord) -> StorageResult<InsertOutcome> {
        let result = &record.result;
        let inserted = sqlx::query(
            r#"
            INSERT INTO benchmarks (
                submission_id,
                model_name,
                ollama_version,
                tokens_per_second,
                eval_count,
                duration_secs,
                benchmark_timestamp,
                os,
                cpu_name,
                gpu_name,
                reported_ip,
                client_ip,
                payload,
                received_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12::inet, $13, $14)
            ON CONFLICT (submission_id) DO NOTHING
            "#,
        )
        .bind(record.submission_id.into_uuid())
        .bind(&result.model_name)
        .bind(&result.ollama_version)
        .bind(result.tokens_per_second)
        .bind(result.eval_count)
        .bind(result.duration)
        .bind(result.timestamp)
        .bind(result.os())
        .bind(result.cpu_name())
        .bind(result.gpu_name())
        .bind(&result.ip)
        .bind(record.client_ip.to_string())
        .bind(Json(result))
        .bind(record.received_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(if inserted == 0 {
            InsertOutcome::Duplicate
        } else {
            InsertOutcome::Inserted
        })
    }

    async fn find(&self, submission_id: SubmissionId) -> StorageResult<Option<BenchmarkResult>> {
        let row: Option<Json<BenchmarkResult>> =
            sqlx::query_scalar("SELECT payload FROM benchmarks WHERE submission_id = $1")
                .bind(submission_id.into_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|Json(result)| result))
    }

    async fn list(&self, query: &ListQuery) -> StorageResult<BenchmarkPage> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM benchmarks");
        push_filters(&mut count, &query.filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        // Sort column and direction come from whitelisted enums
        let mut select = QueryBuilder::<Postgres>::new("SELECT payload FROM benchmarks");
        push_filters(&mut select, &query.filter);
        select
            .push(format!(
                " ORDER BY {} {}, submission_id ASC",
                query.sort_by.column(),
                query.order.as_sql()
            ))
            .push(" LIMIT ")
            .push_bind(i64::from(query.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));

        let rows: Vec<Json<BenchmarkResult>> =
            select.build_query_scalar().fetch_all(&self.pool).await?;

        Ok(BenchmarkPage {
            benchmarks: rows.into_iter().map(|Json(result)| result).collect(),
            total: u64::try_from(total).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rtx"), "%rtx%");
        assert_eq!(like_pattern("100%_x\\"), "%100\\%\\_x\\\\%");
    }

    #[test]
    fn test_filters_bind_values() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM benchmarks");
        push_filters(
            &mut builder,
            &BenchmarkFilter::new(Some("llama3"), None, Some("linux"), None, Some("rtx")),
        );
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM benchmarks WHERE TRUE AND model_name = $1 AND os ILIKE $2 AND gpu_name ILIKE $3"
        );
    }
}
