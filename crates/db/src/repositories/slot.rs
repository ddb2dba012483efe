use crate::models::DbSlot;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_slot(
    pool: &Pool<Postgres>,
    tutor_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(%tutor_id, %start_time, "creating slot");

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        INSERT INTO slots (id, tutor_id, start_time, end_time, booked, created_at)
        VALUES ($1, $2, $3, $4, FALSE, $5)
        RETURNING id, tutor_id, start_time, end_time, booked, created_at
        "#,
    )
    .bind(id)
    .bind(tutor_id)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn exists_by_tutor_and_start(
    pool: &Pool<Postgres>,
    tutor_id: Uuid,
    start_time: DateTime<Utc>,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM slots
            WHERE tutor_id = $1 AND start_time = $2
        );
        "#,
    )
    .bind(tutor_id)
    .bind(start_time)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, tutor_id, start_time, end_time, booked, created_at
        FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn delete_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_slots_by_tutor(pool: &Pool<Postgres>, tutor_id: Uuid) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, tutor_id, start_time, end_time, booked, created_at
        FROM slots
        WHERE tutor_id = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(tutor_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn exists_unbooked_at(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM slots
            WHERE start_time = $1 AND booked = FALSE
        );
        "#,
    )
    .bind(start_time)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn get_unbooked_in_range(
    pool: &Pool<Postgres>,
    tutor_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, tutor_id, start_time, end_time, booked, created_at
        FROM slots
        WHERE tutor_id = $1 AND start_time >= $2 AND end_time <= $3 AND booked = FALSE
        ORDER BY start_time ASC
        "#,
    )
    .bind(tutor_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_unbooked_excluding_tutor(
    pool: &Pool<Postgres>,
    excluded_tutor_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, tutor_id, start_time, end_time, booked, created_at
        FROM slots
        WHERE tutor_id <> $1 AND start_time >= $2 AND end_time <= $3 AND booked = FALSE
        ORDER BY start_time ASC
        "#,
    )
    .bind(excluded_tutor_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_unbooked_between(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, tutor_id, start_time, end_time, booked, created_at
        FROM slots
        WHERE booked = FALSE AND start_time BETWEEN $1 AND $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}
