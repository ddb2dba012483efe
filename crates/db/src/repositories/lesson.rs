use crate::models::DbLesson;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tutorsync_core::models::lesson::NewLesson;
use uuid::Uuid;

pub async fn get_lessons_by_student(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Vec<DbLesson>> {
    let lessons = sqlx::query_as::<_, DbLesson>(
        r#"
        SELECT id, student_id, tutor_id, start_time, end_time, duration_minutes, status, created_at
        FROM lessons
        WHERE student_id = $1
        ORDER BY start_time DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(lessons)
}

/// Insert the lesson and flip its slots to booked in one transaction.
///
/// Each flip is conditional on `booked = FALSE` at write time; a slot that
/// was consumed or deleted since the caller's read rolls the whole
/// transaction back and returns `None`. The coarse booking lock does not
/// cover concurrent bookings that found the same slots through different
/// lock keys, so this check is what keeps a slot from being consumed twice.
pub async fn create_lesson_booking(
    pool: &Pool<Postgres>,
    lesson: &NewLesson,
    slot_ids: &[Uuid],
) -> Result<Option<DbLesson>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let db_lesson = sqlx::query_as::<_, DbLesson>(
        r#"
        INSERT INTO lessons (id, student_id, tutor_id, start_time, end_time, duration_minutes, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, student_id, tutor_id, start_time, end_time, duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(lesson.student_id)
    .bind(lesson.tutor_id)
    .bind(lesson.start_time)
    .bind(lesson.end_time)
    .bind(lesson.duration.minutes() as i32)
    .bind(lesson.status.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for slot_id in slot_ids {
        let updated = sqlx::query(
            r#"
            UPDATE slots
            SET booked = TRUE
            WHERE id = $1 AND booked = FALSE
            "#,
        )
        .bind(slot_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            tracing::debug!(%slot_id, "slot no longer available, rolling back booking");
            tx.rollback().await?;
            return Ok(None);
        }
    }

    tx.commit().await?;
    Ok(Some(db_lesson))
}
