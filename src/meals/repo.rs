use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Diet flag stored as text; serializes as `"yes"`/`"no"` on the wire too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum DietStatus {
    Yes,
    No,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub session_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub is_on_diet: DietStatus,
    pub created_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct NewMeal {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: DietStatus,
}

#[derive(Debug)]
pub struct MealChanges {
    pub name: String,
    pub description: String,
    pub is_on_diet: DietStatus,
}

#[derive(Debug, FromRow)]
pub struct DietCounts {
    pub total: i64,
    pub on_diet: i64,
    pub off_diet: i64,
}

/// Storage order is insertion order; ties on `created_at` break on `id` so
/// the order is stable.
pub async fn list_by_session(db: &PgPool, session_id: Uuid) -> Result<Vec<Meal>, sqlx::Error> {
    sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, session_id, name, description, is_on_diet, created_at
        FROM meals
        WHERE session_id = $1
        ORDER BY created_at, id
        "#,
    )
    .bind(session_id)
    .fetch_all(db)
    .await
}

pub async fn find_by_session(
    db: &PgPool,
    session_id: Uuid,
    meal_id: Uuid,
) -> Result<Option<Meal>, sqlx::Error> {
    sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, session_id, name, description, is_on_diet, created_at
        FROM meals
        WHERE session_id = $1 AND id = $2
        "#,
    )
    .bind(session_id)
    .bind(meal_id)
    .fetch_optional(db)
    .await
}

pub async fn insert(db: &PgPool, meal: &NewMeal) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO meals (id, session_id, name, description, is_on_diet)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(meal.id)
    .bind(meal.session_id)
    .bind(&meal.name)
    .bind(&meal.description)
    .bind(meal.is_on_diet)
    .execute(db)
    .await?;
    Ok(())
}

/// Overwrites the three mutable fields. Returns false when no session-scoped
/// row matched; `id`, `session_id` and `created_at` are never touched.
pub async fn update_by_session(
    db: &PgPool,
    session_id: Uuid,
    meal_id: Uuid,
    changes: &MealChanges,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE meals
        SET name = $3, description = $4, is_on_diet = $5
        WHERE session_id = $1 AND id = $2
        "#,
    )
    .bind(session_id)
    .bind(meal_id)
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(changes.is_on_diet)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Deleting a row that is already gone is not an error.
pub async fn delete_by_session(
    db: &PgPool,
    session_id: Uuid,
    meal_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM meals WHERE session_id = $1 AND id = $2")
        .bind(session_id)
        .bind(meal_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn diet_counts(db: &PgPool, session_id: Uuid) -> Result<DietCounts, sqlx::Error> {
    sqlx::query_as::<_, DietCounts>(
        r#"
        SELECT count(*) AS total,
               count(*) FILTER (WHERE is_on_diet = 'yes') AS on_diet,
               count(*) FILTER (WHERE is_on_diet = 'no') AS off_diet
        FROM meals
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_one(db)
    .await
}

/// Just the diet flags in storage order, for the streak scan.
pub async fn diet_flags(db: &PgPool, session_id: Uuid) -> Result<Vec<DietStatus>, sqlx::Error> {
    sqlx::query_scalar::<_, DietStatus>(
        r#"
        SELECT is_on_diet
        FROM meals
        WHERE session_id = $1
        ORDER BY created_at, id
        "#,
    )
    .bind(session_id)
    .fetch_all(db)
    .await
}
