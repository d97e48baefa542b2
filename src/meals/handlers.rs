use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::{self, SessionId};
use crate::state::AppState;

use super::dto::{MealBody, MealsResponse, SummaryResponse};
use super::repo::{self, Meal, MealChanges, NewMeal};
use super::summary::best_sequence;

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<MealsResponse>, ApiError> {
    let meals = repo::list_by_session(&state.db, session_id).await?;
    Ok(Json(MealsResponse { meals }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
) -> Result<Json<Meal>, ApiError> {
    let meal = repo::find_by_session(&state.db, session_id, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(meal))
}

#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<SummaryResponse>, ApiError> {
    let counts = repo::diet_counts(&state.db, session_id).await?;
    let flags = repo::diet_flags(&state.db, session_id).await?;
    Ok(Json(SummaryResponse {
        total_meals: counts.total,
        on_diet_meals: counts.on_diet,
        off_diet_meals: counts.off_diet,
        best_sequence: best_sequence(&flags),
    }))
}

/// The one route without the session guard: a request with no usable session
/// cookie mints a fresh token and sets it on the response.
#[instrument(skip(state, jar, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<MealBody>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    body.validate()?;

    let (jar, session_id) = match session::current_session(&jar) {
        Some(id) => (jar, id),
        None => session::issue_session(jar),
    };

    repo::insert(
        &state.db,
        &NewMeal {
            id: Uuid::new_v4(),
            session_id,
            name: body.name,
            description: body.description,
            is_on_diet: body.is_on_diet,
        },
    )
    .await?;

    Ok((jar, StatusCode::CREATED))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
    Json(body): Json<MealBody>,
) -> Result<StatusCode, ApiError> {
    body.validate()?;

    let changes = MealChanges {
        name: body.name,
        description: body.description,
        is_on_diet: body.is_on_diet,
    };
    let updated = repo::update_by_session(&state.db, session_id, id, &changes).await?;
    if !updated {
        // Update target absent is a plain client error, same as the
        // original contract.
        return Err(ApiError::BadRequest("meal not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repo::delete_by_session(&state.db, session_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
