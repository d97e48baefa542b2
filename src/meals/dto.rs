use serde::{Deserialize, Serialize};

use super::repo::{DietStatus, Meal};
use crate::error::ApiError;

/// Full replacement body shared by create and update; partial updates are
/// unsupported.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealBody {
    pub name: String,
    pub description: String,
    pub is_on_diet: DietStatus,
}

impl MealBody {
    /// Shape errors are caught by the Json extractor; this only guards the
    /// non-empty text requirement, before any query is issued.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::BadRequest("name must be non-empty"));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::BadRequest("description must be non-empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_meals: i64,
    pub on_diet_meals: i64,
    pub off_diet_meals: i64,
    pub best_sequence: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_accepts_camel_case_diet_flag() {
        let body: MealBody = serde_json::from_str(
            r#"{"name":"Lunch","description":"Salad","isOnDiet":"yes"}"#,
        )
        .expect("valid body");
        assert_eq!(body.is_on_diet, DietStatus::Yes);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn body_rejects_unknown_diet_value() {
        let res = serde_json::from_str::<MealBody>(
            r#"{"name":"Lunch","description":"Salad","isOnDiet":"maybe"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn body_rejects_missing_field() {
        let res = serde_json::from_str::<MealBody>(r#"{"name":"Lunch","isOnDiet":"no"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn blank_name_fails_validation() {
        let body: MealBody =
            serde_json::from_str(r#"{"name":"  ","description":"x","isOnDiet":"no"}"#)
                .expect("shape ok");
        assert!(matches!(body.validate(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn summary_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(SummaryResponse {
            total_meals: 6,
            on_diet_meals: 5,
            off_diet_meals: 1,
            best_sequence: 3,
        })
        .unwrap();
        assert_eq!(json["totalMeals"], 6);
        assert_eq!(json["onDietMeals"], 5);
        assert_eq!(json["offDietMeals"], 1);
        assert_eq!(json["bestSequence"], 3);
    }
}
