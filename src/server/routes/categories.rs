use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{app::AppState, error::ApiError},
};

use super::{ApiResponse, AppPath, Success};

#[derive(Serialize)]
struct CategoriesBody {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    questions: Vec<Question>,
    total_questions: usize,
    #[serde(rename = "currentCategory")]
    current_category: String,
}

#[tracing::instrument(skip(pool))]
async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let categories = categories::get_category_map(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Success::new(CategoriesBody { categories }))
}

#[tracing::instrument(skip(pool))]
async fn category_questions(
    State(pool): State<SqlitePool>,
    AppPath(category_id): AppPath<i64>,
) -> ApiResponse<CategoryQuestionsBody> {
    // every failure on this route is reported as a missing resource
    let category = categories::get_category(&pool, category_id)
        .await
        .map_err(|_| ApiError::NotFound)?;
    let questions = questions::get_questions_for_category(&pool, &category_id.to_string())
        .await
        .map_err(|_| ApiError::NotFound)?;

    Ok(Success::new(CategoryQuestionsBody {
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{category_id}/questions", get(category_questions))
        .with_state(state)
}
