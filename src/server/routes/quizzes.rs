use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{
        app::AppState,
        error::ApiError,
        quiz::{pick_unseen, QuizCategory},
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{ApiResponse, AppJson, Success};

#[derive(Deserialize, Debug)]
struct QuizRequest {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Serialize)]
struct NextQuestion {
    question: Question,
}

#[tracing::instrument(skip(pool))]
async fn next_question(
    State(pool): State<SqlitePool>,
    AppJson(request): AppJson<QuizRequest>,
) -> ApiResponse<NextQuestion> {
    let previous = request.previous_questions.ok_or(ApiError::Unprocessable)?;
    let category = request.quiz_category.ok_or(ApiError::Unprocessable)?;

    let candidates = match category.filter() {
        Some(id) => questions::get_questions_for_category(&pool, &id.to_string()).await,
        None => questions::get_all_questions(&pool).await,
    }
    .map_err(|_| ApiError::Unprocessable)?;

    let question = pick_unseen(candidates, &previous, &mut rand::thread_rng())
        .ok_or(ApiError::Unprocessable)?;

    let label = category
        .filter()
        .map_or_else(|| "all".to_owned(), |id| id.to_string());
    QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();

    Ok(Success::new(NextQuestion { question }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
