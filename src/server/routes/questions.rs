use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_option_string_from_number,
        error::ApiError,
        pagination::{paginate, PageQuery},
    },
};

use super::{ApiResponse, AppJson, AppPath, Success};

#[derive(Deserialize, Debug)]
struct QuestionForm {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_string_from_number")]
    category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct Deleted {
    deleted: i64,
}

#[derive(Serialize)]
struct Created {
    created: i64,
    total_questions: i64,
}

#[tracing::instrument(skip(pool))]
async fn questions_page(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let all = questions::get_all_questions(&pool).await?;
    let total_questions = all.len();
    let questions = paginate(all, page);
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Success::new(QuestionsPage {
        questions,
        total_questions,
        categories: categories::get_category_map(&pool).await?,
    }))
}

#[tracing::instrument(skip(pool))]
async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> ApiResponse<Deleted> {
    // a missing question is reported like any other failure here: 422, not 404
    questions::delete_question(&pool, id).await.map_err(|e| {
        tracing::info!("Cannot delete question {id}: {e}");
        ApiError::Unprocessable
    })?;
    Ok(Success::new(Deleted { deleted: id }))
}

#[tracing::instrument(skip(pool))]
async fn create_question(
    State(pool): State<SqlitePool>,
    AppJson(form): AppJson<QuestionForm>,
) -> ApiResponse<Created> {
    let new_question = NewQuestion {
        question: form.question,
        answer: form.answer,
        category: form.category,
        difficulty: form.difficulty,
    };
    let id = questions::create_question(&pool, new_question)
        .await
        .map_err(|e| {
            tracing::info!("Cannot create question: {e}");
            ApiError::Unprocessable
        })?;
    let total_questions = questions::count_questions(&pool)
        .await
        .map_err(|_| ApiError::Unprocessable)?;

    Ok(Success::new(Created {
        created: id,
        total_questions,
    }))
}

#[tracing::instrument(skip(pool))]
async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
    AppJson(body): AppJson<SearchBody>,
) -> ApiResponse<SearchResults> {
    let term = body.search_term.ok_or(ApiError::Unprocessable)?;
    let found = questions::search_questions(&pool, &term).await?;
    if found.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total_questions = found.len();

    Ok(Success::new(SearchResults {
        questions: paginate(found, page),
        total_questions,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
