use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{StoreError, StoreResult};

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub difficulty: Option<i64>,
}

/// Fields of a question about to be inserted. Nothing is checked here, the
/// schema's NOT NULL constraints reject incomplete rows.
#[derive(Debug, Default)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<i64>,
}

pub async fn get_all_questions(pool: &SqlitePool) -> StoreResult<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> StoreResult<Question> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound {
        entity: "question",
        id,
    })
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: &str,
) -> StoreResult<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

/// Questions whose text contains `term`, ignoring case. Folding happens here rather
/// than in SQLite, whose LIKE only folds ASCII letters.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> StoreResult<Vec<Question>> {
    let term = term.to_lowercase();
    Ok(get_all_questions(pool)
        .await?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect())
}

pub async fn count_questions(pool: &SqlitePool) -> StoreResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create_question(pool: &SqlitePool, new_question: NewQuestion) -> StoreResult<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(new_question.question)
    .bind(new_question.answer)
    .bind(new_question.category)
    .bind(new_question.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> StoreResult<()> {
    get_question(pool, id).await?;
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
