use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{StoreError, StoreResult};

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> StoreResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> StoreResult<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound {
        entity: "category",
        id,
    })
}

/// Categories keyed by id, in id order.
pub async fn get_category_map(pool: &SqlitePool) -> StoreResult<BTreeMap<i64, String>> {
    Ok(get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::in_memory;

    async fn seeded() -> SqlitePool {
        let pool = in_memory().await.unwrap();
        for (id, kind) in [(3, "Geography"), (1, "Science"), (2, "Art")] {
            sqlx::query("INSERT INTO categories (id, type) VALUES (?1, ?2)")
                .bind(id)
                .bind(kind)
                .execute(&pool)
                .await
                .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn categories_come_back_in_id_order() {
        let pool = seeded().await;
        let ids: Vec<i64> = get_all_categories(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let pool = seeded().await;
        let err = get_category(&pool, 10000).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                entity: "category",
                id: 10000
            }
        ));
    }

    #[tokio::test]
    async fn category_map_serializes_with_string_keys() {
        let pool = seeded().await;
        let map = get_category_map(&pool).await.unwrap();
        assert_eq!(map.get(&2).map(String::as_str), Some("Art"));
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            serde_json::json!({"1": "Science", "2": "Art", "3": "Geography"})
        );
    }
}
