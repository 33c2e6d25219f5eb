use crate::AppState;
use aj_core::{Analytics, Article, ArticleStorage, StatField, Trend};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub category: Option<String>,
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Article>>, StatusCode> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let mut articles = state
        .storage
        .get_recent_articles(limit)
        .await
        .map_err(|e| {
            warn!(error = %e, "Article listing failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if let Some(category) = params.category.filter(|c| c != "Hammasi") {
        articles.retain(|a| a.category == category);
    }
    Ok(Json(articles))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, StatusCode> {
    let article = state
        .storage
        .get_article(&id)
        .await
        .map_err(|e| {
            warn!(error = %e, "Article fetch failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    // Reads count as views; losing one is not worth failing the request.
    if let Err(e) = state.storage.update_article_stats(&id, StatField::Views).await {
        warn!(error = %e, "View counter update failed");
    }

    Ok(Json(article))
}

pub async fn get_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Trend>>, StatusCode> {
    state
        .storage
        .get_trends()
        .await
        .map(Json)
        .map_err(|e| {
            warn!(error = %e, "Trend listing failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Analytics>, StatusCode> {
    state
        .storage
        .get_analytics()
        .await
        .map_err(|e| {
            warn!(error = %e, "Analytics fetch failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aj_core::NewArticle;
    use aj_storage::MemoryStorage;

    async fn state_with_articles() -> (Arc<AppState>, Vec<Article>) {
        let storage = Arc::new(MemoryStorage::with_seed_data().await);
        let mut created = Vec::new();
        for (title, category) in [("Birinchi", "Texnologiya"), ("Ikkinchi", "Transport")] {
            created.push(
                storage
                    .create_article(NewArticle {
                        title: title.to_string(),
                        summary: "Mazmun".to_string(),
                        content: "Matn".to_string(),
                        category: category.to_string(),
                        tags: vec![],
                        is_ai_generated: false,
                        image_url: None,
                    })
                    .await
                    .unwrap(),
            );
        }
        (
            Arc::new(AppState {
                storage: storage as Arc<dyn ArticleStorage>,
            }),
            created,
        )
    }

    #[tokio::test]
    async fn listing_filters_by_category() {
        let (state, _) = state_with_articles().await;

        let all = list_articles(State(state.clone()), Query(ListParams::default()))
            .await
            .unwrap();
        assert_eq!(all.0.len(), 2);

        let filtered = list_articles(
            State(state),
            Query(ListParams {
                limit: None,
                category: Some("Transport".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(filtered.0.len(), 1);
        assert_eq!(filtered.0[0].title, "Ikkinchi");
    }

    #[tokio::test]
    async fn fetching_an_article_bumps_its_view_counter() {
        let (state, created) = state_with_articles().await;
        let id = created[0].id.clone();

        let fetched = get_article(State(state.clone()), Path(id.clone())).await.unwrap();
        assert_eq!(fetched.0.id, id);

        let again = get_article(State(state), Path(id)).await.unwrap();
        assert_eq!(again.0.views, 1);
    }

    #[tokio::test]
    async fn missing_article_is_not_found() {
        let (state, _) = state_with_articles().await;
        let result = get_article(State(state), Path("yo'q-id".to_string())).await;
        assert!(matches!(result, Err(StatusCode::NOT_FOUND)));
    }

    #[tokio::test]
    async fn trends_and_analytics_are_served() {
        let (state, _) = state_with_articles().await;
        let trends = get_trends(State(state.clone())).await.unwrap();
        assert!(!trends.0.is_empty());

        let analytics = get_analytics(State(state)).await.unwrap();
        assert_eq!(analytics.0.ai_articles, 0);
    }
}
