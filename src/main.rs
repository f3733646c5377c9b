use ecocart::api::dispatch;
use ecocart::catalog::{format_score, search};
use ecocart::{AppConfig, Session};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "ecocart=debug".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let session = Session::init(&config)?;

    match session.api.health().await {
        Ok(h) if h.is_ok() => tracing::info!("service healthy"),
        Ok(h) => tracing::warn!(status = %h.status, "service reports unhealthy"),
        Err(e) => tracing::warn!(error = %e, "health check failed; continuing"),
    }

    let cancel = CancellationToken::new();
    let catalog = {
        let api = session.api.clone();
        dispatch(async move { api.fetch_catalog().await }, cancel.clone())
    };
    let recommended = {
        let api = session.api.clone();
        dispatch(async move { api.fetch_recommendations().await }, cancel.clone())
    };
    let (catalog, recommended) = tokio::join!(catalog, recommended);
    let catalog = catalog?;
    let recommended = recommended?;
    tracing::info!(items = catalog.len(), recommended = recommended.len(), "catalog loaded");

    let query = std::env::args().nth(1).unwrap_or_default();
    for item in search(&query, &recommended, &catalog).into_iter().take(3) {
        match session.classify_and_add(item).await {
            Ok((assessment, _)) => tracing::info!(
                name = %assessment.name,
                label = %assessment.label,
                score = %format_score(assessment.eco_score),
                "classified"
            ),
            Err(e) => tracing::error!(name = %item.name, error = %e, "classification failed"),
        }
    }
    tracing::info!(
        average = %format_score(session.average_score().await),
        "cart score"
    );

    let (envelope, suggestions) = session.meal_suggestions_for_cart().await?;
    tracing::info!(
        used = ?envelope.used_cart_items,
        added = ?envelope.added_recommendations,
        "cart meals generated"
    );
    for s in &suggestions {
        tracing::info!(meal = %s.recipe.name, missing = ?s.missing, "suggestion");
    }
    if let Some(first) = suggestions.first() {
        let added = session.add_missing_for(&first.recipe).await;
        tracing::info!(meal = %first.recipe.name, added, "missing ingredients added");
    }

    Ok(())
}
