use super::details::print_review_stats;
use super::ui::{reviews_table, Spinner};
use super::{client_failure, Session};
use crate::output::Output;
use crate::ReviewCommands;
use cinesearch_config::{LocalReviewStore, PathManager};
use cinesearch_core::{AppStore, SubmitError};
use cinesearch_models::{NewReview, SentimentCounts};
use color_eyre::Result;
use serde_json::json;

pub async fn run_reviews(cmd: ReviewCommands, paths: &PathManager, output: &Output) -> Result<()> {
    let session = Session::open(paths)?;
    let app = AppStore::new();

    match cmd {
        ReviewCommands::List { imdb_id, page, limit, snapshot } => {
            let limit = limit.unwrap_or(session.config.reviews.page_size);
            list_reviews(&session, &app, &imdb_id, page, limit, output).await?;
            if snapshot {
                save_snapshot(&app, paths, output).await;
            }
            Ok(())
        }
        ReviewCommands::Add { imdb_id, rating, text, name, email } => {
            let draft = NewReview { rating, text, name, email };
            add_review(&session, &app, &imdb_id, &draft, output).await
        }
        ReviewCommands::Delete { review_id, imdb_id } => {
            delete_review(&session, &app, &review_id, &imdb_id, output).await
        }
        ReviewCommands::Summary { imdb_id, summary, good, average, bad } => {
            update_summary(&session, &imdb_id, &summary, SentimentCounts::new(good, average, bad), output).await
        }
    }
}

async fn list_reviews(
    session: &Session,
    app: &AppStore,
    imdb_id: &str,
    page: u32,
    limit: u32,
    output: &Output,
) -> Result<()> {
    let spinner = Spinner::start(format!("Fetching reviews for {}...", imdb_id), output);
    let result = app
        .reviews
        .fetch_movie_reviews(session.clients.reviews.as_ref(), imdb_id, page, limit)
        .await;
    spinner.finish();

    let response = result.map_err(|e| client_failure(e, output))?;
    let aggregate = app.reviews.aggregate(imdb_id).await;

    if output.is_human() {
        if output.is_quiet() {
            return Ok(());
        }
        print_review_stats(aggregate.as_ref(), output);
        if !response.reviews.is_empty() {
            output.println(reviews_table(&response.reviews).to_string());
        }
        if let Some(pagination) = response.pagination {
            output.println(format!(
                "Page {} of {} ({} reviews)",
                pagination.page,
                pagination.total_pages.max(1),
                pagination.total_reviews
            ));
            if pagination.has_more {
                output.println(format!(
                    "More available: cinesearch reviews list {} --page {}",
                    imdb_id,
                    pagination.page + 1
                ));
            }
        }
    } else {
        output.json(&json!({
            "movie_id": imdb_id,
            "review_summary": aggregate.as_ref().map(|a| a.review_summary.clone()).unwrap_or_default(),
            "sentiment_counts": aggregate.as_ref().map(|a| a.sentiment_counts).unwrap_or_default(),
            "average_rating": aggregate.as_ref().map(|a| a.average_rating()).unwrap_or(0.0),
            "reviews": response.reviews,
            "pagination": response.pagination,
        }));
    }

    Ok(())
}

async fn save_snapshot(app: &AppStore, paths: &PathManager, output: &Output) {
    let store = LocalReviewStore::new(paths.data_dir());
    let mut saved = store.load();
    saved.extend(app.reviews.aggregates().await);
    store.save(&saved);
    output.info(format!("Snapshot written to {}", store.path().display()));
}

async fn add_review(session: &Session, app: &AppStore, imdb_id: &str, draft: &NewReview, output: &Output) -> Result<()> {
    let spinner = Spinner::start("Submitting review...", output);
    let result = app
        .submit_review(session.clients.reviews.as_ref(), imdb_id, draft)
        .await;
    spinner.finish();

    let created = match result {
        Ok(created) => created,
        Err(SubmitError::Invalid(errors)) => {
            for field in errors.errors() {
                output.error(field.message);
            }
            return Err(color_eyre::eyre::eyre!("Review was not submitted"));
        }
        Err(SubmitError::Client(e)) => return Err(client_failure(e, output)),
    };

    if let Some(error) = app.reviews.error().await {
        output.warn(format!("Review saved, but the summary could not be refreshed: {}", error));
    }

    if output.is_human() {
        output.success(format!("Review {} added to {}", created.id, imdb_id));
        print_review_stats(app.reviews.aggregate(imdb_id).await.as_ref(), output);
    } else {
        output.json(&json!({
            "type": "success",
            "review": created,
            "pagination": app.reviews.pagination(imdb_id).await,
        }));
    }
    Ok(())
}

async fn delete_review(
    session: &Session,
    app: &AppStore,
    review_id: &str,
    imdb_id: &str,
    output: &Output,
) -> Result<()> {
    app.reviews
        .delete_review(session.clients.reviews.as_ref(), review_id, imdb_id)
        .await
        .map_err(|e| client_failure(e, output))?;

    output.success(format!("Deleted review {}", review_id));
    Ok(())
}

async fn update_summary(
    session: &Session,
    imdb_id: &str,
    summary: &str,
    counts: SentimentCounts,
    output: &Output,
) -> Result<()> {
    let record = session
        .clients
        .reviews
        .patch_movie_summary(imdb_id, summary, counts)
        .await
        .map_err(|e| client_failure(e, output))?;

    if output.is_human() {
        output.success(format!(
            "Summary stored for {} ({} good, {} average, {} bad)",
            record.imdb_id, record.sentiment_counts.good, record.sentiment_counts.average, record.sentiment_counts.bad
        ));
    } else {
        output.json(&json!({ "type": "success", "movie": record }));
    }
    Ok(())
}
