use super::ui::{header_cell, new_table, print_section_header, stars, Spinner};
use super::{client_failure, Session};
use crate::output::Output;
use cinesearch_config::PathManager;
use cinesearch_core::AppStore;
use cinesearch_models::{is_available, MovieDetails, MovieReviewAggregate};
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_details(imdb_id: &str, paths: &PathManager, output: &Output) -> Result<()> {
    let session = Session::open(paths)?;
    let app = AppStore::new();

    let spinner = Spinner::start(format!("Loading {}...", imdb_id), output);
    let opened = app
        .open_movie(session.clients.movies.as_ref(), session.clients.reviews.as_ref(), imdb_id)
        .await;
    spinner.finish();

    let details = opened.details.map_err(|e| client_failure(e, output))?;
    if let Err(e) = &opened.reviews {
        output.warn(format!("Reviews unavailable: {}", e));
    }
    let aggregate = app.reviews.aggregate(imdb_id).await;

    if output.is_human() {
        if !output.is_quiet() {
            print_details(&details.movie, output);
            print_review_stats(aggregate.as_ref(), output);
        }
    } else {
        output.json(&json!({
            "movie": details.movie,
            "reviews": aggregate.as_ref().map(|a| json!({
                "average_rating": a.average_rating(),
                "total_reviews": a.pagination.map(|p| p.total_reviews),
                "review_summary": a.review_summary,
                "sentiment_counts": a.sentiment_counts,
            })),
        }));
    }

    Ok(())
}

pub fn print_details(movie: &MovieDetails, output: &Output) {
    print_section_header(&format!("{} ({})", movie.title, movie.year), output);

    let mut table = new_table();
    let fields = [
        ("Rated", movie.rated.as_str()),
        ("Released", movie.released.as_str()),
        ("Runtime", movie.runtime.as_str()),
        ("Genre", movie.genre.as_str()),
        ("Director", movie.director.as_str()),
        ("Writer", movie.writer.as_str()),
        ("Cast", movie.actors.as_str()),
        ("Language", movie.language.as_str()),
        ("Country", movie.country.as_str()),
        ("Awards", movie.awards.as_str()),
        ("Box Office", movie.box_office.as_str()),
    ];
    for (label, value) in fields.into_iter().filter(|(_, v)| is_available(v)) {
        table.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    if let Some(rating) = movie.imdb_rating() {
        table.add_row(vec![header_cell("IMDb"), Cell::new(format!("{}/10", rating))]);
    }
    for rating in &movie.ratings {
        table.add_row(vec![header_cell(&rating.source), Cell::new(&rating.value)]);
    }
    output.println(table.to_string());

    if is_available(&movie.plot) {
        output.println("");
        output.println(&movie.plot);
    }
}

pub fn print_review_stats(aggregate: Option<&MovieReviewAggregate>, output: &Output) {
    print_section_header("Reviews", output);

    let Some(aggregate) = aggregate.filter(|a| !a.is_empty()) else {
        output.println(format!("{}", "No reviews yet. Be the first: cinesearch reviews add".bright_black()));
        return;
    };

    let average = aggregate.average_rating();
    let total = aggregate
        .pagination
        .map(|p| p.total_reviews)
        .unwrap_or(aggregate.reviews.len() as u32);
    output.println(format!(
        "{} {:.1}/5 from {} review{}",
        stars(average.round() as u8),
        average,
        total,
        if total == 1 { "" } else { "s" }
    ));

    let counts = aggregate.sentiment_counts;
    if counts.total() > 0 {
        output.println(format!(
            "{} good  {} average  {} bad",
            counts.good.to_string().green(),
            counts.average.to_string().yellow(),
            counts.bad.to_string().red()
        ));
    }
    if !aggregate.review_summary.is_empty() {
        output.println(format!("{}", aggregate.review_summary.italic()));
    }
}
