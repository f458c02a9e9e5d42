use super::ui::{header_cell, new_table, Spinner};
use super::{client_failure, Session};
use crate::output::Output;
use cinesearch_config::PathManager;
use cinesearch_core::MoviesStore;
use cinesearch_models::MovieSummary;
use color_eyre::Result;
use comfy_table::{Cell, Color};
use serde_json::json;

pub async fn run_search(query: &str, page: u32, pages: u32, paths: &PathManager, output: &Output) -> Result<()> {
    tracing::debug!("Search command started");

    if query.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("Search query cannot be empty"));
    }

    let session = Session::open(paths)?;
    let store = MoviesStore::new();
    let provider = session.clients.movies.as_ref();

    let spinner = Spinner::start(format!("Searching for \"{}\"...", query.trim()), output);
    let first = store.search(provider, query, page).await;
    let mut fetched = 1;
    let mut follow_up = Ok(());
    if first.is_ok() {
        while fetched < pages.max(1) {
            match store.load_more(provider).await {
                Ok(Some(_)) => fetched += 1,
                Ok(None) => break,
                Err(e) => {
                    follow_up = Err(e);
                    break;
                }
            }
        }
    }
    spinner.finish();

    let first = first.map_err(|e| client_failure(e, output))?;
    let state = store.snapshot().await;

    if output.is_human() {
        if !output.is_quiet() {
            print_movies(&state.movies, 0, output);
            output.println(format!(
                "Showing {} of {} results for \"{}\" (page {})",
                state.movies.len(),
                state.total_results,
                first.query,
                state.current_page
            ));
            if state.has_next_page() {
                output.println(format!(
                    "More available: cinesearch search \"{}\" --page {}",
                    first.query,
                    state.current_page + 1
                ));
            }
        }
    } else {
        output.json(&json!({
            "query": first.query,
            "page": state.current_page,
            "total_results": state.total_results,
            "has_more": state.has_next_page(),
            "movies": state.movies,
        }));
    }

    follow_up.map_err(|e| client_failure(e, output))
}

/// `offset` is the list position of `movies[0]`, for numbering
pub fn print_movies(movies: &[MovieSummary], offset: usize, output: &Output) {
    let mut table = new_table();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Title"),
        header_cell("Year"),
        header_cell("Type"),
        header_cell("IMDb ID"),
    ]);
    for (idx, movie) in movies.iter().enumerate() {
        table.add_row(vec![
            Cell::new(offset + idx + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(movie.media_type.as_deref().unwrap_or("")),
            Cell::new(&movie.imdb_id).fg(Color::DarkGrey),
        ]);
    }
    output.println(table.to_string());
}
