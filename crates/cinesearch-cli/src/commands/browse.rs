use super::details::{print_details, print_review_stats};
use super::prompts;
use super::search::print_movies;
use super::ui::{reviews_table, Spinner};
use super::{print_client_error, Session};
use crate::output::Output;
use cinesearch_config::{LocalReviewStore, PathManager};
use cinesearch_core::{AppStore, SubmitError};
use cinesearch_models::NewReview;
use color_eyre::Result;
use owo_colors::OwoColorize;

const SUGGESTIONS: [&str; 8] = [
    "Inception",
    "The Matrix",
    "Interstellar",
    "The Dark Knight",
    "Pulp Fiction",
    "Fight Club",
    "Gladiator",
    "Forrest Gump",
];

const HELP: &str = "\
Commands:
  search <title>   search (or just type a title)
  more             next page of results
  open <n|id>      open result number n or an IMDb id
  next             next page of reviews for the open movie
  review           write a review for the open movie
  delete <id>      delete a review of the open movie
  back             close the open movie
  retry            re-issue the last failed request
  clear            clear the result list (cache is kept)
  help             show this help
  quit             leave";

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Search(String),
    More,
    Open(String),
    NextReviews,
    Review,
    Delete(String),
    Back,
    Retry,
    Clear,
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

fn parse_action(line: &str) -> Action {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match (verb.to_lowercase().as_str(), rest) {
        ("", _) => Action::Nothing,
        ("search" | "s", "") => Action::Unknown("search needs a title".to_string()),
        ("search" | "s", query) => Action::Search(query.to_string()),
        ("more" | "m", "") => Action::More,
        ("open" | "o", "") => Action::Unknown("open needs a result number or IMDb id".to_string()),
        ("open" | "o", target) => Action::Open(target.to_string()),
        ("next" | "n", "") => Action::NextReviews,
        ("review" | "r", "") => Action::Review,
        ("delete" | "d", "") => Action::Unknown("delete needs a review id".to_string()),
        ("delete" | "d", id) => Action::Delete(id.to_string()),
        ("back" | "b", "") => Action::Back,
        ("retry", "") => Action::Retry,
        ("clear", "") => Action::Clear,
        ("help" | "h" | "?", "") => Action::Help,
        ("quit" | "q" | "exit", "") => Action::Quit,
        _ => Action::Search(line.to_string()),
    }
}

struct Browser<'a> {
    session: Session,
    app: AppStore,
    open: Option<String>,
    output: &'a Output,
}

pub async fn run_browse(paths: &PathManager, output: &Output) -> Result<()> {
    let session = Session::open(paths)?;
    let snapshot = LocalReviewStore::new(paths.data_dir());
    let mut browser = Browser {
        session,
        app: AppStore::with_review_aggregates(snapshot.load()),
        open: None,
        output,
    };

    output.println(format!("{}", "CineSearch".bold().bright_cyan()));
    output.println(format!("Try: {}", SUGGESTIONS.join(", ").bright_black()));
    output.println("Type 'help' for commands.");

    loop {
        let prompt = match &browser.open {
            Some(id) => format!("cinesearch [{}]", id),
            None => "cinesearch".to_string(),
        };
        let line = prompts::prompt_string(&prompt, None)?;

        match parse_action(&line) {
            Action::Quit => break,
            Action::Nothing => {}
            Action::Help => output.println(HELP),
            Action::Unknown(msg) => output.warn(msg),
            action => browser.handle(action).await?,
        }
    }

    snapshot.save(&browser.app.reviews.aggregates().await);
    Ok(())
}

impl Browser<'_> {
    async fn handle(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Search(query) => self.search(&query).await,
            Action::More => self.more().await,
            Action::Open(target) => self.open(&target).await,
            Action::NextReviews => self.next_reviews().await,
            Action::Review => self.review().await?,
            Action::Delete(review_id) => self.delete(&review_id).await?,
            Action::Back => {
                self.app.close_movie().await;
                self.open = None;
            }
            Action::Retry => self.retry().await,
            Action::Clear => {
                self.app.movies.clear_search().await;
                self.output.info(format!(
                    "Results cleared ({} searches still cached)",
                    self.app.movies.cached_search_count().await
                ));
            }
            Action::Help | Action::Quit | Action::Nothing | Action::Unknown(_) => {}
        }
        Ok(())
    }

    async fn search(&mut self, query: &str) {
        let spinner = Spinner::start(format!("Searching for \"{}\"...", query), self.output);
        let result = self
            .app
            .movies
            .search(self.session.clients.movies.as_ref(), query, 1)
            .await;
        spinner.finish();

        match result {
            Ok(outcome) => {
                self.print_results(0).await;
                if outcome.from_cache {
                    self.output.info(format!("{}", "(from cache)".bright_black()));
                }
            }
            Err(e) => print_client_error(&e, self.output),
        }
    }

    async fn more(&mut self) {
        let before = self.app.movies.movies().await.len();
        let spinner = Spinner::start("Loading more...", self.output);
        let result = self
            .app
            .movies
            .load_more(self.session.clients.movies.as_ref())
            .await;
        spinner.finish();

        match result {
            Ok(Some(_)) => self.print_results(before).await,
            Ok(None) => self.output.info("No more results"),
            Err(e) => print_client_error(&e, self.output),
        }
    }

    async fn print_results(&self, from: usize) {
        let state = self.app.movies.snapshot().await;
        if state.movies.is_empty() {
            self.output.info("No results");
            return;
        }
        print_movies(&state.movies[from.min(state.movies.len())..], from, self.output);
        self.output.println(format!(
            "Showing {} of {}{}",
            state.movies.len(),
            state.total_results,
            if state.has_next_page() { " - type 'more' for the next page" } else { "" }
        ));
    }

    async fn resolve_target(&self, target: &str) -> Option<String> {
        match target.parse::<usize>() {
            Ok(n) => {
                let movies = self.app.movies.movies().await;
                n.checked_sub(1).and_then(|idx| movies.get(idx)).map(|m| m.imdb_id.clone())
            }
            Err(_) => Some(target.to_string()),
        }
    }

    async fn open(&mut self, target: &str) {
        let Some(imdb_id) = self.resolve_target(target).await else {
            self.output.warn(format!("No result number {}", target));
            return;
        };

        let spinner = Spinner::start(format!("Opening {}...", imdb_id), self.output);
        let opened = self
            .app
            .open_movie(
                self.session.clients.movies.as_ref(),
                self.session.clients.reviews.as_ref(),
                &imdb_id,
            )
            .await;
        spinner.finish();

        self.open = Some(imdb_id.clone());
        match opened.details {
            Ok(details) => {
                print_details(&details.movie, self.output);
                if details.from_cache {
                    self.output.info(format!("{}", "(details from cache)".bright_black()));
                }
            }
            Err(e) => print_client_error(&e, self.output),
        }
        match opened.reviews {
            Ok(_) => self.print_reviews(&imdb_id).await,
            Err(e) => print_client_error(&e, self.output),
        }
    }

    async fn print_reviews(&self, imdb_id: &str) {
        let aggregate = self.app.reviews.aggregate(imdb_id).await;
        print_review_stats(aggregate.as_ref(), self.output);
        if let Some(aggregate) = aggregate.filter(|a| !a.is_empty()) {
            self.output.println(reviews_table(&aggregate.reviews).to_string());
            if aggregate.has_more() {
                self.output.println("Type 'next' for more reviews");
            }
        }
    }

    fn require_open(&self) -> Option<String> {
        if self.open.is_none() {
            self.output.warn("Open a movie first");
        }
        self.open.clone()
    }

    async fn next_reviews(&mut self) {
        let Some(imdb_id) = self.require_open() else {
            return;
        };
        let result = self
            .app
            .reviews
            .load_more_reviews(self.session.clients.reviews.as_ref(), &imdb_id)
            .await;

        match result {
            Ok(Some(_)) => self.print_reviews(&imdb_id).await,
            Ok(None) => self.output.info("No more reviews"),
            Err(e) => print_client_error(&e, self.output),
        }
    }

    async fn review(&mut self) -> Result<()> {
        let Some(imdb_id) = self.require_open() else {
            return Ok(());
        };

        let draft = NewReview {
            rating: prompts::prompt_rating("Rating (1-5)")?,
            text: prompts::prompt_string("Review", None)?,
            name: prompts::prompt_string("Name (optional if email given)", None)?,
            email: prompts::prompt_string("Email (optional if name given)", None)?,
        };

        let spinner = Spinner::start("Submitting review...", self.output);
        let result = self
            .app
            .submit_review(self.session.clients.reviews.as_ref(), &imdb_id, &draft)
            .await;
        spinner.finish();

        match result {
            Ok(created) => {
                self.output.success(format!("Review {} added", created.id));
                self.print_reviews(&imdb_id).await;
            }
            Err(SubmitError::Invalid(errors)) => {
                for field in errors.errors() {
                    self.output.error(field.message);
                }
            }
            Err(SubmitError::Client(e)) => print_client_error(&e, self.output),
        }
        Ok(())
    }

    async fn delete(&mut self, review_id: &str) -> Result<()> {
        let Some(imdb_id) = self.require_open() else {
            return Ok(());
        };
        if !prompts::prompt_yes_no(&format!("Delete review {}?", review_id), false)? {
            return Ok(());
        }

        match self
            .app
            .reviews
            .delete_review(self.session.clients.reviews.as_ref(), review_id, &imdb_id)
            .await
        {
            Ok(()) => {
                self.output.success(format!("Deleted review {}", review_id));
                self.print_reviews(&imdb_id).await;
            }
            Err(e) => print_client_error(&e, self.output),
        }
        Ok(())
    }

    async fn retry(&mut self) {
        if self.open.is_some() && self.app.movies.details_error().await.is_some() {
            match self
                .app
                .movies
                .retry_details(self.session.clients.movies.as_ref())
                .await
            {
                Ok(Some(details)) => print_details(&details.movie, self.output),
                Ok(None) => {}
                Err(e) => print_client_error(&e, self.output),
            }
            return;
        }

        match self.app.movies.retry(self.session.clients.movies.as_ref()).await {
            Ok(Some(_)) => self.print_results(0).await,
            Ok(None) => self.output.info("Nothing to retry"),
            Err(e) => print_client_error(&e, self.output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("  "), Action::Nothing);
        assert_eq!(parse_action("search The Matrix"), Action::Search("The Matrix".to_string()));
        assert_eq!(parse_action("Blade Runner"), Action::Search("Blade Runner".to_string()));
        assert_eq!(parse_action("open 3"), Action::Open("3".to_string()));
        assert_eq!(parse_action("o tt0133093"), Action::Open("tt0133093".to_string()));
        assert_eq!(parse_action("MORE"), Action::More);
        assert_eq!(parse_action("delete r1"), Action::Delete("r1".to_string()));
        assert_eq!(parse_action("q"), Action::Quit);
        assert!(matches!(parse_action("open"), Action::Unknown(_)));
    }

    #[test]
    fn test_single_word_title_is_a_search() {
        assert_eq!(parse_action("Alien"), Action::Search("Alien".to_string()));
        // A bare verb with an argument it does not take is treated as a title
        assert_eq!(parse_action("more cowbell"), Action::Search("more cowbell".to_string()));
    }
}
