//! Terminal implementation of the presentation trait, on dialoguer's
//! `Select`/`Confirm` with its re-exported `console` styling.

use std::io;

use dialoguer::console::{Term, style};
use dialoguer::{Confirm, Select};
use renamarr_core::ReportLevel;
use renamarr_renamer::{Interaction, MovieChoice, Selection, SeriesChoice};

pub struct Console {
    term: Term,
}

impl Console {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Clear between interactive items so each candidate table starts on
    /// a fresh screen. Best effort.
    pub fn clear_screen(&self) {
        let _ = self.term.clear_screen();
    }

    fn select(&self, prompt: &str, mut labels: Vec<String>) -> io::Result<Selection> {
        labels.push("Skip".to_string());
        let index = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_on(&self.term)
            .map_err(|e| io::Error::other(e.to_string()))?;
        if index + 1 == labels.len() {
            Ok(Selection::Skip)
        } else {
            Ok(Selection::Pick(index))
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn movie_label(choice: &MovieChoice) -> String {
    let mut label = choice.hit.title.clone();
    if !choice.hit.year.is_empty() {
        label.push_str(&format!(" ({})", choice.hit.year));
    }
    label.push_str(&format!(" [{}]", choice.hit.source));
    if let Some(details) = &choice.details {
        if let Some(runtime) = details.runtime_minutes {
            label.push_str(&format!(", {runtime} min"));
        }
        if !details.genres.is_empty() {
            label.push_str(&format!(", {}", details.genres.join("/")));
        }
    }
    label
}

fn series_label(choice: &SeriesChoice) -> String {
    let mut label = choice.hit.title.clone();
    if !choice.hit.year.is_empty() {
        label.push_str(&format!(" ({})", choice.hit.year));
    }
    label.push_str(&format!(" [{}]", choice.hit.source));
    if let Some(details) = &choice.details {
        if let Some(status) = &details.status {
            label.push_str(&format!(", {status}"));
        }
        if !details.genres.is_empty() {
            label.push_str(&format!(", {}", details.genres.join("/")));
        }
    }
    label
}

impl Interaction for Console {
    fn select_movie(&self, item: &str, choices: &[MovieChoice]) -> io::Result<Selection> {
        let labels = choices.iter().map(movie_label).collect();
        self.select(&format!("Matches for \"{item}\""), labels)
    }

    fn select_series(&self, item: &str, choices: &[SeriesChoice]) -> io::Result<Selection> {
        let labels = choices.iter().map(series_label).collect();
        self.select(&format!("Matches for \"{item}\""), labels)
    }

    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact_on(&self.term)
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn report(&self, level: ReportLevel, message: &str) {
        let line = match level {
            ReportLevel::Info => message.to_string(),
            ReportLevel::Warning => style(message).yellow().to_string(),
            ReportLevel::Error => style(message).red().to_string(),
            ReportLevel::Success => style(message).green().to_string(),
        };
        let _ = self.term.write_line(&line);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use renamarr_core::MediaType;
    use renamarr_metadata::{MovieDetails, SearchHit, Source};

    fn hit() -> SearchHit {
        SearchHit {
            id: "27205".into(),
            title: "Inception".into(),
            year: "2010".into(),
            media_type: MediaType::Movie,
            source: Source::Tmdb,
            score: 1.0,
        }
    }

    #[test]
    fn movie_label_shows_enriched_details() {
        let choice = MovieChoice {
            hit: hit(),
            details: Some(MovieDetails {
                runtime_minutes: Some(148),
                genres: vec!["Action".into(), "Sci-Fi".into()],
                ..Default::default()
            }),
        };
        assert_eq!(
            movie_label(&choice),
            "Inception (2010) [tmdb], 148 min, Action/Sci-Fi"
        );
    }

    #[test]
    fn movie_label_degrades_without_details() {
        let choice = MovieChoice {
            hit: hit(),
            details: None,
        };
        assert_eq!(movie_label(&choice), "Inception (2010) [tmdb]");
    }
}
