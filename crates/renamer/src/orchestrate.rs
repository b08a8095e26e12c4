//! Per-item rename flow: search, candidate selection, detail fetches,
//! plan computation and application. Errors never escape past one item
//! or batch; the run loop reports them and moves on.

use std::path::{Path, PathBuf};

use renamarr_core::{ReportLevel, RunConfig};
use renamarr_metadata::{Manager, MetadataError, MovieDetails, SearchHit, SeriesDetails};
use renamarr_scanner::parser::{self, MediaItem, MovieItem};
use renamarr_scanner::SeriesBatch;
use thiserror::Error;
use tracing::{info, warn};

use crate::fsops::{self, RenameError, RenameOp};
use crate::naming;
use crate::ui::{Interaction, MovieChoice, Selection, SeriesChoice};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Rename(#[from] RenameError),
    #[error("unresolved episodes: {}", format_missing(.missing))]
    PartialBatch { missing: Vec<(u32, u32)> },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_missing(missing: &[(u32, u32)]) -> String {
    missing
        .iter()
        .map(|(s, e)| format!("S{s:02}E{e:02}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Terminal state of one item or batch. Failures travel as `Err`; the
/// run loop counts them separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Renamed,
    Skipped,
}

struct Plan {
    /// Applied in order; a folder move always comes first.
    ops: Vec<RenameOp>,
    /// Companion subtitles; a failure here is a warning, not an item failure.
    subtitles: Vec<RenameOp>,
}

pub struct Orchestrator<'a> {
    manager: &'a Manager,
    ui: &'a dyn Interaction,
    config: &'a RunConfig,
}

impl<'a> Orchestrator<'a> {
    pub fn new(manager: &'a Manager, ui: &'a dyn Interaction, config: &'a RunConfig) -> Self {
        Self {
            manager,
            ui,
            config,
        }
    }

    pub async fn process_movie(&self, item: &MediaItem) -> Result<Outcome, ProcessError> {
        let Some(movie) = item.as_movie() else {
            warn!(path = %item.path.display(), "not a movie item");
            return Ok(Outcome::Skipped);
        };
        if item.clean_title.is_empty() {
            self.ui.report(
                ReportLevel::Warning,
                &format!("{}: no usable title to search for", item.raw_name),
            );
            return Ok(Outcome::Skipped);
        }

        let hits = self.manager.search_movies(&item.clean_title, movie.year).await;
        if hits.is_empty() {
            self.ui.report(
                ReportLevel::Warning,
                &format!("no matches for \"{}\"", item.clean_title),
            );
            return Ok(Outcome::Skipped);
        }

        let Some((hit, details)) = self.pick_movie(item, hits).await? else {
            self.ui
                .report(ReportLevel::Info, &format!("skipped {}", item.raw_name));
            return Ok(Outcome::Skipped);
        };
        let details = match details {
            Some(d) => d,
            None => self.manager.get_movie(&hit.id, hit.source).await?,
        };

        // The resolved year is canonical; the filename's year only fills in
        // when the backend record carries none.
        let year = parse_year(&details.year).or(movie.year);
        let plan = plan_movie(
            item,
            movie,
            &details.title,
            year,
            self.config.movies_out_dir.as_deref(),
        );
        self.execute(&item.raw_name, plan).await
    }

    pub async fn process_series_batch(&self, batch: &SeriesBatch) -> Result<Outcome, ProcessError> {
        let mut query = parser::series_query_from_folder(&batch.parent_name);
        if query.is_empty() {
            query = batch
                .episodes
                .first()
                .map(|e| e.clean_title.clone())
                .unwrap_or_default();
        }
        if query.is_empty() {
            return Ok(Outcome::Skipped);
        }

        let hits = self.manager.search_series(&query).await;
        if hits.is_empty() {
            self.ui
                .report(ReportLevel::Warning, &format!("no matches for \"{query}\""));
            return Ok(Outcome::Skipped);
        }

        let Some((hit, details)) = self.pick_series(&query, hits).await? else {
            self.ui
                .report(ReportLevel::Info, &format!("skipped {}", batch.parent_name));
            return Ok(Outcome::Skipped);
        };
        let details = match details {
            Some(d) => d,
            None => self.manager.get_series(&hit.id, hit.source).await?,
        };

        // Resolve every episode before anything moves; one unresolved
        // episode refuses the whole batch so a season directory is never
        // left half-renamed.
        let mut resolved = Vec::new();
        let mut missing = Vec::new();
        for item in &batch.episodes {
            let Some(ep) = item.as_episode() else { continue };
            match self
                .manager
                .get_episode(&hit.id, hit.source, ep.season, ep.episode)
                .await
            {
                Ok(d) => resolved.push((item, ep.season, ep.episode, d.name)),
                Err(e) => {
                    warn!(
                        season = ep.season,
                        episode = ep.episode,
                        error = %e,
                        "episode lookup failed"
                    );
                    missing.push((ep.season, ep.episode));
                }
            }
        }
        if !missing.is_empty() {
            return Err(ProcessError::PartialBatch { missing });
        }

        let year = parse_year(&details.year);
        let folder = naming::series_folder_name(&details.name, year);
        let base = self
            .config
            .series_out_dir
            .clone()
            .or_else(|| batch.parent_path.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let new_dir = base.join(&folder);

        let mut ops = Vec::with_capacity(resolved.len() + 1);
        // Renaming a scan root itself would orphan the rest of the run;
        // loose episodes can turn up under either configured input.
        let scan_roots = [
            self.config.movies_dir.as_deref(),
            self.config.series_dir.as_deref(),
        ];
        let rename_folder = !scan_roots.contains(&Some(batch.parent_path.as_path()));
        let episode_dir = if rename_folder {
            ops.push(RenameOp::new(batch.parent_path.clone(), new_dir.clone()));
            new_dir
        } else {
            batch.parent_path.clone()
        };
        for (item, season, episode, name) in &resolved {
            let file = naming::episode_filename(&details.name, *season, *episode, name, &item.extension);
            let Some(old_name) = item.path.file_name() else { continue };
            // Source recomputed against the folder's post-move location.
            ops.push(RenameOp::new(episode_dir.join(old_name), episode_dir.join(file)));
        }

        self.execute(
            &batch.parent_name,
            Plan {
                ops,
                subtitles: Vec::new(),
            },
        )
        .await
    }

    async fn pick_movie(
        &self,
        item: &MediaItem,
        hits: Vec<SearchHit>,
    ) -> Result<Option<(SearchHit, Option<MovieDetails>)>, ProcessError> {
        if self.config.auto {
            return Ok(hits.into_iter().next().map(|h| (h, None)));
        }

        let mut choices = Vec::with_capacity(hits.len());
        for hit in hits {
            let details = match self.manager.get_movie(&hit.id, hit.source).await {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!(id = %hit.id, source = %hit.source, error = %e, "detail fetch failed");
                    None
                }
            };
            choices.push(MovieChoice { hit, details });
        }
        match self.ui.select_movie(&item.clean_title, &choices)? {
            Selection::Pick(i) => Ok(choices.into_iter().nth(i).map(|c| (c.hit, c.details))),
            Selection::Skip => Ok(None),
        }
    }

    async fn pick_series(
        &self,
        query: &str,
        hits: Vec<SearchHit>,
    ) -> Result<Option<(SearchHit, Option<SeriesDetails>)>, ProcessError> {
        if self.config.auto {
            return Ok(hits.into_iter().next().map(|h| (h, None)));
        }

        let mut choices = Vec::with_capacity(hits.len());
        for hit in hits {
            let details = match self.manager.get_series(&hit.id, hit.source).await {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!(id = %hit.id, source = %hit.source, error = %e, "detail fetch failed");
                    None
                }
            };
            choices.push(SeriesChoice { hit, details });
        }
        match self.ui.select_series(query, &choices)? {
            Selection::Pick(i) => Ok(choices.into_iter().nth(i).map(|c| (c.hit, c.details))),
            Selection::Skip => Ok(None),
        }
    }

    /// Shared tail of both flows: report the plan, confirm, then either
    /// stop (dry run) or apply.
    async fn execute(&self, label: &str, plan: Plan) -> Result<Outcome, ProcessError> {
        let pending: Vec<&RenameOp> = plan
            .ops
            .iter()
            .chain(plan.subtitles.iter())
            .filter(|op| !op.is_noop())
            .collect();
        if pending.is_empty() {
            self.ui
                .report(ReportLevel::Info, &format!("{label}: already named correctly"));
            return Ok(Outcome::Renamed);
        }

        for op in &pending {
            self.ui.report(
                ReportLevel::Info,
                &format!("{} -> {}", op.src.display(), op.dst.display()),
            );
        }

        if !self.config.dry_run && !self.config.auto {
            if !self.ui.confirm(&format!("apply renames for {label}?"))? {
                self.ui.report(ReportLevel::Info, &format!("skipped {label}"));
                return Ok(Outcome::Skipped);
            }
        }

        if self.config.dry_run {
            self.ui
                .report(ReportLevel::Info, &format!("{label}: dry run, nothing changed"));
            return Ok(Outcome::Renamed);
        }

        for op in &plan.ops {
            op.check()?;
        }
        for op in &plan.ops {
            op.apply()?;
            if !op.is_noop() {
                info!(src = %op.src.display(), dst = %op.dst.display(), "renamed");
            }
        }
        for op in &plan.subtitles {
            if let Err(e) = op.apply() {
                warn!(src = %op.src.display(), error = %e, "subtitle move failed");
            }
        }

        self.ui
            .report(ReportLevel::Success, &format!("renamed {label}"));
        Ok(Outcome::Renamed)
    }
}

fn parse_year(year: &str) -> Option<u16> {
    year.get(..4)?.parse().ok()
}

/// Compute the rename plan for one movie item. A folder moves as a unit
/// with its main video normalized in place afterwards; a standalone file
/// always gets a per-movie folder, created in the output directory when
/// one is configured and next to the source otherwise.
fn plan_movie(
    item: &MediaItem,
    movie: &MovieItem,
    title: &str,
    year: Option<u16>,
    out_dir: Option<&Path>,
) -> Plan {
    let folder = naming::movie_folder_name(title, year);
    let parent = item
        .path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let base = out_dir.map(Path::to_path_buf).unwrap_or(parent);
    let new_dir = base.join(&folder);

    let mut ops = Vec::new();
    let mut subtitles = Vec::new();

    if movie.is_folder {
        ops.push(RenameOp::new(item.path.clone(), new_dir.clone()));

        if let Some(video) = movie.video_files.first() {
            if let (Some(old_name), Some(old_stem)) = (
                video.file_name().map(PathBuf::from),
                video.file_stem().and_then(|s| s.to_str()),
            ) {
                let new_name = naming::movie_filename(title, year, &item.extension);
                ops.push(RenameOp::new(new_dir.join(&old_name), new_dir.join(new_name)));

                for sub in &movie.subtitle_files {
                    let is_companion = sub
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(old_stem));
                    if !is_companion {
                        continue;
                    }
                    if let (Some(sub_name), Some(dst)) = (
                        sub.file_name(),
                        fsops::companion_destination(sub, old_stem, &folder, &new_dir),
                    ) {
                        subtitles.push(RenameOp::new(new_dir.join(sub_name), dst));
                    }
                }
            }
        }
    } else {
        let new_name = naming::movie_filename(title, year, &item.extension);
        ops.push(RenameOp::new(item.path.clone(), new_dir.join(new_name)));

        if let Some(old_stem) = item.path.file_stem().and_then(|s| s.to_str()) {
            for sub in fsops::subtitle_companions(&item.path) {
                if let Some(dst) = fsops::companion_destination(&sub, old_stem, &folder, &new_dir) {
                    subtitles.push(RenameOp::new(sub, dst));
                }
            }
        }
    }

    Plan { ops, subtitles }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Mutex;

    use renamarr_core::MediaType;
    use renamarr_metadata::{EpisodeDetails, MetadataBackend, Source};
    use renamarr_scanner::{group_by_parent, scan_dir};

    struct StubBackend {
        movie_hits: Vec<SearchHit>,
        series_hits: Vec<SearchHit>,
        movie: MovieDetails,
        series: SeriesDetails,
        episode_names: HashMap<(u32, u32), String>,
    }

    impl Default for StubBackend {
        fn default() -> Self {
            Self {
                movie_hits: Vec::new(),
                series_hits: Vec::new(),
                movie: MovieDetails::default(),
                series: SeriesDetails::default(),
                episode_names: HashMap::new(),
            }
        }
    }

    #[async_trait::async_trait]
    impl MetadataBackend for StubBackend {
        fn source(&self) -> Source {
            Source::Tmdb
        }

        async fn search_movies(
            &self,
            _query: &str,
            _year: Option<u16>,
        ) -> Result<Vec<SearchHit>, MetadataError> {
            Ok(self.movie_hits.clone())
        }

        async fn search_series(&self, _query: &str) -> Result<Vec<SearchHit>, MetadataError> {
            Ok(self.series_hits.clone())
        }

        async fn get_movie(&self, _id: &str) -> Result<MovieDetails, MetadataError> {
            Ok(self.movie.clone())
        }

        async fn get_series(&self, _id: &str) -> Result<SeriesDetails, MetadataError> {
            Ok(self.series.clone())
        }

        async fn get_episode(
            &self,
            _series_id: &str,
            season: u32,
            episode: u32,
        ) -> Result<EpisodeDetails, MetadataError> {
            match self.episode_names.get(&(season, episode)) {
                Some(name) => Ok(EpisodeDetails {
                    season,
                    episode,
                    name: name.clone(),
                    ..Default::default()
                }),
                None => Err(MetadataError::NotFound),
            }
        }
    }

    #[derive(Default)]
    struct ScriptedUi {
        selection: Option<Selection>,
        confirm: bool,
        reports: Mutex<Vec<String>>,
        presented: Mutex<usize>,
    }

    impl Interaction for ScriptedUi {
        fn select_movie(&self, _item: &str, choices: &[MovieChoice]) -> std::io::Result<Selection> {
            *self.presented.lock().unwrap() = choices.len();
            Ok(self.selection.unwrap_or(Selection::Pick(0)))
        }

        fn select_series(
            &self,
            _item: &str,
            choices: &[SeriesChoice],
        ) -> std::io::Result<Selection> {
            *self.presented.lock().unwrap() = choices.len();
            Ok(self.selection.unwrap_or(Selection::Pick(0)))
        }

        fn confirm(&self, _prompt: &str) -> std::io::Result<bool> {
            Ok(self.confirm)
        }

        fn report(&self, _level: ReportLevel, message: &str) {
            self.reports.lock().unwrap().push(message.to_string());
        }
    }

    fn movie_hit(id: &str, year: &str) -> SearchHit {
        SearchHit {
            id: id.into(),
            title: format!("title-{id}"),
            year: year.into(),
            media_type: MediaType::Movie,
            source: Source::Tmdb,
            score: 1.0,
        }
    }

    fn series_hit(id: &str) -> SearchHit {
        SearchHit {
            id: id.into(),
            title: format!("title-{id}"),
            year: "2008".into(),
            media_type: MediaType::Series,
            source: Source::Tmdb,
            score: 1.0,
        }
    }

    fn inception_backend() -> StubBackend {
        StubBackend {
            movie_hits: vec![movie_hit("27205", "2010")],
            movie: MovieDetails {
                id: "27205".into(),
                title: "Inception".into(),
                year: "2010".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn breaking_bad_backend() -> StubBackend {
        let mut episode_names = HashMap::new();
        episode_names.insert((1, 1), "Pilot".to_string());
        episode_names.insert((1, 2), "Cat's in the Bag...".to_string());
        StubBackend {
            series_hits: vec![series_hit("1396")],
            series: SeriesDetails {
                id: "1396".into(),
                name: "Breaking Bad".into(),
                year: "2008".into(),
                ..Default::default()
            },
            episode_names,
            ..Default::default()
        }
    }

    fn manager(backend: StubBackend) -> Manager {
        Manager::from_backends(vec![Box::new(backend)]).unwrap()
    }

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[tokio::test]
    async fn auto_mode_moves_standalone_movie_into_new_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("Inception.2010.1080p.mkv");
        touch(&src);
        touch(&tmp.path().join("Inception.2010.1080p.en.srt"));

        let manager = manager(inception_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        let outcome = orchestrator.process_movie(&item).await.unwrap();

        assert_eq!(outcome, Outcome::Renamed);
        let dir = tmp.path().join("Inception (2010)");
        assert!(dir.join("Inception (2010).mkv").exists());
        assert!(dir.join("Inception (2010).en.srt").exists());
        assert!(!src.exists());
    }

    #[tokio::test]
    async fn dry_run_reports_the_plan_and_changes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("Inception.2010.mkv");
        touch(&src);

        let manager = manager(inception_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            dry_run: true,
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        let outcome = orchestrator.process_movie(&item).await.unwrap();

        assert_eq!(outcome, Outcome::Renamed);
        assert!(src.exists());
        assert!(!tmp.path().join("Inception (2010)").exists());
        let reports = ui.reports.lock().unwrap();
        assert!(reports.iter().any(|r| r.contains("Inception (2010).mkv")));
    }

    #[tokio::test]
    async fn existing_destination_fails_the_item() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("Inception.2010.mkv");
        touch(&src);
        let dst_dir = tmp.path().join("Inception (2010)");
        fs::create_dir(&dst_dir).unwrap();
        touch(&dst_dir.join("Inception (2010).mkv"));

        let manager = manager(inception_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        let err = orchestrator.process_movie(&item).await.unwrap_err();

        assert!(matches!(
            err,
            ProcessError::Rename(RenameError::DestinationExists(_))
        ));
        assert!(src.exists());
    }

    #[tokio::test]
    async fn movie_goes_into_configured_output_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("library");
        let src = tmp.path().join("Inception.2010.mkv");
        touch(&src);

        let manager = manager(inception_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            movies_out_dir: Some(out.clone()),
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        orchestrator.process_movie(&item).await.unwrap();

        assert!(out.join("Inception (2010)/Inception (2010).mkv").exists());
    }

    #[tokio::test]
    async fn series_batch_renames_folder_then_episodes() {
        let tmp = tempfile::tempdir().unwrap();
        let show = tmp.path().join("Breaking.Bad.Complete");
        fs::create_dir(&show).unwrap();
        touch(&show.join("Breaking.Bad.S01E01.720p.mkv"));
        touch(&show.join("Breaking.Bad.S01E02.720p.mkv"));

        let manager = manager(breaking_bad_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            series_dir: Some(tmp.path().to_path_buf()),
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let batches = group_by_parent(scan_dir(tmp.path()));
        assert_eq!(batches.len(), 1);
        let outcome = orchestrator.process_series_batch(&batches[0]).await.unwrap();

        assert_eq!(outcome, Outcome::Renamed);
        let new_dir = tmp.path().join("Breaking Bad (2008)");
        assert!(new_dir.join("Breaking Bad S01E01 - Pilot.mkv").exists());
        assert!(
            new_dir
                .join("Breaking Bad S01E02 - Cat's in the Bag.mkv")
                .exists()
        );
        assert!(!show.exists());
    }

    #[tokio::test]
    async fn loose_episodes_in_a_scan_root_rename_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        let movies = tmp.path().join("movies");
        fs::create_dir(&movies).unwrap();
        touch(&movies.join("Breaking.Bad.S01E01.mkv"));
        touch(&movies.join("Breaking.Bad.S01E02.mkv"));

        let manager = manager(breaking_bad_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            movies_dir: Some(movies.clone()),
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let batches = group_by_parent(scan_dir(&movies));
        assert_eq!(batches.len(), 1);
        let outcome = orchestrator.process_series_batch(&batches[0]).await.unwrap();

        assert_eq!(outcome, Outcome::Renamed);
        // The configured input directory must survive the batch.
        assert!(movies.exists());
        assert!(movies.join("Breaking Bad S01E01 - Pilot.mkv").exists());
        assert!(
            movies
                .join("Breaking Bad S01E02 - Cat's in the Bag.mkv")
                .exists()
        );
    }

    #[tokio::test]
    async fn interactive_mode_presents_every_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("Inception.2010.mkv");
        touch(&src);

        let mut backend = inception_backend();
        backend.movie_hits = (0..12)
            .map(|i| movie_hit(&format!("m{i}"), "2010"))
            .collect();

        let manager = manager(backend);
        let ui = ScriptedUi {
            selection: Some(Selection::Pick(11)),
            confirm: true,
            ..Default::default()
        };
        let config = RunConfig::default();
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        let outcome = orchestrator.process_movie(&item).await.unwrap();

        assert_eq!(outcome, Outcome::Renamed);
        assert_eq!(*ui.presented.lock().unwrap(), 12);
    }

    #[tokio::test]
    async fn one_unresolved_episode_refuses_the_whole_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let show = tmp.path().join("Breaking Bad");
        fs::create_dir(&show).unwrap();
        touch(&show.join("Breaking.Bad.S01E01.mkv"));
        touch(&show.join("Breaking.Bad.S01E07.mkv"));

        let manager = manager(breaking_bad_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let batches = group_by_parent(scan_dir(tmp.path()));
        let err = orchestrator
            .process_series_batch(&batches[0])
            .await
            .unwrap_err();

        match err {
            ProcessError::PartialBatch { missing } => assert_eq!(missing, vec![(1, 7)]),
            other => panic!("unexpected error: {other}"),
        }
        // Nothing moved, including the episode that did resolve.
        assert!(show.join("Breaking.Bad.S01E01.mkv").exists());
    }

    #[tokio::test]
    async fn interactive_skip_leaves_the_item_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("Inception.2010.mkv");
        touch(&src);

        let manager = manager(inception_backend());
        let ui = ScriptedUi {
            selection: Some(Selection::Skip),
            ..Default::default()
        };
        let config = RunConfig::default();
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        let outcome = orchestrator.process_movie(&item).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert!(src.exists());
    }

    #[tokio::test]
    async fn declined_confirmation_skips_the_item() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("Inception.2010.mkv");
        touch(&src);

        let manager = manager(inception_backend());
        let ui = ScriptedUi {
            confirm: false,
            ..Default::default()
        };
        let config = RunConfig::default();
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        let outcome = orchestrator.process_movie(&item).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert!(src.exists());
    }

    #[tokio::test]
    async fn no_search_results_skips_the_item() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("Obscure.Film.2019.mkv");
        touch(&src);

        let manager = manager(StubBackend::default());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = parser::classify_file(&src).unwrap();
        let outcome = orchestrator.process_movie(&item).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert!(src.exists());
    }

    #[tokio::test]
    async fn movie_folder_moves_as_a_unit_with_video_normalized_inside() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("Inception.2010.1080p");
        fs::create_dir(&dir).unwrap();
        touch(&dir.join("inception.2010.mkv"));
        touch(&dir.join("inception.2010.srt"));

        let manager = manager(inception_backend());
        let ui = ScriptedUi::default();
        let config = RunConfig {
            auto: true,
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(&manager, &ui, &config);

        let item = renamarr_scanner::walk::classify_movie_folder(&dir).unwrap();
        let outcome = orchestrator.process_movie(&item).await.unwrap();

        assert_eq!(outcome, Outcome::Renamed);
        let new_dir = tmp.path().join("Inception (2010)");
        assert!(new_dir.join("Inception (2010).mkv").exists());
        assert!(new_dir.join("Inception (2010).srt").exists());
        assert!(!dir.exists());
    }
}
