use bevy::asset::{LoadState, UntypedAssetId};
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use crate::config::PageConfig;

/// Handles for everything the page needs before the landing scene shows.
#[derive(Resource, Clone)]
pub struct PageAssets {
    pub wordmark: Handle<Scene>,
    pub spectre: Handle<Scene>,
    pub skyline: Handle<Image>,
    pub city_backdrop: Handle<Image>,
    pub tracker: Handle<Image>,
}

impl PageAssets {
    pub fn load(asset_server: &AssetServer, config: &PageConfig) -> Self {
        let paths = &config.assets;
        Self {
            wordmark: asset_server.load(GltfAssetLabel::Scene(0).from_asset(paths.wordmark.clone())),
            spectre: asset_server.load(GltfAssetLabel::Scene(0).from_asset(paths.spectre.clone())),
            skyline: asset_server.load(paths.skyline.clone()),
            city_backdrop: asset_server.load(paths.city_backdrop.clone()),
            tracker: asset_server.load(paths.tracker.clone()),
        }
    }

    /// Labels shown on the loading screen, in load order.
    pub fn tracked(&self) -> [(&'static str, UntypedAssetId); 5] {
        [
            ("wordmark", self.wordmark.id().untyped()),
            ("spectre", self.spectre.id().untyped()),
            ("skyline", self.skyline.id().untyped()),
            ("city backdrop", self.city_backdrop.id().untyped()),
            ("tracker", self.tracker.id().untyped()),
        ]
    }
}

/// Cumulative load completion, never decreasing.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct LoadProgress {
    percent: f32,
    pub item: String,
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }

    pub fn report(&mut self, loaded: usize, total: usize, item: impl Into<String>) {
        let percent = if total == 0 {
            100.0
        } else {
            loaded as f32 / total as f32 * 100.0
        };
        self.percent = self.percent.max(percent.clamp(0.0, 100.0));
        self.loaded = self.loaded.max(loaded.min(total));
        self.total = total;
        self.item = item.into();
    }
}

pub fn load_page_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<PageConfig>,
) {
    let assets = PageAssets::load(&asset_server, &config);
    info!("loading {} page assets", assets.tracked().len());
    commands.insert_resource(assets);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

fn asset_status(asset_server: &AssetServer, id: UntypedAssetId) -> AssetStatus {
    if asset_server.is_loaded_with_dependencies(id) {
        return AssetStatus::Loaded;
    }
    match asset_server.get_load_state(id) {
        Some(LoadState::Failed(_)) => AssetStatus::Failed,
        _ => AssetStatus::Pending,
    }
}

/// Folds one poll of every tracked asset into `progress`. The item shown is
/// the first asset still outstanding. Returns the labels of assets that
/// failed since the last poll; `reported` remembers the ones already returned.
pub fn tally<Id: PartialEq + Copy>(
    progress: &mut LoadProgress,
    statuses: &[(&'static str, Id, AssetStatus)],
    reported: &mut Vec<Id>,
) -> Vec<&'static str> {
    if progress.is_complete() {
        return Vec::new();
    }

    let loaded = statuses
        .iter()
        .filter(|(_, _, status)| *status == AssetStatus::Loaded)
        .count();
    let pending = statuses
        .iter()
        .find(|(_, _, status)| *status != AssetStatus::Loaded)
        .map(|(label, _, _)| *label);
    progress.report(loaded, statuses.len(), pending.unwrap_or_default());

    let mut failed = Vec::new();
    for (label, id, status) in statuses {
        if *status == AssetStatus::Failed && !reported.contains(id) {
            reported.push(*id);
            failed.push(*label);
        }
    }
    failed
}

pub fn track_asset_progress(
    asset_server: Res<AssetServer>,
    assets: Option<Res<PageAssets>>,
    mut progress: ResMut<LoadProgress>,
    mut reported_failures: Local<Vec<UntypedAssetId>>,
) {
    let Some(assets) = assets else {
        return;
    };
    if progress.is_complete() {
        return;
    }

    let statuses = assets
        .tracked()
        .map(|(label, id)| (label, id, asset_status(&asset_server, id)));
    for label in tally(&mut progress, &statuses, &mut *reported_failures) {
        warn!("asset {label} failed to load, loading screen will not finish");
    }
    if progress.is_complete() {
        info!("all {} page assets loaded", statuses.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_computes_percentage() {
        let mut progress = LoadProgress::default();
        progress.report(2, 5, "spectre");
        assert_eq!(progress.percent(), 40.0);
        assert_eq!(progress.item, "spectre");
        assert!(!progress.is_complete());

        progress.report(5, 5, "");
        assert_eq!(progress.percent(), 100.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn report_never_decreases() {
        let mut progress = LoadProgress::default();
        progress.report(3, 4, "tracker");
        progress.report(1, 4, "wordmark");
        assert_eq!(progress.percent(), 75.0);
        assert_eq!(progress.loaded, 3);
    }

    #[test]
    fn report_stays_in_bounds() {
        let mut progress = LoadProgress::default();
        progress.report(9, 4, "");
        assert_eq!(progress.percent(), 100.0);
        assert_eq!(progress.loaded, 4);
    }

    #[test]
    fn nothing_to_load_is_complete() {
        let mut progress = LoadProgress::default();
        progress.report(0, 0, "");
        assert!(progress.is_complete());
    }

    #[test]
    fn tally_shows_first_outstanding_asset() {
        use AssetStatus::*;
        let mut progress = LoadProgress::default();
        let mut reported = Vec::new();
        let failed = tally(
            &mut progress,
            &[
                ("wordmark", 0, Loaded),
                ("spectre", 1, Pending),
                ("skyline", 2, Loaded),
                ("tracker", 3, Pending),
            ],
            &mut reported,
        );
        assert!(failed.is_empty());
        assert_eq!(progress.percent(), 50.0);
        assert_eq!(progress.item, "spectre");
    }

    #[test]
    fn tally_reports_each_failure_once() {
        use AssetStatus::*;
        let mut progress = LoadProgress::default();
        let mut reported = Vec::new();
        let statuses = [
            ("wordmark", 0, Loaded),
            ("spectre", 1, Failed),
            ("tracker", 2, Pending),
        ];

        assert_eq!(tally(&mut progress, &statuses, &mut reported), vec!["spectre"]);
        assert!(tally(&mut progress, &statuses, &mut reported).is_empty());

        let statuses = [
            ("wordmark", 0, Loaded),
            ("spectre", 1, Failed),
            ("tracker", 2, Failed),
        ];
        assert_eq!(tally(&mut progress, &statuses, &mut reported), vec!["tracker"]);
        assert!(!progress.is_complete());
        assert_eq!(progress.item, "spectre");
    }

    #[test]
    fn tally_stops_once_complete() {
        use AssetStatus::*;
        let mut progress = LoadProgress::default();
        let mut reported = Vec::new();
        let statuses = [("wordmark", 0, Loaded), ("spectre", 1, Loaded)];
        tally(&mut progress, &statuses, &mut reported);
        assert!(progress.is_complete());
        assert_eq!(progress.item, "");

        let statuses = [("wordmark", 0, Failed), ("spectre", 1, Pending)];
        let failed = tally(&mut progress, &statuses, &mut reported);
        assert!(failed.is_empty());
        assert!(reported.is_empty());
        assert_eq!(progress.percent(), 100.0);
        assert_eq!(progress.item, "");
    }
}
