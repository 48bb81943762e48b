use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::asset_paths::template::expand_pattern;
use crate::asset_paths::variants::{generate_variants, strip_product_prefix};
use crate::config::PackageConfig;
use crate::models::{CandidateTriple, Country, VehicleClass, VehicleRecord};
use crate::style::AssetStyle;

/// Read-only inputs shared by every cascade built during one render batch.
#[derive(Debug, Clone, Copy)]
pub struct CascadeContext<'a> {
    /// Package templates and install-relative paths.
    pub config: &'a PackageConfig,
    /// Game installation directory.
    pub install_root: &'a Path,
    /// Directory the application runs from; custom files are looked up here first.
    pub app_root: &'a Path,
}

/// Builds the ordered candidate list for one style.
pub trait CandidateStrategy {
    /// Produce the candidates in probe order. An empty list is valid.
    fn build(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> Vec<CandidateTriple>;

    /// Whether a miss for this vehicle deserves a warning at all.
    ///
    /// Vehicles without a nation, or file styles with a blank file name, have nothing to
    /// look for and are skipped silently.
    fn is_applicable(&self, _vehicle: &VehicleRecord) -> bool {
        true
    }

    /// Human-readable description used in missing-asset warnings.
    fn describe(&self, vehicle: &VehicleRecord) -> String;

    /// Everything a resolution needs from the strategy, computed together.
    fn plan(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> CascadePlan {
        let candidates = self
            .is_applicable(vehicle)
            .then(|| self.build(vehicle, context));
        CascadePlan {
            description: self.describe(vehicle),
            candidates,
        }
    }
}

/// Candidates and warning text for one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    /// Human-readable description used in missing-asset warnings.
    pub description: String,
    /// Candidates in probe order, or `None` when there is nothing to look for.
    pub candidates: Option<Vec<CandidateTriple>>,
}

/// Select the strategy that builds candidates for `style`.
pub fn strategy_for(style: &AssetStyle) -> Box<dyn CandidateStrategy + '_> {
    match style {
        AssetStyle::Contour | AssetStyle::ThreeD | AssetStyle::ThreeDLarge => {
            Box::new(PackageArtwork {
                style,
                variant_search: false,
            })
        }
        AssetStyle::ThreeDv2 | AssetStyle::ThreeDLargev2 => Box::new(PackageArtwork {
            style,
            variant_search: true,
        }),
        AssetStyle::Country => Box::new(NationFlag),
        AssetStyle::Class => Box::new(ClassBadge),
        AssetStyle::Current => Box::new(CurrentIcon),
        AssetStyle::Custom { file } => Box::new(FileChain {
            style,
            source: FileSource::Fixed(file),
        }),
        AssetStyle::Pattern { pattern } => Box::new(FileChain {
            style,
            source: FileSource::Pattern(pattern),
        }),
    }
}

/// Build the ordered candidate list for `style`.
///
/// Package order is the outer loop and separator variants the inner loop. Identical paths
/// are emitted once, so a failed location is never probed twice in one resolution.
pub fn build_candidates(
    style: &AssetStyle,
    vehicle: &VehicleRecord,
    context: &CascadeContext<'_>,
) -> Vec<CandidateTriple> {
    strategy_for(style).build(vehicle, context)
}

struct PackageArtwork<'s> {
    style: &'s AssetStyle,
    variant_search: bool,
}

impl CandidateStrategy for PackageArtwork<'_> {
    fn build(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> Vec<CandidateTriple> {
        let mut cascade = Cascade::default();
        let Some(template) = context.config.style_template(self.style) else {
            return cascade.finish();
        };
        let extension = &context.config.tank_icon_extension;

        if self.variant_search {
            let base = strip_product_prefix(vehicle.image_base_name());
            let variants = generate_variants(base);
            for folder in package_folders(context.config, template) {
                for variant in &variants {
                    cascade.push(
                        CandidateTriple::new(context.install_root, folder.clone(), format!("{variant}{extension}"))
                            .with_variant(variant.clone()),
                    );
                }
            }
        } else {
            let filename = format!("{}{extension}", vehicle.image_base_name());
            for folder in package_folders(context.config, template) {
                cascade.push(CandidateTriple::new(context.install_root, folder, filename.clone()));
            }
        }

        cascade.finish()
    }

    fn describe(&self, _vehicle: &VehicleRecord) -> String {
        self.style.to_string()
    }
}

struct NationFlag;

impl CandidateStrategy for NationFlag {
    fn build(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> Vec<CandidateTriple> {
        if vehicle.country == Country::None {
            return Vec::new();
        }
        badge_candidates(context.config.path_source_country.get(&vehicle.country), context)
    }

    fn is_applicable(&self, vehicle: &VehicleRecord) -> bool {
        vehicle.country != Country::None
    }

    fn describe(&self, _vehicle: &VehicleRecord) -> String {
        AssetStyle::Country.to_string()
    }
}

struct ClassBadge;

impl CandidateStrategy for ClassBadge {
    fn build(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> Vec<CandidateTriple> {
        if vehicle.class == VehicleClass::None {
            return Vec::new();
        }
        badge_candidates(context.config.path_source_class.get(&vehicle.class), context)
    }

    fn is_applicable(&self, vehicle: &VehicleRecord) -> bool {
        vehicle.class != VehicleClass::None
    }

    fn describe(&self, _vehicle: &VehicleRecord) -> String {
        AssetStyle::Class.to_string()
    }
}

/// The map entry is a whole file path, so the template lands in the subfolder slot and the
/// file name stays empty.
fn badge_candidates(template: Option<&String>, context: &CascadeContext<'_>) -> Vec<CandidateTriple> {
    let mut cascade = Cascade::default();
    if let Some(template) = template {
        for path in package_folders(context.config, template) {
            cascade.push(CandidateTriple::new(context.install_root, path, ""));
        }
    }
    cascade.finish()
}

struct CurrentIcon;

impl CandidateStrategy for CurrentIcon {
    fn build(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> Vec<CandidateTriple> {
        let config = context.config;
        let filename = format!("{}{}", vehicle.id, config.tank_icon_extension);
        let mut cascade = Cascade::default();

        let destination = config.path_destination.trim();
        if !destination.is_empty() {
            cascade.push(CandidateTriple::new(context.install_root, destination, filename.clone()));
        }
        let contour = config.style_template(&AssetStyle::Contour).unwrap_or_default();
        for folder in package_folders(config, contour) {
            cascade.push(CandidateTriple::new(context.install_root, folder, filename.clone()));
        }

        cascade.finish()
    }

    fn describe(&self, _vehicle: &VehicleRecord) -> String {
        AssetStyle::Current.to_string()
    }
}

enum FileSource<'s> {
    Fixed(&'s str),
    Pattern(&'s str),
}

struct FileChain<'s> {
    style: &'s AssetStyle,
    source: FileSource<'s>,
}

impl FileChain<'_> {
    fn filename(&self, vehicle: &VehicleRecord) -> String {
        match self.source {
            FileSource::Fixed(file) => file.to_string(),
            FileSource::Pattern(pattern) => expand_pattern(pattern, vehicle),
        }
    }

    fn description(&self, filename: &str) -> String {
        match self.source {
            FileSource::Fixed(_) => self.style.to_string(),
            FileSource::Pattern(_) => format!("pattern image \"{filename}\""),
        }
    }

    /// App root, then the mods folder, then the installation root.
    fn chain(filename: String, context: &CascadeContext<'_>) -> Vec<CandidateTriple> {
        let mut cascade = Cascade::default();
        cascade.push(CandidateTriple::new(context.app_root, "", filename.clone()));
        cascade.push(CandidateTriple::new(
            context.install_root,
            context.config.path_mods.trim(),
            filename.clone(),
        ));
        cascade.push(CandidateTriple::new(context.install_root, "", filename));
        cascade.finish()
    }
}

impl CandidateStrategy for FileChain<'_> {
    fn build(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> Vec<CandidateTriple> {
        let filename = self.filename(vehicle);
        if filename.trim().is_empty() {
            return Vec::new();
        }
        Self::chain(filename, context)
    }

    fn is_applicable(&self, vehicle: &VehicleRecord) -> bool {
        !self.filename(vehicle).trim().is_empty()
    }

    fn describe(&self, vehicle: &VehicleRecord) -> String {
        self.description(&self.filename(vehicle))
    }

    fn plan(&self, vehicle: &VehicleRecord, context: &CascadeContext<'_>) -> CascadePlan {
        let filename = self.filename(vehicle);
        let description = self.description(&filename);
        let candidates = (!filename.trim().is_empty()).then(|| Self::chain(filename, context));
        CascadePlan {
            description,
            candidates,
        }
    }
}

/// Expand `template` once per active package, skipping packages that leave it blank.
fn package_folders<'c>(config: &'c PackageConfig, template: &'c str) -> impl Iterator<Item = String> + 'c {
    config
        .gui_package_names
        .iter()
        .filter_map(move |package| PackageConfig::expand_for_package(template, package))
}

#[derive(Default)]
struct Cascade {
    seen: HashSet<PathBuf>,
    result: Vec<CandidateTriple>,
}

impl Cascade {
    fn push(&mut self, candidate: CandidateTriple) {
        if self.seen.insert(candidate.path()) {
            self.result.push(candidate);
        }
    }

    fn finish(self) -> Vec<CandidateTriple> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config() -> PackageConfig {
        let mut config = PackageConfig::default();
        config.gui_package_names = vec!["pkg0".into(), "pkg1".into()];
        config.path_source_contour = "res/\"GuiPackage\"/contour".into();
        config.path_source_3d = "res/\"GuiPackage\"/3d".into();
        config.path_source_country = BTreeMap::from([(
            Country::Ussr,
            String::from("res/\"GuiPackage\"/flags/ussr.png"),
        )]);
        config.path_source_class.clear();
        config.path_destination = "res_mods/contour".into();
        config.path_mods = "res_mods".into();
        config
    }

    fn context(config: &PackageConfig) -> CascadeContext<'_> {
        CascadeContext {
            config,
            install_root: Path::new("/game"),
            app_root: Path::new("/app"),
        }
    }

    fn paths(candidates: &[CandidateTriple]) -> Vec<String> {
        candidates
            .iter()
            .map(|candidate| candidate.path().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn vehicle() -> VehicleRecord {
        let mut vehicle = VehicleRecord::new("ussr-T-34");
        vehicle.image_name = Some("ussr-T_34".into());
        vehicle.country = Country::Ussr;
        vehicle.class = VehicleClass::Medium;
        vehicle
    }

    #[test]
    fn contour_emits_one_candidate_per_package() {
        let config = config();
        let candidates = build_candidates(&AssetStyle::Contour, &vehicle(), &context(&config));
        assert_eq!(paths(&candidates), vec![
            "/game/res/pkg0/contour/ussr-T_34.png",
            "/game/res/pkg1/contour/ussr-T_34.png",
        ]);
        assert!(candidates.iter().all(|candidate| candidate.variant.is_none()));
    }

    #[test]
    fn contour_uses_id_when_image_name_is_missing() {
        let config = config();
        let mut vehicle = vehicle();
        vehicle.image_name = None;
        let candidates = build_candidates(&AssetStyle::Contour, &vehicle, &context(&config));
        assert_eq!(candidates[0].filename, "ussr-T-34.png");
    }

    #[test]
    fn v2_styles_loop_packages_outside_variants() {
        let config = config();
        let candidates = build_candidates(&AssetStyle::ThreeDv2, &vehicle(), &context(&config));
        assert_eq!(paths(&candidates), vec![
            "/game/res/pkg0/3d/t_34.png",
            "/game/res/pkg0/3d/t-34.png",
            "/game/res/pkg1/3d/t_34.png",
            "/game/res/pkg1/3d/t-34.png",
        ]);
        assert_eq!(candidates[1].variant.as_deref(), Some("t-34"));
    }

    #[test]
    fn skips_packages_that_expand_to_blank_folders() {
        let mut config = config();
        config.path_source_3d_large = "\"GuiPackage\"".into();
        config.gui_package_names = vec![" ".into(), "large".into()];
        let candidates = build_candidates(&AssetStyle::ThreeDLarge, &vehicle(), &context(&config));
        assert_eq!(paths(&candidates), vec!["/game/large/ussr-T_34.png"]);
    }

    #[test]
    fn country_cascade_is_empty_without_a_nation() {
        let config = config();
        let mut vehicle = vehicle();
        vehicle.country = Country::None;
        let strategy = strategy_for(&AssetStyle::Country);
        assert!(strategy.build(&vehicle, &context(&config)).is_empty());
        assert!(!strategy.is_applicable(&vehicle));
    }

    #[test]
    fn country_cascade_uses_the_nation_map() {
        let config = config();
        let candidates = build_candidates(&AssetStyle::Country, &vehicle(), &context(&config));
        assert_eq!(paths(&candidates), vec![
            "/game/res/pkg0/flags/ussr.png",
            "/game/res/pkg1/flags/ussr.png",
        ]);
    }

    #[test]
    fn class_cascade_is_empty_without_a_map_entry() {
        let config = config();
        let strategy = strategy_for(&AssetStyle::Class);
        assert!(strategy.build(&vehicle(), &context(&config)).is_empty());
        assert!(strategy.is_applicable(&vehicle()));
    }

    #[test]
    fn current_tries_destination_before_contour_sources() {
        let config = config();
        let candidates = build_candidates(&AssetStyle::Current, &vehicle(), &context(&config));
        assert_eq!(paths(&candidates), vec![
            "/game/res_mods/contour/ussr-T-34.png",
            "/game/res/pkg0/contour/ussr-T-34.png",
            "/game/res/pkg1/contour/ussr-T-34.png",
        ]);
    }

    #[test]
    fn custom_files_search_app_mods_then_install_roots() {
        let config = config();
        let style = AssetStyle::Custom {
            file: "Images/flag.png".into(),
        };
        let candidates = build_candidates(&style, &vehicle(), &context(&config));
        assert_eq!(paths(&candidates), vec![
            "/app/Images/flag.png",
            "/game/res_mods/Images/flag.png",
            "/game/Images/flag.png",
        ]);
    }

    #[test]
    fn pattern_files_expand_before_searching() {
        let config = config();
        let style = AssetStyle::Pattern {
            pattern: "icons/{country}-{class}.png".into(),
        };
        let strategy = strategy_for(&style);
        let candidates = strategy.build(&vehicle(), &context(&config));
        assert_eq!(paths(&candidates)[0], "/app/icons/ussr-medium.png");
        assert_eq!(candidates.len(), 3);
        assert_eq!(strategy.describe(&vehicle()), "pattern image \"icons/ussr-medium.png\"");
    }

    #[test]
    fn absolute_custom_files_are_probed_as_given() {
        let config = config();
        let style = AssetStyle::Custom {
            file: "/home/me/icons/flag.png".into(),
        };
        let candidates = build_candidates(&style, &vehicle(), &context(&config));
        assert_eq!(paths(&candidates), vec!["/home/me/icons/flag.png"]);
    }

    #[test]
    fn plans_match_the_individual_strategy_calls() {
        let config = config();
        let context = context(&config);
        let styles = [
            AssetStyle::Pattern {
                pattern: "icons/{country}-{NameShort}.png".into(),
            },
            AssetStyle::Custom {
                file: "Images/flag.png".into(),
            },
            AssetStyle::Pattern {
                pattern: "{missing}".into(),
            },
            AssetStyle::Country,
        ];

        for style in &styles {
            let strategy = strategy_for(style);
            let plan = strategy.plan(&vehicle(), &context);
            assert_eq!(plan.description, strategy.describe(&vehicle()));
            let expected = strategy
                .is_applicable(&vehicle())
                .then(|| strategy.build(&vehicle(), &context));
            assert_eq!(plan.candidates, expected);
        }

        let custom = strategy_for(&styles[1]).plan(&vehicle(), &context);
        assert_eq!(custom.description, "custom image \"Images/flag.png\"");
        assert_eq!(strategy_for(&styles[2]).plan(&vehicle(), &context).candidates, None);
    }

    #[test]
    fn blank_file_names_produce_no_candidates() {
        let config = config();
        let style = AssetStyle::Custom { file: "  ".into() };
        let strategy = strategy_for(&style);
        assert!(strategy.build(&vehicle(), &context(&config)).is_empty());
        assert!(!strategy.is_applicable(&vehicle()));

        let style = AssetStyle::Pattern {
            pattern: "{missing}".into(),
        };
        assert!(build_candidates(&style, &vehicle(), &context(&config)).is_empty());
    }

    #[test]
    fn deduplicates_identical_locations() {
        let mut config = config();
        config.path_source_contour = "contour".into();
        let candidates = build_candidates(&AssetStyle::Contour, &vehicle(), &context(&config));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn building_twice_yields_identical_cascades() {
        let config = config();
        let context = context(&config);
        for style in [AssetStyle::Contour, AssetStyle::ThreeDLargev2, AssetStyle::Current] {
            assert_eq!(
                build_candidates(&style, &vehicle(), &context),
                build_candidates(&style, &vehicle(), &context)
            );
        }
    }
}
