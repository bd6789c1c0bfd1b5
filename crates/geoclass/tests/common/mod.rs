// Common test utilities for integration tests
//
// Builds a small but realistic map style registry and helpers to turn
// string pairs into tag maps.

#![allow(dead_code)]

use geoclass::condition::{Condition, Operator};
use geoclass::feature::FeatureKind;
use geoclass::registry::{GeometryKinds, TagMap, TypeConfig, TypeInfo};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static SCRATCH_ID: AtomicUsize = AtomicUsize::new(0);

/// Tags the fixture registers on top of the built-in ones.
pub const STYLE_TAGS: &[&str] = &["highway", "building", "amenity", "boundary", "route"];

/// Features every road type carries.
pub const ROAD_FEATURES: &[FeatureKind] = &[
    FeatureKind::Name,
    FeatureKind::Ref,
    FeatureKind::Access,
    FeatureKind::MaxSpeed,
    FeatureKind::Width,
    FeatureKind::Layer,
    FeatureKind::Grade,
    FeatureKind::Bridge,
    FeatureKind::Tunnel,
    FeatureKind::Roundabout,
];

fn add(config: &mut TypeConfig, info: TypeInfo) {
    config.add_type(info).expect("Failed to add fixture type");
}

fn with_features(info: &mut TypeInfo, features: &[FeatureKind]) {
    for &kind in features {
        info.add_feature(kind).expect("Duplicate fixture feature");
    }
}

/// Registers the style tags, name tables and surface grades.
pub fn register_style_tags(config: &mut TypeConfig) {
    for name in STYLE_TAGS {
        config.register_tag_for_external_use(name);
    }

    config.register_name_tag("name", 10);
    config.register_name_tag("loc_name", 5);
    config.register_name_tag("short_name", 1);
    config.register_name_alt_tag("alt_name", 2);
    config.register_name_alt_tag("name:en", 1);

    for (surface, grade) in [("asphalt", 1), ("paved", 1), ("gravel", 3), ("ground", 4), ("grass", 5)] {
        config.register_surface_grade(surface, grade);
    }
}

/// A registry resembling a small map style.
///
/// Types, in registration order:
/// `highway_motorway`, `highway_residential`, `highway_pedestrian`,
/// `area_pedestrian`, `highway_track`, `building`, `amenity_cafe`,
/// `boundary_administrative`, `natural_water`, `route_bus`.
pub fn style_config() -> TypeConfig {
    let mut config = TypeConfig::new();
    register_style_tags(&mut config);

    let highway = config.tag_id("highway");
    let building = config.tag_id("building");
    let amenity = config.tag_id("amenity");
    let boundary = config.tag_id("boundary");
    let admin_level = config.tag_admin_level();
    let natural = config.tag_id("natural");
    let area = config.tag_id("area");
    let route = config.tag_id("route");
    let tag_type = config.tag_type();

    let mut info = TypeInfo::new("highway_motorway");
    info.set_can_route_car(true)
        .set_optimize_low_zoom(true)
        .add_condition(
            GeometryKinds::WAY,
            Condition::compare(highway, Operator::Eq, "motorway"),
        );
    with_features(&mut info, ROAD_FEATURES);
    add(&mut config, info);

    let mut info = TypeInfo::new("highway_residential");
    info.set_can_route_foot(true)
        .set_can_route_bicycle(true)
        .set_can_route_car(true)
        .set_index_as_location(true)
        .add_condition(
            GeometryKinds::WAY,
            Condition::compare(highway, Operator::Eq, "residential"),
        );
    with_features(&mut info, ROAD_FEATURES);
    add(&mut config, info);

    let mut info = TypeInfo::new("highway_pedestrian");
    info.set_can_route_foot(true).add_condition(
        GeometryKinds::WAY,
        Condition::compare(highway, Operator::Eq, "pedestrian"),
    );
    with_features(&mut info, &[FeatureKind::Name]);
    add(&mut config, info);

    let mut info = TypeInfo::new("area_pedestrian");
    info.set_can_route_foot(true).add_condition(
        GeometryKinds::AREA,
        Condition::and(vec![
            Condition::compare(highway, Operator::Eq, "pedestrian"),
            Condition::compare(area, Operator::Eq, "yes"),
        ]),
    );
    with_features(&mut info, &[FeatureKind::Name]);
    add(&mut config, info);

    let mut info = TypeInfo::new("highway_track");
    info.set_can_route_foot(true)
        .set_can_route_bicycle(true)
        .add_condition(
            GeometryKinds::WAY,
            Condition::compare(highway, Operator::Eq, "track"),
        );
    with_features(&mut info, &[FeatureKind::Grade, FeatureKind::Width]);
    add(&mut config, info);

    let mut info = TypeInfo::new("building");
    info.set_index_as_poi(true).add_condition(
        GeometryKinds::NODE | GeometryKinds::AREA,
        Condition::and(vec![
            Condition::exists(building),
            Condition::compare(building, Operator::Ne, "no"),
        ]),
    );
    with_features(&mut info, &[FeatureKind::Name]);
    add(&mut config, info);

    let mut info = TypeInfo::new("amenity_cafe");
    info.set_index_as_poi(true).add_condition(
        GeometryKinds::NODE | GeometryKinds::AREA,
        Condition::compare(amenity, Operator::Eq, "cafe"),
    );
    with_features(&mut info, &[FeatureKind::Name, FeatureKind::NameAlt]);
    add(&mut config, info);

    let mut info = TypeInfo::new("boundary_administrative");
    info.set_index_as_region(true)
        .set_multipolygon(true)
        .set_ignore_sea_land(true)
        .add_condition(
            GeometryKinds::AREA | GeometryKinds::RELATION,
            Condition::and(vec![
                Condition::compare(boundary, Operator::Eq, "administrative"),
                Condition::compare(admin_level, Operator::Le, 4u64),
            ]),
        );
    with_features(&mut info, &[FeatureKind::Name]);
    add(&mut config, info);

    let mut info = TypeInfo::new("natural_water");
    info.set_multipolygon(true).add_condition(
        GeometryKinds::AREA,
        Condition::one_of(natural, ["water", "lake"]),
    );
    with_features(&mut info, &[FeatureKind::Name]);
    add(&mut config, info);

    let mut info = TypeInfo::new("route_bus");
    info.set_ignore(true).add_condition(
        GeometryKinds::RELATION,
        Condition::and(vec![
            Condition::compare(tag_type, Operator::Eq, "route"),
            Condition::compare(route, Operator::Eq, "bus"),
        ]),
    );
    with_features(&mut info, &[FeatureKind::Name, FeatureKind::Ref]);
    add(&mut config, info);

    config
}

/// Builds a tag map from `(key, value)` pairs. Every key must be registered.
pub fn tags(config: &TypeConfig, pairs: &[(&str, &str)]) -> TagMap {
    pairs
        .iter()
        .map(|&(key, value)| {
            let id = config.tag_id(key);
            assert!(!id.is_ignore(), "tag '{key}' is not registered");
            (id, value.to_string())
        })
        .collect()
}

/// A fresh, empty scratch directory under the system temp dir.
pub fn scratch_dir(label: &str) -> PathBuf {
    let id = SCRATCH_ID.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "geoclass-{label}-{}-{id}",
        std::process::id()
    ));

    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}
