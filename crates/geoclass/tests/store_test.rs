//! Integration tests for the binary registry file.

mod common;

use common::{register_style_tags, scratch_dir, style_config, tags};
use geoclass::feature::FeatureKind;
use geoclass::registry::{GeometryKind, TypeConfig, TypeId, TypeInfo, TYPES_DATA_FILE};
use geoclass::Error;
use geoclass_io::{Scanner, Writer};

fn stored(config: &TypeConfig) -> Vec<u8> {
    let mut writer = Writer::new(Vec::new());
    config.store_to_binary(&mut writer).unwrap();
    writer.close().unwrap()
}

fn assert_same_registry(a: &TypeConfig, b: &TypeConfig) {
    assert_eq!(a.tags().len(), b.tags().len());
    for (x, y) in a.tags().iter().zip(b.tags().iter()) {
        assert_eq!(x, y);
        assert_eq!(a.name_tag_priority(x.id()), b.name_tag_priority(y.id()));
        assert_eq!(a.name_alt_tag_priority(x.id()), b.name_alt_tag_priority(y.id()));
    }

    assert_eq!(a.types().len(), b.types().len());
    for (x, y) in a.types().iter().zip(b.types()) {
        assert_eq!(x.id(), y.id());
        assert_eq!(x.name(), y.name());
        assert_eq!(x.can_be(), y.can_be());
        assert_eq!(x.route_modes(), y.route_modes());
        assert_eq!(x.index_kinds(), y.index_kinds());
        assert_eq!(x.behavior(), y.behavior());
        assert_eq!(x.features(), y.features());
        assert_eq!(x.value_buffer_size(), y.value_buffer_size());
    }
}

#[test]
fn test_round_trip_into_fresh_registry() {
    let config = style_config();
    let bytes = stored(&config);

    let mut loaded = TypeConfig::new();
    loaded.load_from_binary(&mut Scanner::new(bytes.as_slice())).unwrap();

    assert_same_registry(&config, &loaded);
    assert_eq!(stored(&loaded), bytes);
}

#[test]
fn test_loaded_types_carry_no_conditions() {
    let config = style_config();
    let bytes = stored(&config);

    let mut loaded = TypeConfig::new();
    loaded.load_from_binary(&mut Scanner::new(bytes.as_slice())).unwrap();

    let road = loaded.type_by_name("highway_residential").unwrap();
    assert!(!road.has_conditions());
    assert!(road.can_be_way());

    let sample = tags(&loaded, &[("highway", "residential")]);
    assert!(loaded.classify(&sample, GeometryKind::Way).id().is_ignore());
}

#[test]
fn test_reload_into_same_registry_is_identity() {
    let mut config = style_config();
    let bytes = stored(&config);

    config.load_from_binary(&mut Scanner::new(bytes.as_slice())).unwrap();

    assert_eq!(stored(&config), bytes);
    // conditions of existing types survive
    let sample = tags(&config, &[("highway", "residential")]);
    assert_eq!(config.classify(&sample, GeometryKind::Way).name(), "highway_residential");
}

#[test]
fn test_names_and_priorities_survive() {
    let config = style_config();
    let bytes = stored(&config);

    let mut loaded = TypeConfig::new();
    loaded.load_from_binary(&mut Scanner::new(bytes.as_slice())).unwrap();

    let loc_name = loaded.tag_id("loc_name");
    assert!(!loc_name.is_ignore());
    assert_eq!(loaded.name_tag_priority(loc_name), Some(5));
    assert_eq!(loaded.name_alt_tag_priority(loaded.tag_id("alt_name")), Some(2));
    assert_eq!(loaded.name_tag_priority(loaded.tag_id("highway")), None);
}

#[test]
fn test_type_gap_survives() {
    let mut config = TypeConfig::new();
    let mut info = TypeInfo::new("far_away");
    info.set_id(TypeId::new(40)).set_can_be_way(true);
    config.add_type(info).unwrap();
    let bytes = stored(&config);

    let mut loaded = TypeConfig::new();
    loaded.load_from_binary(&mut Scanner::new(bytes.as_slice())).unwrap();
    assert_eq!(loaded.type_id("far_away"), TypeId::new(40));
    assert_eq!(loaded.max_type_id(), TypeId::new(40));
}

#[test]
fn test_tag_id_mismatch_fails() {
    let config = style_config();
    let bytes = stored(&config);

    // same tags, different order
    let mut other = TypeConfig::new();
    other.register_tag_for_external_use("route");
    register_style_tags(&mut other);

    let err = other
        .load_from_binary(&mut Scanner::new(bytes.as_slice()))
        .unwrap_err();
    assert!(matches!(err, Error::TagIdMismatch { .. }), "{err}");
}

#[test]
fn test_type_id_mismatch_fails() {
    let config = style_config();
    let bytes = stored(&config);

    let mut other = TypeConfig::new();
    register_style_tags(&mut other);
    other.add_type(TypeInfo::new("intruder")).unwrap();
    let intruder = other.type_id("intruder");

    let err = other
        .load_from_binary(&mut Scanner::new(bytes.as_slice()))
        .unwrap_err();
    assert_eq!(
        err,
        Error::TypeIdMismatch {
            name: "highway_motorway".into(),
            requested: intruder.as_u32(),
            actual: intruder.as_u32() + 1,
        }
    );
}

#[test]
fn test_existing_type_with_other_id_fails() {
    let config = style_config();
    let bytes = stored(&config);

    let mut other = TypeConfig::new();
    register_style_tags(&mut other);
    other.add_type(TypeInfo::new("padding")).unwrap();
    other.add_type(TypeInfo::new("highway_motorway")).unwrap();

    let err = other
        .load_from_binary(&mut Scanner::new(bytes.as_slice()))
        .unwrap_err();
    assert!(
        matches!(err, Error::TypeIdMismatch { ref name, .. } if name == "highway_motorway"),
        "{err}"
    );
}

fn shop(features: &[FeatureKind]) -> TypeConfig {
    let mut config = TypeConfig::new();
    let mut info = TypeInfo::new("shop");
    info.set_can_be_node(true);
    for &kind in features {
        info.add_feature(kind).unwrap();
    }
    config.add_type(info).unwrap();
    config
}

#[test]
fn test_existing_type_with_other_features_fails() {
    let bytes = stored(&shop(&[FeatureKind::Name, FeatureKind::Ref]));

    let mut other = shop(&[FeatureKind::Width]);
    let before = stored(&other);

    let err = other
        .load_from_binary(&mut Scanner::new(bytes.as_slice()))
        .unwrap_err();
    assert_eq!(
        err,
        Error::TypeDefinitionMismatch {
            name: "shop".into()
        }
    );

    assert_eq!(stored(&other), before);
    let shop = other.type_by_name("shop").unwrap();
    assert!(shop.has_feature(FeatureKind::Width));
    assert!(!shop.has_feature(FeatureKind::Name));
}

#[test]
fn test_existing_type_with_other_flags_fails() {
    let bytes = stored(&shop(&[FeatureKind::Name]));

    let mut other = TypeConfig::new();
    let mut info = TypeInfo::new("shop");
    info.set_can_be_node(true).set_index_as_poi(true);
    info.add_feature(FeatureKind::Name).unwrap();
    other.add_type(info).unwrap();

    let err = other
        .load_from_binary(&mut Scanner::new(bytes.as_slice()))
        .unwrap_err();
    assert!(
        matches!(err, Error::TypeDefinitionMismatch { ref name } if name == "shop"),
        "{err}"
    );
}

#[test]
fn test_existing_type_with_same_definition_loads() {
    let bytes = stored(&shop(&[FeatureKind::Name, FeatureKind::Ref]));

    let mut other = shop(&[FeatureKind::Name, FeatureKind::Ref]);
    other.load_from_binary(&mut Scanner::new(bytes.as_slice())).unwrap();
    assert_eq!(stored(&other), bytes);
}

#[test]
fn test_failed_load_leaves_registry_untouched() {
    let config = style_config();
    let mut bytes = stored(&config);
    bytes.truncate(bytes.len() - 4);

    let mut target = TypeConfig::new();
    let before = stored(&target);

    let err = target
        .load_from_binary(&mut Scanner::new(bytes.as_slice()))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err}");

    assert_eq!(stored(&target), before);
    assert!(target.tag_id("highway").is_ignore());
    assert!(target.type_by_name("highway_motorway").is_none());
}

#[test]
fn test_empty_stream_fails() {
    let mut config = TypeConfig::new();
    let result = config.load_from_binary(&mut Scanner::new(&[0u8; 0][..]));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_data_file_round_trip() {
    let dir = scratch_dir("store");
    let config = style_config();

    config.store_to_data_file(&dir).unwrap();
    assert!(dir.join(TYPES_DATA_FILE).is_file());

    let mut loaded = TypeConfig::new();
    loaded.load_from_data_file(&dir).unwrap();
    assert_same_registry(&config, &loaded);

    let cafe = loaded.type_by_name("amenity_cafe").unwrap();
    assert!(cafe.has_feature(FeatureKind::NameAlt));
    assert!(cafe.has_feature(FeatureKind::Address));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_data_file_fails() {
    let dir = scratch_dir("missing");

    let mut config = TypeConfig::new();
    let result = config.load_from_data_file(&dir);
    assert!(matches!(result, Err(Error::Io(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}
