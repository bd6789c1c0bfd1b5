// Feature value buffer benchmarks
//
// This benchmark suite measures:
// - Parsing a fully tagged road into a bound buffer
// - Encoding and decoding a populated buffer
// - Rebinding a buffer across types

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geoclass::condition::Condition;
use geoclass::feature::FeatureKind;
use geoclass::registry::{GeometryKinds, TagMap, TypeConfig, TypeInfo, TypeInfoRef};
use geoclass::{FeatureValueBuffer, NullSink, ObjectRef};
use geoclass_io::{Scanner, Writer};

fn create_road(config: &mut TypeConfig) -> TypeInfoRef {
    let highway = config.register_tag_for_external_use("highway");
    config.register_name_tag("name", 2);
    config.register_name_tag("loc_name", 1);
    config.register_surface_grade("asphalt", 1);

    let mut info = TypeInfo::new("highway_residential");
    info.set_can_route_foot(true)
        .set_can_route_bicycle(true)
        .set_can_route_car(true)
        .add_condition(GeometryKinds::WAY, Condition::exists(highway));

    for kind in [
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
    ] {
        info.add_feature(kind).unwrap();
    }

    config.add_type(info).unwrap()
}

fn road_tags(config: &TypeConfig) -> TagMap {
    [
        ("highway", "residential"),
        ("name", "Elm Road"),
        ("loc_name", "The Elm"),
        ("ref", "B 12"),
        ("oneway", "yes"),
        ("maxspeed", "30 mph"),
        ("width", "6,5 m"),
        ("layer", "1"),
        ("bridge", "yes"),
        ("surface", "asphalt"),
    ]
    .into_iter()
    .map(|(key, value)| (config.tag_id(key), value.to_string()))
    .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut config = TypeConfig::new();
    let road = create_road(&mut config);
    let tags = road_tags(&config);
    let mut buffer = FeatureValueBuffer::with_type(road);

    c.bench_function("buffer_parse", |b| {
        b.iter(|| {
            buffer.clear();
            buffer.parse(&config, black_box(&tags), ObjectRef::way(1), &NullSink);
            black_box(buffer.value_count())
        })
    });
}

fn bench_write(c: &mut Criterion) {
    let mut config = TypeConfig::new();
    let road = create_road(&mut config);
    let tags = road_tags(&config);

    let mut buffer = FeatureValueBuffer::with_type(road);
    buffer.parse(&config, &tags, ObjectRef::way(1), &NullSink);

    c.bench_function("buffer_write", |b| {
        b.iter(|| {
            let mut writer = Writer::new(Vec::with_capacity(64));
            buffer.write(&mut writer).unwrap();
            black_box(writer.close().unwrap())
        })
    });
}

fn bench_read(c: &mut Criterion) {
    let mut config = TypeConfig::new();
    let road = create_road(&mut config);
    let tags = road_tags(&config);

    let mut source = FeatureValueBuffer::with_type(road.clone());
    source.parse(&config, &tags, ObjectRef::way(1), &NullSink);
    let mut writer = Writer::new(Vec::new());
    source.write(&mut writer).unwrap();
    let bytes = writer.close().unwrap();

    let mut target = FeatureValueBuffer::with_type(road);

    c.bench_function("buffer_read", |b| {
        b.iter(|| {
            target
                .read(&mut Scanner::new(black_box(bytes.as_slice())))
                .unwrap();
            black_box(target.value_count())
        })
    });
}

fn bench_rebind(c: &mut Criterion) {
    let mut config = TypeConfig::new();
    let road = create_road(&mut config);
    let land = config
        .type_info(config.tile_types().land)
        .cloned()
        .unwrap();

    let mut buffer = FeatureValueBuffer::new();

    c.bench_function("buffer_rebind", |b| {
        b.iter(|| {
            buffer.set_type(road.clone());
            buffer.set_type(land.clone());
            black_box(buffer.is_bound())
        })
    });
}

criterion_group!(benches, bench_parse, bench_write, bench_read, bench_rebind);
criterion_main!(benches);
