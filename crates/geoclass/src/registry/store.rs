//! Binary registry file (`types.dat`).
//!
//! Layout, every count, id and priority a varint:
//!
//! ```text
//! tag count       { id, name, internal_only }
//! name tag count  { id, name, priority }
//! alt name count  { id, name, priority }
//! type count      { id, name, 15 flags, feature count, { feature name } }
//! ```
//!
//! The flags are, in order: can be node/way/area/relation, can route
//! foot/bicycle/car, index as location/region/poi, optimize low zoom,
//! multipolygon, pin way, ignore sea/land, ignore.
//!
//! Loading replays every registration and compares the resulting ids with
//! the stored ones. Types already present must also match their stored
//! flags and feature list. Encoded feature buffers refer to types and tags
//! by id and depend on the feature layout, so a mismatch rejects the whole
//! file.

use super::{TagId, TypeConfig, TypeId, TypeInfo};
use crate::error::{Error, Result};
use crate::feature::FeatureKind;
use geoclass_io::{Scanner, Writer};
use std::io::{Read, Write};
use std::path::Path;

/// File name of the registry inside a data directory.
pub const TYPES_DATA_FILE: &str = "types.dat";

/// What a successful load touched, for logging.
#[derive(Debug, Default)]
struct LoadStats {
    tags: u32,
    name_tags: u32,
    name_alt_tags: u32,
    types: u32,
    new_types: u32,
}

impl TypeConfig {
    /// Writes the registry to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the writer fails.
    pub fn store_to_binary<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_number_u32(self.tags.len() as u32)?;
        for tag in self.tags.iter() {
            writer.write_number_u32(tag.id().as_u32())?;
            writer.write_string(tag.name())?;
            writer.write_bool(tag.is_internal_only())?;
        }

        self.store_priorities(writer, |id| self.name_tag_priority(id))?;
        self.store_priorities(writer, |id| self.name_alt_tag_priority(id))?;

        writer.write_number_u32(self.types.len() as u32)?;
        for info in &self.types {
            writer.write_number_u32(info.id().as_u32())?;
            writer.write_string(info.name())?;

            for flag in [
                info.can_be_node(),
                info.can_be_way(),
                info.can_be_area(),
                info.can_be_relation(),
                info.can_route_foot(),
                info.can_route_bicycle(),
                info.can_route_car(),
                info.index_as_location(),
                info.index_as_region(),
                info.index_as_poi(),
                info.optimize_low_zoom(),
                info.multipolygon(),
                info.pin_way(),
                info.ignore_sea_land(),
                info.ignore(),
            ] {
                writer.write_bool(flag)?;
            }

            writer.write_number_u32(info.feature_count() as u32)?;
            for feature in info.features() {
                writer.write_string(feature.feature().name())?;
            }
        }

        geoclass_log::debug!(
            "stored {} tags and {} types",
            self.tags.len(),
            self.types.len()
        );

        Ok(())
    }

    /// Candidates in tag id order.
    fn store_priorities<W: Write>(
        &self,
        writer: &mut Writer<W>,
        priority: impl Fn(TagId) -> Option<u32>,
    ) -> Result<()> {
        let entries: Vec<_> = self
            .tags
            .iter()
            .filter_map(|tag| priority(tag.id()).map(|prio| (tag, prio)))
            .collect();

        writer.write_number_u32(entries.len() as u32)?;
        for (tag, prio) in entries {
            writer.write_number_u32(tag.id().as_u32())?;
            writer.write_string(tag.name())?;
            writer.write_number_u32(prio)?;
        }

        Ok(())
    }

    /// Replays a stored registry on top of this one.
    ///
    /// The load is all-or-nothing: on error the registry is left exactly as
    /// it was.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the stream is truncated or malformed
    /// - [`Error::TagIdMismatch`] or [`Error::TypeIdMismatch`] if the stored
    ///   ids disagree with this registry's numbering
    /// - [`Error::TypeDefinitionMismatch`] if a type already in the registry has
///   other flags or features than its stored definition
/// - [`Error::UnknownFeature`] if a type names a feature outside the catalog
    pub fn load_from_binary<R: Read>(&mut self, scanner: &mut Scanner<R>) -> Result<()> {
        let mut staged = self.clone();

        match staged.replay(scanner) {
            Ok(stats) => {
                geoclass_log::info!(
                    "loaded {} tags, {} name tags, {} alt name tags, {} types ({} new)",
                    stats.tags,
                    stats.name_tags,
                    stats.name_alt_tags,
                    stats.types,
                    stats.new_types
                );
                *self = staged;
                Ok(())
            }
            Err(err) => {
                geoclass_log::error!("cannot load type registry: {err}");
                Err(err)
            }
        }
    }

    fn replay<R: Read>(&mut self, scanner: &mut Scanner<R>) -> Result<LoadStats> {
        let mut stats = LoadStats {
            tags: scanner.read_number_u32()?,
            ..LoadStats::default()
        };

        for _ in 0..stats.tags {
            let requested = scanner.read_number_u32()?;
            let name = scanner.read_string()?;
            let internal_only = scanner.read_bool()?;

            let actual = if internal_only {
                self.tags.register_internal(&name)
            } else {
                self.tags.register_external(&name)
            };

            check_tag_id(name, requested, actual)?;
        }

        stats.name_tags = scanner.read_number_u32()?;
        for _ in 0..stats.name_tags {
            let requested = scanner.read_number_u32()?;
            let name = scanner.read_string()?;
            let priority = scanner.read_number_u32()?;

            let actual = self.register_name_tag(&name, priority);
            check_tag_id(name, requested, actual)?;
        }

        stats.name_alt_tags = scanner.read_number_u32()?;
        for _ in 0..stats.name_alt_tags {
            let requested = scanner.read_number_u32()?;
            let name = scanner.read_string()?;
            let priority = scanner.read_number_u32()?;

            let actual = self.register_name_alt_tag(&name, priority);
            check_tag_id(name, requested, actual)?;
        }

        stats.types = scanner.read_number_u32()?;
        for _ in 0..stats.types {
            let info = read_type(scanner)?;
            let requested = info.id();

            if let Some(existing) = self.type_by_name(info.name()) {
                if existing.id() != requested {
                    return Err(Error::TypeIdMismatch {
                        name: info.name().to_owned(),
                        requested: requested.as_u32(),
                        actual: existing.id().as_u32(),
                    });
                }
                if !same_definition(existing, &info) {
                    return Err(Error::TypeDefinitionMismatch {
                        name: info.name().to_owned(),
                    });
                }
                continue;
            }

            if requested.is_ignore() || requested.as_u32() < self.next_type_id {
                return Err(Error::TypeIdMismatch {
                    name: info.name().to_owned(),
                    requested: requested.as_u32(),
                    actual: self.next_type_id,
                });
            }

            self.add_type(info)?;
            stats.new_types += 1;
        }

        Ok(stats)
    }

    /// Loads `dir/types.dat`. See [`load_from_binary`](Self::load_from_binary).
    pub fn load_from_data_file(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let path = dir.as_ref().join(TYPES_DATA_FILE);

        let mut scanner = Scanner::open(&path).inspect_err(|err| {
            geoclass_log::error!("cannot open '{}': {err}", path.display());
        })?;

        self.load_from_binary(&mut scanner)
    }

    /// Stores the registry to `dir/types.dat`, replacing an existing file.
    pub fn store_to_data_file(&self, dir: impl AsRef<Path>) -> Result<()> {
        let path = dir.as_ref().join(TYPES_DATA_FILE);

        let mut writer = Writer::create(&path)?;
        self.store_to_binary(&mut writer)?;
        writer.close()?;

        geoclass_log::info!("wrote '{}'", path.display());
        Ok(())
    }
}

fn check_tag_id(name: String, requested: u32, actual: TagId) -> Result<()> {
    if actual.as_u32() == requested {
        Ok(())
    } else {
        Err(Error::TagIdMismatch {
            name,
            requested,
            actual: actual.as_u32(),
        })
    }
}

/// Capabilities, behavior and feature layout agree.
fn same_definition(existing: &TypeInfo, stored: &TypeInfo) -> bool {
    existing.can_be() == stored.can_be()
        && existing.route_modes() == stored.route_modes()
        && existing.index_kinds() == stored.index_kinds()
        && existing.behavior() == stored.behavior()
        && existing.features() == stored.features()
}

fn read_type<R: Read>(scanner: &mut Scanner<R>) -> Result<TypeInfo> {
    let id = TypeId::new(scanner.read_number_u32()?);
    let mut info = TypeInfo::new(scanner.read_string()?);

    let mut flags = [false; 15];
    for flag in &mut flags {
        *flag = scanner.read_bool()?;
    }

    let [
        node,
        way,
        area,
        relation,
        foot,
        bicycle,
        car,
        location,
        region,
        poi,
        optimize_low_zoom,
        multipolygon,
        pin_way,
        ignore_sea_land,
        ignore,
    ] = flags;

    info.set_id(id)
        .set_can_be_node(node)
        .set_can_be_way(way)
        .set_can_be_area(area)
        .set_can_be_relation(relation)
        .set_can_route_foot(foot)
        .set_can_route_bicycle(bicycle)
        .set_can_route_car(car)
        .set_index_as_location(location)
        .set_index_as_region(region)
        .set_index_as_poi(poi)
        .set_optimize_low_zoom(optimize_low_zoom)
        .set_multipolygon(multipolygon)
        .set_pin_way(pin_way)
        .set_ignore_sea_land(ignore_sea_land)
        .set_ignore(ignore);

    let feature_count = scanner.read_number_u32()?;
    for _ in 0..feature_count {
        let name = scanner.read_string()?;
        let kind = FeatureKind::from_name(&name).ok_or(Error::UnknownFeature { name })?;
        info.add_feature(kind)?;
    }

    Ok(info)
}
