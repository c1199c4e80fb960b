//! Footpath segments read from the City of Melbourne CSV export.
use crate::error::Result;
use crate::geometry::Rect;
use crate::quadtree::Quadtree;
use crate::{Key, Point, Record};
use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Read;
use tracing::info;

/// One row of the CSV. Columns are matched by their header name.
#[derive(Debug, Clone, Deserialize)]
pub struct Footpath {
    pub footpath_id: Key,
    pub address: String,
    pub clue_sa: String,
    pub asset_type: String,
    pub deltaz: f64,
    pub distance: f64,
    pub grade1in: f64,
    pub mcc_id: f64,
    #[serde(deserialize_with = "int_from_float")]
    pub mccid_int: i64,
    pub rlmax: f64,
    pub rlmin: f64,
    pub segside: String,
    #[serde(deserialize_with = "int_from_float")]
    pub statusid: i64,
    #[serde(deserialize_with = "int_from_float")]
    pub streetid: i64,
    #[serde(deserialize_with = "int_from_float")]
    pub street_group: i64,
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
}

// the export writes some integer columns as `12.0`
fn int_from_float<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.trunc() as i64)
}

impl Record for Footpath {
    fn key(&self) -> Key {
        self.footpath_id
    }
}

impl Footpath {
    /// x is the longitude, y the latitude.
    pub fn start(&self) -> Point {
        Point::new(self.start_lon, self.start_lat)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_lon, self.end_lat)
    }

    /// The points this segment is indexed under. A segment starting and ending at the same
    /// coordinate is indexed once so no bucket holds its key twice, and a point query at that
    /// coordinate lists the footpath once rather than once per endpoint.
    pub fn endpoints(&self) -> ArrayVec<[Point; 2]> {
        let mut points = ArrayVec::new();
        points.push(self.start());
        if !self.end().approx_eq(&self.start()) {
            points.push(self.end());
        }
        points
    }
}

/// `--> footpath_id: 1 || address: ... || end_lon: 144.000000 || `
impl fmt::Display for Footpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--> footpath_id: {} || address: {} || clue_sa: {} || asset_type: {} ||",
            self.footpath_id, self.address, self.clue_sa, self.asset_type
        )?;
        write!(
            f,
            " deltaz: {:.2} || distance: {:.2} || grade1in: {:.1} || mcc_id: {:.0} ||",
            self.deltaz, self.distance, self.grade1in, self.mcc_id
        )?;
        write!(
            f,
            " mccid_int: {} || rlmax: {:.2} || rlmin: {:.2} || segside: {} ||",
            self.mccid_int, self.rlmax, self.rlmin, self.segside
        )?;
        write!(
            f,
            " statusid: {} || streetid: {} || street_group: {} ||",
            self.statusid, self.streetid, self.street_group
        )?;
        write!(
            f,
            " start_lat: {:.6} || start_lon: {:.6} || end_lat: {:.6} || end_lon: {:.6} || ",
            self.start_lat, self.start_lon, self.end_lat, self.end_lon
        )
    }
}

/// Read every footpath from a CSV with a header line. Stops at the first malformed row.
pub fn read_footpaths<Rd: Read>(reader: Rd) -> Result<Vec<Footpath>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut footpaths = Vec::new();
    for row in reader.deserialize() {
        footpaths.push(row?);
    }
    info!(count = footpaths.len(), "loaded footpaths");
    Ok(footpaths)
}

/// Index both endpoints of every footpath. Endpoints outside of `bounds` are skipped.
pub fn index_footpaths(bounds: Rect, footpaths: &[Footpath]) -> Quadtree<'_, Footpath> {
    let mut tree = Quadtree::new(bounds);
    let rejected = tree.extend(
        footpaths
            .iter()
            .flat_map(|f| f.endpoints().into_iter().map(move |p| (p, f))),
    );
    info!(
        footpaths = footpaths.len(),
        points = tree.leaf_count(),
        nodes = tree.node_count(),
        rejected,
        "indexed footpaths"
    );
    tree
}
