//! Geometry serialization to Well-Known Text.
//!
//! The text itself comes from the `wkt` crate; this module only decides which
//! geometries are acceptable sector payloads.

use geo_types::{Coord, Geometry, Polygon};
use wkt::ToWkt;

/// Why a geometry could not be serialized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The feature has no geometry.
    #[error("feature has no geometry")]
    Missing,
    /// The geometry is not a polygon or multi-polygon.
    #[error("expected a polygon or multi-polygon, found {0}")]
    NotPolygonal(&'static str),
    /// A polygon (or every part of a multi-polygon) has no exterior ring.
    #[error("polygon has an empty exterior ring")]
    EmptyExterior,
    /// A coordinate is NaN or infinite.
    #[error("polygon has a non-finite coordinate")]
    NonFinite,
}

/// Serializes a polygon or multi-polygon as WKT.
///
/// # Errors
///
/// Returns a [`GeometryError`] if the geometry is absent, not polygonal,
/// empty, or contains non-finite coordinates.
pub fn to_wkt(geometry: Option<&Geometry<f64>>) -> Result<String, GeometryError> {
    let geometry = geometry.ok_or(GeometryError::Missing)?;
    match geometry {
        Geometry::Polygon(polygon) => check_polygon(polygon)?,
        Geometry::MultiPolygon(multi) => {
            if multi.0.is_empty() {
                return Err(GeometryError::EmptyExterior);
            }
            for polygon in &multi.0 {
                check_polygon(polygon)?;
            }
        }
        other => return Err(GeometryError::NotPolygonal(kind(other))),
    }
    Ok(geometry.wkt_string())
}

fn check_polygon(polygon: &Polygon<f64>) -> Result<(), GeometryError> {
    if polygon.exterior().0.is_empty() {
        return Err(GeometryError::EmptyExterior);
    }
    let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
    if rings.flat_map(|ring| ring.coords()).all(finite) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite)
    }
}

fn finite(c: &Coord<f64>) -> bool {
    c.x.is_finite() && c.y.is_finite()
}

fn kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "a point",
        Geometry::MultiPoint(_) => "a multi-point",
        Geometry::Line(_) | Geometry::LineString(_) => "a line string",
        Geometry::MultiLineString(_) => "a multi-line string",
        Geometry::GeometryCollection(_) => "a geometry collection",
        Geometry::Rect(_) => "a rectangle",
        Geometry::Triangle(_) => "a triangle",
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => "a polygon",
    }
}
