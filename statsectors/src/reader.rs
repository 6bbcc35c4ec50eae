//! Feature sources.
//!
//! A source is any iterator of `Result<Feature>`; [`ShapefileSource`] reads an
//! ESRI shapefile (`.shp` geometry, `.shx` index, `.dbf` attribute table).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use geo_types::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Shape};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{AttributeValue, Feature};

/// A forward-only sequence of features.
pub trait FeatureSource: Iterator<Item = Result<Feature>> {}

impl<I> FeatureSource for I where I: Iterator<Item = Result<Feature>> {}

/// Features held in memory, yielded in order and never failing.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    features: std::vec::IntoIter<Feature>,
}

impl MemorySource {
    /// Wraps `features`.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features: features.into_iter(),
        }
    }
}

impl From<Vec<Feature>> for MemorySource {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}

impl FromIterator<Feature> for MemorySource {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Iterator for MemorySource {
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        self.features.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.features.size_hint()
    }
}

/// An open shapefile.
///
/// Only the columns passed to [`ShapefileSource::open`] are copied into each
/// [`Feature`].
pub struct ShapefileSource {
    path: PathBuf,
    reader: shapefile::Reader<BufReader<File>, BufReader<File>>,
    attributes: Vec<String>,
}

impl std::fmt::Debug for ShapefileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapefileSource")
            .field("path", &self.path)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

impl ShapefileSource {
    /// Opens `path` and its sibling `.shx`/`.dbf` files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputOpen`] if any of the files is missing or its
    /// header cannot be parsed.
    pub fn open<S: AsRef<str>>(path: &Path, attributes: &[S]) -> Result<Self> {
        let reader = shapefile::Reader::from_path(path).map_err(|err| Error::InputOpen {
            path: path.to_owned(),
            reason: err.to_string(),
        })?;
        debug!(path = %path.display(), "opened shapefile");
        Ok(Self {
            path: path.to_owned(),
            reader,
            attributes: attributes.iter().map(|a| a.as_ref().to_owned()).collect(),
        })
    }

    /// The path the source was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the features in file order.
    ///
    /// A record that fails to decode yields [`Error::InputRead`].
    pub fn features(&mut self) -> impl Iterator<Item = Result<Feature>> + '_ {
        let attributes = &self.attributes;
        self.reader
            .iter_shapes_and_records()
            .enumerate()
            .map(move |(index, item)| {
                let (shape, record) = item.map_err(|source| Error::InputRead { index, source })?;
                Ok(to_feature(shape, &record, attributes))
            })
    }
}

fn to_feature(shape: Shape, record: &Record, attributes: &[String]) -> Feature {
    let mut feature = Feature::new(shape_to_geometry(shape));
    for name in attributes {
        let value = record.get(name).map_or(AttributeValue::Null, field_value);
        feature.set_attribute(name.clone(), value);
    }
    feature
}

fn field_value(value: &FieldValue) -> AttributeValue {
    match value {
        FieldValue::Character(Some(text)) => AttributeValue::Text(text.clone()),
        FieldValue::Numeric(Some(n)) | FieldValue::Double(n) => AttributeValue::Number(*n),
        FieldValue::Float(Some(n)) => AttributeValue::Number(f64::from(*n)),
        FieldValue::Integer(i) => AttributeValue::Integer(i64::from(*i)),
        FieldValue::Logical(Some(b)) => AttributeValue::Bool(*b),
        _ => AttributeValue::Null,
    }
}

/// Converts a shape into a `geo-types` geometry; null shapes have none.
///
/// Polygon rings keep their file order: each outer ring starts a polygon and
/// the inner rings that follow it become its holes. One polygon stays a
/// `Polygon`, several become a `MultiPolygon`.
pub fn shape_to_geometry(shape: Shape) -> Option<Geometry<f64>> {
    match shape {
        Shape::NullShape => None,
        Shape::Polygon(p) => rings_to_geometry(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonM(p) => rings_to_geometry(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonZ(p) => rings_to_geometry(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::Point(pt) => Some(Geometry::Point(Point::new(pt.x, pt.y))),
        Shape::PointM(pt) => Some(Geometry::Point(Point::new(pt.x, pt.y))),
        Shape::PointZ(pt) => Some(Geometry::Point(Point::new(pt.x, pt.y))),
        Shape::Polyline(l) => Some(lines(l.parts(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolylineM(l) => Some(lines(l.parts(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolylineZ(l) => Some(lines(l.parts(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::Multipoint(m) => Some(points(m.points(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::MultipointM(m) => Some(points(m.points(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::MultipointZ(m) => Some(points(m.points(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::Multipatch(_) => {
            debug!("multipatch shape has no planar geometry");
            None
        }
    }
}

fn rings_to_geometry<P>(rings: &[PolygonRing<P>], xy: impl Fn(&P) -> Coord<f64>) -> Option<Geometry<f64>> {
    let ring = |points: &[P]| LineString(points.iter().map(&xy).collect());
    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    for r in rings {
        match r {
            PolygonRing::Outer(points) => polygons.push(Polygon::new(ring(points), Vec::new())),
            PolygonRing::Inner(points) => match polygons.last_mut() {
                Some(polygon) => polygon.interiors_push(ring(points)),
                // A hole before any shell: keep it as its own part.
                None => polygons.push(Polygon::new(ring(points), Vec::new())),
            },
        }
    }
    match polygons.len() {
        0 => None,
        1 => polygons.pop().map(Geometry::Polygon),
        _ => Some(Geometry::MultiPolygon(MultiPolygon(polygons))),
    }
}

fn lines<P>(parts: &[Vec<P>], xy: impl Fn(&P) -> Coord<f64>) -> Geometry<f64> {
    Geometry::MultiLineString(MultiLineString(
        parts
            .iter()
            .map(|part| LineString(part.iter().map(&xy).collect()))
            .collect(),
    ))
}

fn points<P>(pts: &[P], xy: impl Fn(&P) -> Coord<f64>) -> Geometry<f64> {
    Geometry::MultiPoint(MultiPoint(pts.iter().map(|p| Point(xy(p))).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::Point as ShpPoint;

    fn ring(coords: &[(f64, f64)]) -> Vec<ShpPoint> {
        coords.iter().map(|&(x, y)| ShpPoint::new(x, y)).collect()
    }

    #[test]
    fn single_outer_ring_is_a_polygon() {
        let shape = Shape::Polygon(shapefile::Polygon::with_rings(vec![PolygonRing::Outer(ring(
            &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)],
        ))]));
        let Some(Geometry::Polygon(polygon)) = shape_to_geometry(shape) else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.exterior().0[2], Coord { x: 10.0, y: 10.0 });
        assert!(polygon.interiors().is_empty());
    }

    #[test]
    fn holes_attach_to_preceding_shell() {
        let shape = Shape::Polygon(shapefile::Polygon::with_rings(vec![
            PolygonRing::Outer(ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)])),
            PolygonRing::Inner(ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)])),
            PolygonRing::Outer(ring(&[(20.0, 20.0), (20.0, 30.0), (30.0, 30.0), (20.0, 20.0)])),
        ]));
        let Some(Geometry::MultiPolygon(multi)) = shape_to_geometry(shape) else {
            panic!("expected a multi-polygon");
        };
        assert_eq!(multi.0.len(), 2);
        assert_eq!(multi.0[0].interiors().len(), 1);
        assert!(multi.0[1].interiors().is_empty());
    }

    #[test]
    fn null_shape_has_no_geometry() {
        assert_eq!(shape_to_geometry(Shape::NullShape), None);
    }

    #[test]
    fn point_shape_is_kept_as_point() {
        let shape = Shape::Point(ShpPoint::new(4.35, 50.85));
        assert_eq!(
            shape_to_geometry(shape),
            Some(Geometry::Point(Point::new(4.35, 50.85)))
        );
    }

    #[test]
    fn field_values_map_to_attributes() {
        assert_eq!(
            field_value(&FieldValue::Character(Some("Centrum".to_owned()))),
            AttributeValue::Text("Centrum".to_owned())
        );
        assert_eq!(field_value(&FieldValue::Character(None)), AttributeValue::Null);
        assert_eq!(
            field_value(&FieldValue::Numeric(Some(12345.0))),
            AttributeValue::Number(12345.0)
        );
        assert_eq!(field_value(&FieldValue::Numeric(None)), AttributeValue::Null);
        assert_eq!(field_value(&FieldValue::Integer(7)), AttributeValue::Integer(7));
    }

    #[test]
    fn memory_source_yields_in_order() {
        let source: MemorySource = ["1", "2"]
            .into_iter()
            .map(|code| Feature::new(None).with_attribute("Cs012011", code))
            .collect();
        let codes: Vec<_> = source
            .map(|f| f.unwrap().attribute("Cs012011").cloned())
            .collect();
        assert_eq!(
            codes,
            vec![Some(AttributeValue::from("1")), Some(AttributeValue::from("2"))]
        );
    }

    #[test]
    fn missing_file_fails_to_open() {
        let err = ShapefileSource::open(Path::new("/nonexistent/sectors.shp"), &["Cs012011"])
            .unwrap_err();
        assert!(matches!(err, Error::InputOpen { .. }));
    }
}
