//! World boundary geometry.
//!
//! The viewer draws country outlines from a static GeoJSON feature
//! collection, fetched once at startup. A failed or unusable map is the
//! one fatal, user-visible error in the system: rendering cannot proceed
//! without it.

use std::time::Duration;

use geo_types::Coord;
use geojson::{GeoJson, Geometry, Value};

/// Public world boundary dataset, the same one the original page loads.
pub const WORLD_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

/// Failure to obtain or parse the boundary geometry.
#[derive(Debug, thiserror::Error)]
pub enum MapLoadError {
    #[error("could not fetch world map: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("world map request returned HTTP {0}")]
    Status(u16),
    #[error("could not parse world map GeoJSON: {0}")]
    Parse(String),
}

/// Country boundary outlines, flattened to drawable polylines.
///
/// Polygon rings (exteriors and holes alike) and line strings all become
/// entries in `outlines`; the renderer draws each as connected segments.
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    pub outlines: Vec<Vec<Coord<f64>>>,
}

impl WorldMap {
    /// Parses a GeoJSON document into boundary outlines.
    pub fn from_geojson(geojson_str: &str) -> Result<Self, MapLoadError> {
        let geojson: GeoJson = geojson_str
            .parse()
            .map_err(|e| MapLoadError::Parse(format!("{e}")))?;

        let mut outlines = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(fc) => {
                for feature in fc.features {
                    if let Some(geometry) = feature.geometry.as_ref() {
                        collect_outlines(geometry, &mut outlines);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = feature.geometry.as_ref() {
                    collect_outlines(geometry, &mut outlines);
                }
            }
            GeoJson::Geometry(geometry) => collect_outlines(&geometry, &mut outlines),
        }

        if outlines.is_empty() {
            return Err(MapLoadError::Parse(
                "no drawable boundary features".to_string(),
            ));
        }

        Ok(Self { outlines })
    }

    /// Fetches and parses the world map. Blocking; called once before the
    /// viewer window opens.
    pub fn fetch(url: &str) -> Result<Self, MapLoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let response = client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapLoadError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let map = Self::from_geojson(&body)?;
        log::info!("Loaded world map: {} boundary outlines", map.outlines.len());
        Ok(map)
    }
}

fn collect_outlines(geometry: &Geometry, outlines: &mut Vec<Vec<Coord<f64>>>) {
    match &geometry.value {
        Value::LineString(line) => {
            outlines.push(to_coords(line));
        }
        Value::MultiLineString(lines) => {
            for line in lines {
                outlines.push(to_coords(line));
            }
        }
        Value::Polygon(rings) => {
            for ring in rings {
                outlines.push(to_coords(ring));
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    outlines.push(to_coords(ring));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_outlines(geometry, outlines);
            }
        }
        // Points carry no outline
        Value::Point(_) | Value::MultiPoint(_) => {}
    }
}

fn to_coords(positions: &[Vec<f64>]) -> Vec<Coord<f64>> {
    positions
        .iter()
        .map(|p| Coord { x: p[0], y: p[1] })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_polygons_and_lines() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Boxland"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Two Isles"},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[20,20],[25,20],[25,25],[20,20]]],
                            [[[30,30],[35,30],[35,35],[30,30]]]
                        ]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Border"},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-5,-5],[-6,-7]]
                    }
                }
            ]
        }"#;

        let map = WorldMap::from_geojson(json).unwrap();
        assert_eq!(map.outlines.len(), 4);
        assert_eq!(map.outlines[0][0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(map.outlines[0].len(), 5);
        assert_eq!(map.outlines[3].len(), 2);
    }

    #[test]
    fn polygon_holes_become_outlines_too() {
        let json = r#"{
            "type": "Polygon",
            "coordinates": [
                [[0,0],[10,0],[10,10],[0,10],[0,0]],
                [[4,4],[6,4],[6,6],[4,6],[4,4]]
            ]
        }"#;
        let map = WorldMap::from_geojson(json).unwrap();
        assert_eq!(map.outlines.len(), 2);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            WorldMap::from_geojson("not geojson"),
            Err(MapLoadError::Parse(_))
        ));
    }

    #[test]
    fn empty_collection_is_a_parse_error() {
        let json = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(matches!(
            WorldMap::from_geojson(json),
            Err(MapLoadError::Parse(_))
        ));
    }
}
