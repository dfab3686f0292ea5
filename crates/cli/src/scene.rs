//! JSON scene files: a list of tagged shapes.
//!
//! ```json
//! { "shapes": [ { "point": [0, 0] },
//!               { "segment": [[0, 0], [1, 1]] },
//!               { "polygon": [[0, 0], [1, 0], [0, 1]] } ] }
//! ```
//! A bare coordinate list `[[x, y], ...]` is read as a single polygon.

use anyhow::{Context, Result};
use monotri::kernel::{Point, Polygon, Segment};
use monotri::shape::Shape;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

type Xy = [f64; 2];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeRec {
    Point(Xy),
    Segment([Xy; 2]),
    Polygon(Vec<Xy>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub shapes: Vec<ShapeRec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SceneFile {
    Scene(Scene),
    Ring(Vec<Xy>),
}

fn pt([x, y]: Xy) -> Point {
    Point::new(x, y)
}

fn xy(p: &Point) -> Xy {
    [p.x, p.y]
}

impl From<&ShapeRec> for Shape {
    fn from(rec: &ShapeRec) -> Self {
        match rec {
            ShapeRec::Point(p) => Shape::Point(pt(*p)),
            ShapeRec::Segment([a, b]) => Shape::Segment(Segment::new(pt(*a), pt(*b))),
            ShapeRec::Polygon(vs) => Shape::Polygon(Polygon::new(vs.iter().copied().map(pt).collect())),
        }
    }
}

impl Scene {
    pub fn from_polygons<'a>(polys: impl IntoIterator<Item = &'a Polygon>) -> Self {
        Self {
            shapes: polys
                .into_iter()
                .map(|p| ShapeRec::Polygon(p.vs.iter().map(xy).collect()))
                .collect(),
        }
    }

    pub fn to_shapes(&self) -> Vec<Shape> {
        self.shapes.iter().map(Shape::from).collect()
    }
}

pub fn parse_scene(text: &str) -> Result<Scene> {
    let file: SceneFile = serde_json::from_str(text).context("parsing scene JSON")?;
    Ok(match file {
        SceneFile::Scene(s) => s,
        SceneFile::Ring(vs) => Scene {
            shapes: vec![ShapeRec::Polygon(vs)],
        },
    })
}

pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_scene(&text).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use monotri::shape::extract_polygons;

    #[test]
    fn tagged_scene_parses_all_variants() {
        let s = parse_scene(
            r#"{"shapes": [{"point": [1, 2]},
                           {"segment": [[0, 0], [1, 1]]},
                           {"polygon": [[0, 0], [1, 0], [0, 1]]}]}"#,
        )
        .unwrap();
        let shapes = s.to_shapes();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0], Shape::Point(Point::new(1.0, 2.0)));
        let polys = extract_polygons(&shapes);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].len(), 3);
    }

    #[test]
    fn bare_ring_is_one_polygon() {
        let s = parse_scene("[[0, 0], [1, 0], [1, 1], [0, 1]]").unwrap();
        assert_eq!(s.shapes.len(), 1);
        assert!(matches!(&s.shapes[0], ShapeRec::Polygon(vs) if vs.len() == 4));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_scene("{\"shapes\": 3}").is_err());
    }

    #[test]
    fn polygons_survive_a_round_trip() {
        let p = Polygon::from_coords(&[(0.0, 0.0), (2.0, 0.5), (1.0, 3.0)]);
        let text = serde_json::to_string(&Scene::from_polygons([&p])).unwrap();
        let back = parse_scene(&text).unwrap();
        assert_eq!(extract_polygons(&back.to_shapes()), vec![p]);
    }
}
