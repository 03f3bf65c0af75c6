//! Python bindings for the portal back end
//!
//! Coordinates cross the boundary as `(ra, dec)` tuples in degrees and
//! offsets as `(ra, dec)` tuples in arcseconds.

use numpy::{IntoPyArray, PyArray2};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::annotations::{self, Annotation, PathStyle};
use crate::utils::coordinate_math::{self, Coordinate, Offset};

fn resolve_style(
    style_json: Option<&str>,
    draw_middle_arrows: Option<bool>,
    end_marker_rotation: Option<f64>,
) -> PyResult<PathStyle> {
    let mut style = match style_json {
        Some(json) => PathStyle::from_json(json)?,
        None => PathStyle::default(),
    };
    if let Some(draw) = draw_middle_arrows {
        style = style.with_middle_arrows(draw);
    }
    if let Some(rotation) = end_marker_rotation {
        style = style.with_end_marker_rotation(rotation);
    }
    style.validate()?;
    Ok(style)
}

fn build_path(
    pointings: Vec<(f64, f64)>,
    size_arcsec: f64,
    origin: Option<(f64, f64)>,
    style: &PathStyle,
) -> Vec<Annotation> {
    let pointings: Vec<Coordinate> = pointings.into_iter().map(Coordinate::from).collect();
    let origin = origin.map(Coordinate::from);
    annotations::get_path_annotations(&pointings, size_arcsec, origin.as_ref(), style)
}

fn to_tuples(annotations: &[Annotation]) -> Vec<Vec<(f64, f64)>> {
    annotations
        .iter()
        .map(|a| a.points.iter().map(|c| (c.ra, c.dec)).collect())
        .collect()
}

#[pyfunction]
fn cosine_declination_term(dec_deg: f64) -> f64 {
    coordinate_math::cosine_declination_term(dec_deg)
}

#[pyfunction]
fn offset_coordinate(coordinate: (f64, f64), offset_arcsec: (f64, f64)) -> (f64, f64) {
    let c = coordinate_math::offset_coordinate(
        &Coordinate::from(coordinate),
        &Offset::from(offset_arcsec),
    );
    (c.ra, c.dec)
}

#[pyfunction]
#[pyo3(signature = (coordinate, angle_deg, center=(0.0, 0.0)))]
fn rotate_coordinate(coordinate: (f64, f64), angle_deg: f64, center: (f64, f64)) -> (f64, f64) {
    let c = coordinate_math::rotate_coordinate(
        &Coordinate::from(coordinate),
        angle_deg,
        &Coordinate::from(center),
    );
    (c.ra, c.dec)
}

/// Path annotations as lists of `(ra, dec)` tuples
#[pyfunction]
#[pyo3(signature = (pointings, size_arcsec, origin=None, draw_middle_arrows=None, end_marker_rotation=None, style_json=None))]
fn get_path_annotations(
    pointings: Vec<(f64, f64)>,
    size_arcsec: f64,
    origin: Option<(f64, f64)>,
    draw_middle_arrows: Option<bool>,
    end_marker_rotation: Option<f64>,
    style_json: Option<String>,
) -> PyResult<Vec<Vec<(f64, f64)>>> {
    let style = resolve_style(style_json.as_deref(), draw_middle_arrows, end_marker_rotation)?;
    Ok(to_tuples(&build_path(pointings, size_arcsec, origin, &style)))
}

/// Path annotations as (N, 2) numpy arrays
#[pyfunction]
#[pyo3(signature = (pointings, size_arcsec, origin=None, draw_middle_arrows=None, end_marker_rotation=None, style_json=None))]
fn get_path_annotation_arrays<'py>(
    py: Python<'py>,
    pointings: Vec<(f64, f64)>,
    size_arcsec: f64,
    origin: Option<(f64, f64)>,
    draw_middle_arrows: Option<bool>,
    end_marker_rotation: Option<f64>,
    style_json: Option<String>,
) -> PyResult<Vec<Bound<'py, PyArray2<f64>>>> {
    let style = resolve_style(style_json.as_deref(), draw_middle_arrows, end_marker_rotation)?;
    Ok(build_path(pointings, size_arcsec, origin, &style)
        .iter()
        .map(|a| a.to_array().into_pyarray(py))
        .collect())
}

/// Path annotations serialized as JSON, including each annotation's kind
#[pyfunction]
#[pyo3(signature = (pointings, size_arcsec, origin=None, style_json=None))]
fn get_path_annotations_json(
    pointings: Vec<(f64, f64)>,
    size_arcsec: f64,
    origin: Option<(f64, f64)>,
    style_json: Option<String>,
) -> PyResult<String> {
    let style = resolve_style(style_json.as_deref(), None, None)?;
    let annotations = build_path(pointings, size_arcsec, origin, &style);
    serde_json::to_string(&annotations).map_err(|e| {
        pyo3::exceptions::PyRuntimeError::new_err(format!("Failed to serialize annotations: {e}"))
    })
}

#[pyfunction]
#[pyo3(signature = (center, offsets, size_arcsec, pattern_rotation_deg=0.0, draw_middle_arrows=None, style_json=None))]
fn get_pointing_path_annotations(
    center: (f64, f64),
    offsets: Vec<(f64, f64)>,
    size_arcsec: f64,
    pattern_rotation_deg: f64,
    draw_middle_arrows: Option<bool>,
    style_json: Option<String>,
) -> PyResult<Vec<Vec<(f64, f64)>>> {
    let style = resolve_style(style_json.as_deref(), draw_middle_arrows, None)?;
    let offsets: Vec<Offset> = offsets.into_iter().map(Offset::from).collect();
    let annotations = annotations::get_pointing_path_annotations(
        &Coordinate::from(center),
        &offsets,
        size_arcsec,
        pattern_rotation_deg,
        &style,
    );
    Ok(to_tuples(&annotations))
}

/// Default path style as JSON
#[pyfunction]
fn default_path_style() -> String {
    PathStyle::default().to_json()
}

#[pymodule]
fn _rust_skyplot(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(cosine_declination_term, m)?)?;
    m.add_function(wrap_pyfunction!(offset_coordinate, m)?)?;
    m.add_function(wrap_pyfunction!(rotate_coordinate, m)?)?;
    m.add_function(wrap_pyfunction!(get_path_annotations, m)?)?;
    m.add_function(wrap_pyfunction!(get_path_annotation_arrays, m)?)?;
    m.add_function(wrap_pyfunction!(get_path_annotations_json, m)?)?;
    m.add_function(wrap_pyfunction!(get_pointing_path_annotations, m)?)?;
    m.add_function(wrap_pyfunction!(default_path_style, m)?)?;
    Ok(())
}
