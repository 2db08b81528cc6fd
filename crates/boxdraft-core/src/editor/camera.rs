//! Camera actions.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::input::PointerInfo;
use kurbo::Rect;

pub(crate) fn pan(document: &mut Document, info: &PointerInfo) {
    document.page_state.camera.pan(info.delta);
}

pub(crate) fn pinch(document: &mut Document, info: &PointerInfo, zoom: f64) {
    if zoom.is_nan() || zoom <= 0.0 {
        log::warn!("Ignoring pinch to non-positive zoom {zoom}");
        return;
    }
    document.page_state.camera.pinch(info.point, info.delta, zoom);
}

pub(crate) fn zoom_to_selection(document: &mut Document, config: &EditorConfig, viewport: Rect) {
    if let Some(bounds) = document.selection_bounds() {
        fit(document, config, viewport, bounds);
    }
}

pub(crate) fn zoom_to_fit(document: &mut Document, config: &EditorConfig, viewport: Rect) {
    if let Some(bounds) = document.page.bounds() {
        fit(document, config, viewport, bounds);
    }
}

pub(crate) fn zoom_in(document: &mut Document, config: &EditorConfig, viewport: Rect) {
    step(document, config, viewport, 1);
}

pub(crate) fn zoom_out(document: &mut Document, config: &EditorConfig, viewport: Rect) {
    step(document, config, viewport, -1);
}

fn step(document: &mut Document, config: &EditorConfig, viewport: Rect, steps: i32) {
    let camera = &mut document.page_state.camera;
    camera.step_zoom(viewport.center(), steps, config.zoom_step, config.max_zoom);
    log::debug!("Zoom stepped to {:.2}", camera.zoom);
}

fn fit(document: &mut Document, config: &EditorConfig, viewport: Rect, bounds: Rect) {
    let camera = &mut document.page_state.camera;
    camera.fit_to_bounds(
        viewport,
        bounds,
        config.fit_padding,
        config.min_zoom,
        config.max_zoom,
    );
    log::debug!("Fitted camera to {bounds:?}: zoom {:.2}", camera.zoom);
}
