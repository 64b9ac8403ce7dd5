//! World map panel with a marker at the resolved location.

use shared::domain::Coordinates;

const MAP_HEIGHT: f32 = 320.0;
const GRATICULE_STEP_DEG: f64 = 30.0;

/// Equirectangular projection into `rect`; latitude is clamped and longitude wrapped.
pub fn project(location: Coordinates, rect: egui::Rect) -> egui::Pos2 {
    let latitude = location.latitude.clamp(-90.0, 90.0);
    let longitude = (location.longitude + 180.0).rem_euclid(360.0) - 180.0;
    let longitude = if location.longitude == 180.0 { 180.0 } else { longitude };

    let x = (longitude + 180.0) / 360.0;
    let y = (90.0 - latitude) / 180.0;
    egui::pos2(
        rect.left() + (f64::from(rect.width()) * x) as f32,
        rect.top() + (f64::from(rect.height()) * y) as f32,
    )
}

pub fn show_location_map(ui: &mut egui::Ui, location: Coordinates) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, MAP_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 8.0, egui::Color32::from_rgb(24, 52, 86));

    let grid = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 28));
    let mut meridian = -180.0;
    while meridian <= 180.0 {
        let top = project(Coordinates::new(90.0, meridian), rect);
        let bottom = project(Coordinates::new(-90.0, meridian), rect);
        painter.line_segment([top, bottom], grid);
        meridian += GRATICULE_STEP_DEG;
    }
    let mut parallel = -90.0;
    while parallel <= 90.0 {
        let left = project(Coordinates::new(parallel, -180.0), rect);
        let right = project(Coordinates::new(parallel, 180.0), rect);
        painter.line_segment([left, right], grid);
        parallel += GRATICULE_STEP_DEG;
    }

    let equator = egui::Stroke::new(1.5, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 60));
    painter.line_segment(
        [
            project(Coordinates::new(0.0, -180.0), rect),
            project(Coordinates::new(0.0, 180.0), rect),
        ],
        equator,
    );

    let marker = project(location, rect);
    painter.circle_filled(marker, 7.0, egui::Color32::from_rgb(220, 38, 38));
    painter.circle_stroke(marker, 7.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
    painter.text(
        marker + egui::vec2(10.0, -10.0),
        egui::Align2::LEFT_BOTTOM,
        location.to_string(),
        egui::FontId::monospace(12.0),
        egui::Color32::WHITE,
    );
}
