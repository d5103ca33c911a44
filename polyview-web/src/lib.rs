/// Polyview Web - canvas front end compiled to WASM
///
/// Wraps a `Viewer` session for a browser page. The page owns the controls
/// and calls the setters below, then `draw` to repaint a 2D canvas context.

use polyview_core::{Axis, Error, ProjectionMode, Solid, Viewer};
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

const EDGE_COLOR: &str = "#333";
const VERTEX_COLOR: &str = "#e74c3c";
const VERTEX_RADIUS: f64 = 2.0;

fn js_error(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer,
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebViewer, JsValue> {
        let viewer = Viewer::new().map_err(js_error)?;
        Ok(WebViewer { viewer })
    }

    /// Show a built-in solid by name ("tetrahedron", "cube", ...)
    pub fn select_solid(&mut self, name: &str) -> Result<(), JsValue> {
        let solid: Solid = name.parse().map_err(js_error)?;
        self.viewer.select_solid(solid);
        Ok(())
    }

    /// Show the last loaded or generated mesh
    pub fn select_loaded(&mut self) {
        self.viewer.select_custom();
    }

    /// Rotation angles in degrees, as the sliders report them
    pub fn set_rotation(&mut self, x_deg: f64, y_deg: f64, z_deg: f64) {
        let params = &mut self.viewer.params;
        params.rotate_x = x_deg.to_radians();
        params.rotate_y = y_deg.to_radians();
        params.rotate_z = z_deg.to_radians();
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.viewer.params.scale = scale;
    }

    pub fn set_translation(&mut self, dx: f64, dy: f64, dz: f64) {
        let params = &mut self.viewer.params;
        params.translate_x = dx;
        params.translate_y = dy;
        params.translate_z = dz;
    }

    pub fn set_reflection(&mut self, xy: bool, xz: bool, yz: bool) {
        let params = &mut self.viewer.params;
        params.reflect_xy = xy;
        params.reflect_xz = xz;
        params.reflect_yz = yz;
    }

    pub fn set_projection(&mut self, name: &str) -> Result<(), JsValue> {
        let mode: ProjectionMode = name.parse().map_err(js_error)?;
        self.viewer.mode = mode;
        Ok(())
    }

    /// Replace the loaded mesh with parsed OBJ text; on error nothing changes
    pub fn load_obj(&mut self, text: &str) -> Result<(), JsValue> {
        self.viewer.load_obj_text(text).map_err(js_error)
    }

    /// OBJ text of the mesh on screen
    pub fn to_obj(&self) -> String {
        self.viewer.active().to_obj()
    }

    pub fn revolve(&mut self, profile: &str, axis: &str, slices: usize) -> Result<(), JsValue> {
        let axis: Axis = axis.parse().map_err(js_error)?;
        self.viewer.revolve_profile(profile, axis, slices).map_err(js_error)
    }

    pub fn surface(
        &mut self,
        function: &str,
        x_min: &str,
        x_max: &str,
        y_min: &str,
        y_max: &str,
        grid: usize,
    ) -> Result<(), JsValue> {
        self.viewer
            .surface(function, [x_min, x_max, y_min, y_max], grid)
            .map_err(js_error)
    }

    /// Projected vertices as a flat `[x0, y0, x1, y1, ...]` array
    pub fn screen_points(&self, width: u32, height: u32) -> Vec<f64> {
        self.viewer
            .frame(width, height)
            .points
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    /// Clear the canvas, stroke every face outline and mark every vertex
    pub fn draw(
        &self,
        ctx: &CanvasRenderingContext2d,
        width: u32,
        height: u32,
    ) -> Result<(), JsValue> {
        let frame = self.viewer.frame(width, height);
        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);

        ctx.set_stroke_style_str(EDGE_COLOR);
        ctx.set_line_width(1.0);
        for face in frame.faces {
            let Some(&first) = face.indices.first() else {
                continue;
            };
            ctx.begin_path();
            ctx.move_to(frame.points[first].x, frame.points[first].y);
            for &idx in &face.indices[1..] {
                ctx.line_to(frame.points[idx].x, frame.points[idx].y);
            }
            ctx.close_path();
            ctx.stroke();
        }

        ctx.set_fill_style_str(VERTEX_COLOR);
        for p in &frame.points {
            ctx.begin_path();
            ctx.arc(p.x, p.y, VERTEX_RADIUS, 0.0, std::f64::consts::TAU)?;
            ctx.fill();
        }

        debug!(vertices = frame.points.len(), faces = frame.faces.len(), "canvas redrawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_points_follow_vertex_order() {
        let mut viewer = WebViewer::new().unwrap();
        viewer.select_solid("octahedron").unwrap();
        let points = viewer.screen_points(200, 200);
        assert_eq!(points.len(), 12);
        // vertex 0 is (0, 0, 1): w = 1 - 1/5 = 0.8, x and y stay centered
        assert!((points[0] - 100.0).abs() < 1e-9);
        assert!((points[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_generators_and_obj_export() {
        let mut viewer = WebViewer::new().unwrap();
        viewer.revolve("1,0,0\n1,0,1", "z", 4).unwrap();
        assert_eq!(viewer.screen_points(100, 100).len(), 20);

        viewer.surface("wave", "-1", "1", "-1", "1", 2).unwrap();
        let text = viewer.to_obj();
        assert!(text.starts_with("# Exported 3D model\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 9);
    }

    #[test]
    fn test_transform_setters() {
        let mut viewer = WebViewer::new().unwrap();
        viewer.set_rotation(90.0, 0.0, 0.0);
        viewer.set_scale(2.0);
        viewer.set_reflection(true, false, true);
        assert!((viewer.viewer.params.rotate_x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(viewer.viewer.params.scale, 2.0);
        assert!(viewer.viewer.params.reflect_xy && viewer.viewer.params.reflect_yz);
    }
}
