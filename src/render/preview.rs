use std::path::Path;

use glam::DMat3;

use crate::{
    foundation::core::Vec3,
    foundation::error::{RevealError, RevealResult},
    render::engine::{RenderEngine, RenderSettings},
    render::projection::{RenderKind, RenderObject, RenderableScene},
    scene::material::{BlendMode, Material},
    scene::mesh::MeshPrimitive,
    scene::model::Transform,
};

/// Built-in point-splat rasterizer for previews and offline runs.
///
/// Mesh vertices become small splats, text and image planes become discs at their pivot, all
/// flat-shaded from their material and painted back to front. Lights are ignored.
#[derive(Clone, Debug)]
pub struct PreviewEngine {
    /// Background color (straight RGBA8).
    pub clear_rgba: [u8; 4],
}

impl Default for PreviewEngine {
    fn default() -> Self {
        Self {
            clear_rgba: [18, 20, 28, 255],
        }
    }
}

const PLANE_GRID: u32 = 32;

struct Splat {
    depth: f64,
    x: f64,
    y: f64,
    radius: f64,
    rgba: [f64; 4],
}

/// XYZ Euler rotation matrix (X applied first).
fn rotation(euler: Vec3) -> DMat3 {
    DMat3::from_rotation_z(euler.z) * DMat3::from_rotation_y(euler.y) * DMat3::from_rotation_x(euler.x)
}

fn to_world(t: &Transform, local: Vec3) -> Vec3 {
    t.location + rotation(t.rotation) * (local * t.scale)
}

fn shade(mat: Option<&Material>) -> [f64; 4] {
    let Some(mat) = mat else {
        return [0.8, 0.8, 0.8, 1.0];
    };
    let mix = mat.emission_mix.clamp(0.0, 1.0);
    let glow = mat.emission_strength.max(0.0) / (1.0 + mat.emission_strength.max(0.0));
    let (base, emit) = (mat.base_color, mat.emission_color);
    let c = |b: f64, e: f64| (b * (1.0 - mix) + e * glow * mix * 1.5).clamp(0.0, 1.0);
    let alpha = match mat.blend {
        BlendMode::Opaque => 1.0,
        BlendMode::AlphaBlend => 0.75 * base.a.max(emit.a),
    };
    [c(base.r, emit.r), c(base.g, emit.g), c(base.b, emit.b), alpha]
}

struct Lens {
    origin: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    focal_px: f64,
    cx: f64,
    cy: f64,
}

impl Lens {
    fn new(scene: &RenderableScene, settings: &RenderSettings) -> RevealResult<Self> {
        let cam_obj = scene
            .camera()
            .ok_or_else(|| RevealError::render_engine(scene.frame.0, "scene has no active camera"))?;
        let RenderKind::Camera(cam) = &cam_obj.kind else {
            return Err(RevealError::render_engine(
                scene.frame.0,
                format!("active camera '{}' is not a camera", cam_obj.name),
            ));
        };
        let r = rotation(cam_obj.transform.rotation);
        let w = f64::from(settings.resolution.width);
        Ok(Self {
            origin: cam_obj.transform.location,
            right: r * Vec3::X,
            up: r * Vec3::Y,
            forward: r * Vec3::NEG_Z,
            focal_px: cam.focal_length_mm / cam.sensor_width_mm * w,
            cx: w * 0.5,
            cy: f64::from(settings.resolution.height) * 0.5,
        })
    }

    /// Screen position and depth of a world point, if in front of the camera.
    fn project(&self, p: Vec3) -> Option<(f64, f64, f64)> {
        let d = p - self.origin;
        let depth = d.dot(self.forward);
        if depth <= 0.05 {
            return None;
        }
        let x = self.cx + self.focal_px * d.dot(self.right) / depth;
        let y = self.cy - self.focal_px * d.dot(self.up) / depth;
        Some((x, y, depth))
    }
}

fn splats_for(obj: &RenderObject, scene: &RenderableScene, lens: &Lens, out: &mut Vec<Splat>) {
    let rgba = shade(scene.material_of(obj));
    let mut push = |world: Vec3, size: f64| {
        if let Some((x, y, depth)) = lens.project(world) {
            out.push(Splat {
                depth,
                x,
                y,
                radius: (size * lens.focal_px / depth).max(1.0),
                rgba,
            });
        }
    };

    match &obj.kind {
        RenderKind::Mesh {
            primitive: MeshPrimitive::Plane { size },
            ..
        } => {
            // Planes have too few vertices to read as a surface; splat a grid instead.
            let h = size * 0.5;
            let step = size / f64::from(PLANE_GRID);
            let extent = obj.transform.scale.x.abs().max(obj.transform.scale.y.abs());
            for iy in 0..=PLANE_GRID {
                for ix in 0..=PLANE_GRID {
                    let local = Vec3::new(
                        -h + step * f64::from(ix),
                        -h + step * f64::from(iy),
                        0.0,
                    );
                    push(to_world(&obj.transform, local), step * extent * 0.75);
                }
            }
        }
        RenderKind::Mesh { vertices, .. } => {
            for v in vertices {
                push(to_world(&obj.transform, *v), 0.02);
            }
        }
        RenderKind::Text(text) => push(obj.transform.location, text.size * 0.5),
        RenderKind::ImagePlane(plane) => push(obj.transform.location, plane.size * 0.5),
        RenderKind::Camera(_) | RenderKind::Light(_) => {}
    }
}

fn paint(img: &mut image::RgbaImage, s: &Splat) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let r2 = s.radius * s.radius;
    let x0 = ((s.x - s.radius).floor() as i64).max(0);
    let x1 = ((s.x + s.radius).ceil() as i64).min(w - 1);
    let y0 = ((s.y - s.radius).floor() as i64).max(0);
    let y1 = ((s.y + s.radius).ceil() as i64).min(h - 1);
    let a = s.rgba[3];

    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f64 + 0.5 - s.x;
            let dy = py as f64 + 0.5 - s.y;
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let dst = img.get_pixel_mut(px as u32, py as u32);
            for c in 0..3 {
                let under = f64::from(dst.0[c]) / 255.0;
                dst.0[c] = ((s.rgba[c] * a + under * (1.0 - a)) * 255.0).round() as u8;
            }
            dst.0[3] = 255;
        }
    }
}

impl RenderEngine for PreviewEngine {
    fn name(&self) -> &str {
        "preview"
    }

    fn render_frame(
        &mut self,
        scene: &RenderableScene,
        settings: &RenderSettings,
        out_path: &Path,
    ) -> RevealResult<()> {
        let lens = Lens::new(scene, settings)?;
        let mut splats = Vec::new();
        for obj in &scene.objects {
            splats_for(obj, scene, &lens, &mut splats);
        }
        splats.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let mut img = image::RgbaImage::from_pixel(
            settings.resolution.width,
            settings.resolution.height,
            image::Rgba(self.clear_rgba),
        );
        for s in &splats {
            paint(&mut img, s);
        }

        img.save_with_format(out_path, image::ImageFormat::Png)
            .map_err(|e| {
                RevealError::render_engine(
                    scene.frame.0,
                    format!("failed to write '{}': {e}", out_path.display()),
                )
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
