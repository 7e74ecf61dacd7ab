//! Canvas 2D drawing of a composed wheel scene

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::palette::{self, to_css};
use super::scene::WheelScene;

/// Draw one frame onto a 2D canvas context
pub fn draw_scene(
    ctx: &CanvasRenderingContext2d,
    scene: &WheelScene<'_>,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    let c = scene.geometry.center;
    let radius = scene.geometry.radius;

    ctx.set_fill_style_str(&to_css(palette::BACKGROUND));
    ctx.fill_rect(0.0, 0.0, width, height);

    // Wedges
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(&to_css(palette::OUTLINE));
    for wedge in &scene.wedges {
        ctx.begin_path();
        ctx.move_to(c.x, c.y);
        ctx.arc(c.x, c.y, radius, wedge.start_angle, wedge.start_angle + wedge.sweep)?;
        ctx.close_path();
        ctx.set_fill_style_str(&to_css(wedge.color));
        ctx.fill();
        if wedge.highlighted {
            ctx.set_fill_style_str(&to_css(palette::HIGHLIGHT));
            ctx.fill();
        }
        ctx.stroke();
    }

    // Labels
    ctx.set_fill_style_str(&to_css(palette::TEXT));
    ctx.set_font(&format!("{}px sans-serif", (radius * 0.08).clamp(10.0, 22.0).round()));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for label in &scene.labels {
        ctx.save();
        ctx.translate(label.pos.x, label.pos.y)?;
        ctx.rotate(label.rotation)?;
        ctx.fill_text(label.text, 0.0, 0.0)?;
        ctx.restore();
    }

    // Hub
    ctx.begin_path();
    ctx.arc(c.x, c.y, scene.geometry.hub_radius, 0.0, std::f64::consts::TAU)?;
    ctx.set_fill_style_str(&to_css(palette::HUB));
    ctx.fill();

    // Pointer
    let p = &scene.pointer;
    ctx.begin_path();
    ctx.move_to(p.tip.x, p.tip.y);
    ctx.line_to(p.base_left.x, p.base_left.y);
    ctx.line_to(p.base_right.x, p.base_right.y);
    ctx.close_path();
    ctx.set_fill_style_str(&to_css(palette::POINTER));
    ctx.fill();

    Ok(())
}
