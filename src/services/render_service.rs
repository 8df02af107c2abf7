use crate::config::RenderConfig;
use crate::models::grade::GradedResult;
use ab_glyph::{Font, PxScale};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use uuid::Uuid;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Line pitch as a multiple of the font size.
const LINE_PITCH_FACTOR: f32 = 1.5;
/// Never produce an image narrower than this, whatever the text measures.
const MIN_WIDTH: u32 = 200;

pub struct RenderService;

impl RenderService {
    /// Renders a graded result into a JPEG report: a title line, one line
    /// per group score, a total line, the indication line and the test id,
    /// on a white canvas sized to the widest wrapped line (capped at the
    /// configured maximum).
    ///
    /// Rendering is not on the correctness-critical path: if JPEG encoding
    /// fails the error is logged and empty bytes are returned instead of
    /// propagating a failure back into the submission flow.
    pub fn render_jpeg(
        title: &str,
        result: &GradedResult,
        indication_text: &str,
        test_id: Uuid,
        font: &impl Font,
        config: &RenderConfig,
    ) -> (Vec<u8>, &'static str) {
        let mut lines: Vec<String> = Vec::new();
        lines.extend(wrap_line(title, config.optimum_line_chars));
        for group in &result.groups {
            lines.extend(wrap_line(
                &format!("{}: {}", group.group_name, group.score),
                config.optimum_line_chars,
            ));
        }
        lines.extend(wrap_line(
            &format!("Total: {}", result.total),
            config.optimum_line_chars,
        ));
        lines.extend(wrap_line(indication_text, config.optimum_line_chars));
        lines.extend(wrap_line(&format!("Test: {}", test_id), config.optimum_line_chars));

        let scale = PxScale::from(config.font_size);
        let margin = (config.font_size / 2.0).ceil() as u32;
        let line_pitch = (config.font_size * LINE_PITCH_FACTOR).ceil() as u32;

        let widest = lines
            .iter()
            .map(|line| text_size(scale, font, line).0)
            .max()
            .unwrap_or(0);
        let width = (widest + margin * 2).max(MIN_WIDTH).min(config.max_width);
        let height = line_pitch * lines.len() as u32 + margin * 2;

        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        for (idx, line) in lines.iter().enumerate() {
            let y = (margin + line_pitch * idx as u32) as i32;
            draw_text_mut(
                &mut canvas,
                Rgb([0, 0, 0]),
                margin as i32,
                y,
                scale,
                font,
                line,
            );
        }

        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, config.jpeg_quality);
        if let Err(err) = encoder.encode_image(&canvas) {
            tracing::error!(%test_id, %err, "failed to encode result report");
            return (Vec::new(), JPEG_CONTENT_TYPE);
        }
        (bytes, JPEG_CONTENT_TYPE)
    }
}

/// Splits a line at whitespace once it exceeds the optimum character budget.
/// Empty input still yields one (empty) line so the report layout keeps its
/// row for it.
fn wrap_line(text: &str, optimum: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() > optimum {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
