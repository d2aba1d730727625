extern crate image;
extern crate imageproc;
extern crate rusttype;
extern crate std;

use crate::render;
use crate::result;

const MONOCHROME_THRESHOLD: u8 = 128;

/// Monochrome framebuffer the size of the OLED panel. Text is drawn white on
/// black, and each presented frame can be dumped as a PNG.
pub struct ImageSurface<'a> {
    imgbuf: image::GrayImage,
    font: rusttype::Font<'a>,
    png_out: Option<String>,
    frames_presented: u64,
}

impl ImageSurface<'static> {
    pub fn from_font_file(font_path: &str, png_out: Option<String>) -> result::BartDashResult<ImageSurface<'static>> {
        let font_bytes = std::fs::read(font_path)?;
        let font = rusttype::Font::try_from_vec(font_bytes).ok_or(
            result::make_error(&format!("Not a usable font: {}", font_path)))?;

        return Ok(ImageSurface::new(font, png_out));
    }
}

impl<'a> ImageSurface<'a> {
    pub fn new(font: rusttype::Font<'a>, png_out: Option<String>) -> ImageSurface<'a> {
        return ImageSurface{
            imgbuf: image::GrayImage::new(render::DISPLAY_WIDTH, render::DISPLAY_HEIGHT),
            font: font,
            png_out: png_out,
            frames_presented: 0,
        };
    }
}

impl<'a> render::Surface for ImageSurface<'a> {
    fn clear(&mut self) -> result::BartDashResult<()> {
        for pixel in self.imgbuf.pixels_mut() {
            *pixel = image::Luma([0u8]);
        }
        return Ok(());
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: render::FontId) -> result::BartDashResult<()> {
        imageproc::drawing::draw_text_mut(
            &mut self.imgbuf, image::Luma([255u8]), x, y, scale(font.pixel_height()), &self.font, text);
        return Ok(());
    }

    fn present(&mut self) -> result::BartDashResult<()> {
        // The panel has no gray levels; drop the antialiasing.
        for pixel in self.imgbuf.pixels_mut() {
            pixel.0[0] = if pixel.0[0] >= MONOCHROME_THRESHOLD { 255 } else { 0 };
        }
        self.frames_presented += 1;

        if let Some(ref png_out) = self.png_out {
            self.imgbuf.save(png_out)?;
            debug!("Frame {} written to {}", self.frames_presented, png_out);
        }
        return Ok(());
    }
}

fn scale(s: f32) -> rusttype::Scale {
    return rusttype::Scale{x: s, y: s};
}

/// Stands in for the panel when there is none: logs the text of each frame.
pub struct LogSurface {
    pending: Vec<String>,
}

impl LogSurface {
    pub fn new() -> LogSurface {
        return LogSurface{pending: vec![]};
    }
}

impl render::Surface for LogSurface {
    fn clear(&mut self) -> result::BartDashResult<()> {
        self.pending.clear();
        return Ok(());
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: render::FontId) -> result::BartDashResult<()> {
        self.pending.push(format!("({},{} {:?}) {}", x, y, font, text));
        return Ok(());
    }

    fn present(&mut self) -> result::BartDashResult<()> {
        if self.pending.is_empty() {
            debug!("screen: <blank>");
        } else {
            info!("screen: {}", self.pending.join(" | "));
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::LogSurface;
    use crate::render::{FontId, Surface};

    #[test]
    fn log_surface_collects_one_frame() {
        let mut surface = LogSurface::new();
        surface.draw_text(1, 2, "stale", FontId::Large).unwrap();
        surface.clear().unwrap();
        surface.draw_text(0, 34, "RICHMOND 10 MIN", FontId::Small).unwrap();

        assert_eq!(vec!["(0,34 Small) RICHMOND 10 MIN".to_string()], surface.pending);
        surface.present().unwrap();
    }
}
