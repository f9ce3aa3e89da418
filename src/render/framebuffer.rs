//! Low-resolution CPU framebuffer, one pixel per screen tile.

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLANK: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Multiplies the colour channels, truncating; alpha is kept.
    #[inline]
    pub fn scale(self, k: f64) -> Color {
        let mul = |v: u8| -> u8 { (v as f64 * k).clamp(0.0, 255.0) as u8 };
        Color::new(mul(self.r), mul(self.g), mul(self.b), self.a)
    }
}

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: Color) { self.current_color = c; }
    #[inline] pub fn set_background_color(&mut self, c: Color) { self.background_color = c; }

    /// Fills `[x, x+w) × [y, y+h)` with the current colour, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x.saturating_add(w)).clamp(0, self.width as i32) as u32;
        let y1 = (y.saturating_add(h)).clamp(0, self.height as i32) as u32;
        if x0 >= x1 {
            return;
        }
        for yy in y0..y1 {
            let row = (yy * self.width) as usize;
            self.color_buffer[row + x0 as usize..row + x1 as usize].fill(self.current_color);
        }
    }

    /// Expands every pixel into a `tile × tile` block of RGBA8 bytes.
    pub fn upscale_rgba(&self, tile: u32) -> Vec<u8> {
        let out_w = (self.width * tile) as usize;
        let mut bytes = Vec::with_capacity(out_w * (self.height * tile) as usize * 4);
        for y in 0..self.height {
            let start_px = (y * self.width) as usize;
            let row = &self.color_buffer[start_px..start_px + self.width as usize];
            let start = bytes.len();
            for c in row {
                for _ in 0..tile {
                    bytes.extend_from_slice(&[c.r, c.g, c.b, c.a]);
                }
            }
            for _ in 1..tile {
                bytes.extend_from_within(start..start + out_w * 4);
            }
        }
        bytes
    }

    /// Raw RGBA8 bytes at native resolution.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.upscale_rgba(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_current_color(Color::WHITE);
        fb.fill_rect(-2, 1, 4, 10);
        assert_eq!(fb.get_pixel(0, 0), Color::BLACK);
        assert_eq!(fb.get_pixel(0, 1), Color::WHITE);
        assert_eq!(fb.get_pixel(1, 2), Color::WHITE);
        assert_eq!(fb.get_pixel(2, 1), Color::BLACK);
    }

    #[test]
    fn fill_rect_with_negative_size_draws_nothing() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_current_color(Color::WHITE);
        fb.fill_rect(3, 3, -2, -2);
        assert!(fb.color_buffer.iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn pixel_writes_outside_the_buffer_are_dropped() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_pixel_color(2, 0, Color::WHITE);
        fb.set_pixel_color(0, 2, Color::WHITE);
        assert!(fb.color_buffer.iter().all(|&c| c == Color::BLACK));
        fb.set_pixel_color(1, 1, Color::WHITE);
        assert_eq!(fb.get_pixel(1, 1), Color::WHITE);
    }

    #[test]
    fn upscale_repeats_each_pixel_in_a_block() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_pixel_color(1, 0, Color::rgb(10, 20, 30));
        let bytes = fb.upscale_rgba(2);
        assert_eq!(bytes.len(), 4 * 2 * 4);
        let px = |x: usize, y: usize| &bytes[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(px(0, 0), &[0, 0, 0, 255]);
        assert_eq!(px(2, 0), &[10, 20, 30, 255]);
        assert_eq!(px(3, 1), &[10, 20, 30, 255]);
        assert_eq!(px(1, 1), &[0, 0, 0, 255]);
    }

    #[test]
    fn scale_truncates_channels() {
        assert_eq!(Color::rgb(255, 0, 100).scale(0.8), Color::rgb(204, 0, 80));
    }
}
