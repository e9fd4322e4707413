//! CPU-side RGBA canvas that paints particles as fixed-size squares
//!
//! Renders without GPU dependencies, so the headless runner and tests use it
//! directly and the windowed app uploads it through [`super::Renderer`].

use gravdust_simulation::{DVec2, RenderSink, Rgba, Snapshot};

/// Background color
const BACKGROUND: Rgba = [18, 18, 26, 255];

/// RGBA pixel buffer, row 0 at the top
pub struct Canvas {
    width: u32,
    height: u32,
    /// RGBA pixel buffer (4 bytes per pixel)
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        };
        canvas.clear();
        canvas
    }

    /// Reallocate for a new surface size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        self.clear();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at a pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(color)
    }

    /// Fill the whole canvas with the background color
    pub fn clear(&mut self) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BACKGROUND);
        }
    }

    /// Fill a `size`×`size` square centred on `center`, clipped to the canvas
    pub fn fill_square(&mut self, center: DVec2, size: f64, color: Rgba) {
        let side = size.round().max(1.0) as i64;
        let left = (center.x - size / 2.0).floor() as i64;
        let top = (center.y - size / 2.0).floor() as i64;

        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + side).min(self.width as i64);
        let y1 = (top + side).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let row_stride = self.width as usize * 4;
        for y in y0..y1 {
            let row = y as usize * row_stride;
            let start = row + x0 as usize * 4;
            let end = row + x1 as usize * 4;
            for pixel in self.pixels[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }
}

impl RenderSink for Canvas {
    fn draw(&mut self, snapshot: Snapshot<'_>) {
        self.clear();
        for particle in snapshot.iter() {
            self.fill_square(particle.position, particle.size, particle.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravdust_simulation::{Particle, PresetId, Presets};

    const RED: Rgba = [255, 0, 0, 255];

    #[test]
    fn test_new_canvas_is_background() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
        assert_eq!(canvas.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(canvas.pixel(3, 2), Some(BACKGROUND));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_square_covers_size_by_size() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_square(DVec2::new(10.0, 10.0), 5.0, RED);

        let painted = (0..20)
            .flat_map(|y| (0..20).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(RED))
            .count();
        assert_eq!(painted, 25);
        assert_eq!(canvas.pixel(10, 10), Some(RED));
        assert_eq!(canvas.pixel(7, 7), Some(RED));
        assert_eq!(canvas.pixel(12, 12), Some(BACKGROUND));
    }

    #[test]
    fn test_fill_square_clips_at_edges() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_square(DVec2::new(0.0, 0.0), 5.0, RED);
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(BACKGROUND));

        // Entirely outside: no panic, nothing painted
        canvas.fill_square(DVec2::new(-50.0, 500.0), 5.0, RED);
    }

    #[test]
    fn test_draw_clears_previous_frame() {
        let presets = Presets::new();
        let water = presets.get(PresetId::Water);
        let mut canvas = Canvas::new(50, 50);

        let first = vec![Particle::new(DVec2::new(10.0, 10.0), &water)];
        canvas.draw(Snapshot::new(&first, 5.0));
        assert_eq!(canvas.pixel(10, 10), Some(water.color));

        let second = vec![Particle::new(DVec2::new(40.0, 40.0), &water)];
        canvas.draw(Snapshot::new(&second, 5.0));
        assert_eq!(canvas.pixel(10, 10), Some(BACKGROUND));
        assert_eq!(canvas.pixel(40, 40), Some(water.color));
    }

    #[test]
    fn test_later_particles_paint_on_top() {
        let presets = Presets::new();
        let powder = presets.get(PresetId::Powder);
        let hydrogen = presets.get(PresetId::Hydrogen);
        let mut canvas = Canvas::new(30, 30);

        let particles = vec![
            Particle::new(DVec2::new(15.0, 15.0), &powder),
            Particle::new(DVec2::new(15.0, 15.0), &hydrogen),
        ];
        canvas.draw(Snapshot::new(&particles, 5.0));
        assert_eq!(canvas.pixel(15, 15), Some(hydrogen.color));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_square(DVec2::new(5.0, 5.0), 3.0, RED);
        canvas.resize(20, 5);
        assert_eq!(canvas.width(), 20);
        assert_eq!(canvas.height(), 5);
        assert_eq!(canvas.pixels().len(), 20 * 5 * 4);
        assert_eq!(canvas.pixel(5, 4), Some(BACKGROUND));
    }
}
