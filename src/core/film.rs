use image::{Rgb, RgbImage};

/// Linear RGB pixels in `[0, 1]`, row-major from the top-left.
pub struct Film {
    width: u32,
    height: u32,
    data: Vec<glam::Vec3A>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![glam::Vec3A::ZERO; pixel_count(width, height)];
        Self {
            width,
            height,
            data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> glam::Vec3A {
        self.data[self.index_of(x, y)]
    }

    /// Copies whole rows starting at row `from`.
    pub fn write_rows(&mut self, from: u32, rows: &[glam::Vec3A]) {
        let start = self.index_of(0, from);
        self.data[start..start + rows.len()].copy_from_slice(rows);
    }

    pub fn to_image(&self) -> RgbImage {
        let mut image: RgbImage = RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                image.put_pixel(x, y, color_to_rgb(self.pixel(x, y)));
            }
        }
        image
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Number of pixels in `width` x `height`, counted in `usize`.
pub fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn color_to_rgb(color: glam::Vec3A) -> Rgb<u8> {
    let r = (color.x * 255.0).clamp(0.0, 255.0) as u8;
    let g = (color.y * 255.0).clamp(0.0, 255.0) as u8;
    let b = (color.z * 255.0).clamp(0.0, 255.0) as u8;
    Rgb([r, g, b])
}
