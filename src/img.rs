//! "Pretty" image generation to display the generated tree
//!
//! Projects the scene onto the XY plane (a side view, dropping depth) and draws the trunk and
//! twig centerlines as wide strips with leaves as filled dots. This is a debugging snapshot, not
//! a render: no perspective, no occlusion beyond draw order.

use crate::centerline::extract_centerline;
use crate::kernel::MeshKernel;
use crate::scene::SceneState;
use crate::{Error, Float};

use image::{ImageBuffer, Rgba};
use imageproc::drawing::{self, Blend};

/// Creates a color from the provided RGBA integer
///
/// See also: [`rgb`].
///
/// ## Examples
///
/// ```
/// let transparent = rgba(0x00000000);
/// let red_tint = rgba(0xff000077);
/// ```
pub fn rgba(int: u32) -> Color {
    let r = ((int >> 24) & 0xff) as u8;
    let g = ((int >> 16) & 0xff) as u8;
    let b = ((int >> 8) & 0xff) as u8;
    let a = (int & 0xff) as u8;

    Rgba([r, g, b, a])
}

/// Creates a fully opaque color from the provided RGB integer
///
/// See also: [`rgba`].
///
/// ## Panics
///
/// This function panics if the provided integer is greater than `0xffffff`.
pub fn rgb(int: u32) -> Color {
    assert!(int <= 0xffffff);

    rgba((int << 8) + 0xff)
}

/// The color type we're using
pub type Color = Rgba<u8>;

/// Type alias to represent a number of pixels. This is only provided so that the meaning behind
/// types can be more clear.
pub type PixelCount = u32;

/// Configuration items for making an image
#[derive(Debug)]
pub struct ImageConfig {
    /// The width of the produced image
    pub width: PixelCount,
    /// The height of the produced image
    pub height: PixelCount,

    /// Fraction of the image left blank around the scene on each side
    pub padding: Float,

    /// Background color of the image
    pub background: Color,
    /// Color of the trunk strip
    pub trunk_color: Color,
    /// Color of twig strips
    pub twig_color: Color,
    /// Color of leaf dots
    pub leaf_color: Color,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            width: 1024,
            height: 1024,
            padding: 0.08,
            background: rgb(0x10141c),
            trunk_color: rgb(0x6b4a2b),
            twig_color: rgb(0x8a6a3d),
            leaf_color: rgb(0x4f9e3f),
        }
    }
}

/// Helper type alias
type ImageCanvas = Blend<ImageBuffer<Color, Vec<u8>>>;

/// A centerline segment projected into the XY plane, with its draw radius
#[derive(Copy, Clone, Debug)]
struct Strip {
    start: (Float, Float),
    end: (Float, Float),
    radius: Float,
    color: Color,
}

impl Strip {
    /// The four corners of the rotated rectangle covering this strip
    ///
    /// We can't draw the strip as a wide line -- that isn't provided -- so it becomes a polygon
    /// perpendicular-extruded from the segment.
    fn corners(&self) -> [(Float, Float); 4] {
        let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        let len = (dx * dx + dy * dy).sqrt().max(1e-6);
        let (px, py) = (-dy / len * self.radius, dx / len * self.radius);

        [
            (self.start.0 + px, self.start.1 + py),
            (self.start.0 - px, self.start.1 - py),
            (self.end.0 - px, self.end.1 - py),
            (self.end.0 + px, self.end.1 + py),
        ]
    }
}

impl ImageConfig {
    /// Creates an `ImageBuffer` showing the scene's current branch, twigs and leaves
    ///
    /// An empty scene produces a blank background. Twig centerlines are re-extracted from the
    /// kernel so the image reflects whatever deformation the meshes carry right now.
    pub fn make_image<K: MeshKernel>(
        &self,
        kernel: &K,
        state: &SceneState,
    ) -> Result<ImageBuffer<Color, Vec<u8>>, Error> {
        // Blending assumes `self` is the background and `other` the foreground, so drawing in
        // trunk -> twig -> leaf order gives sensible relative depths.
        let mut buf = Blend(ImageBuffer::from_pixel(
            self.width,
            self.height,
            self.background,
        ));

        let mut strips = Vec::new();
        let mut dots: Vec<((Float, Float), Float)> = Vec::new();

        if let Some(branch) = state.branch() {
            let trunk_radius = kernel.radius(branch.mesh)?;
            for pair in branch.centerline.windows(2) {
                strips.push(Strip {
                    start: (pair[0].pos.x, pair[0].pos.y),
                    end: (pair[1].pos.x, pair[1].pos.y),
                    radius: trunk_radius,
                    color: self.trunk_color,
                });
            }

            for twig in &branch.twigs {
                let (height_subdivs, axial_subdivs) = kernel.cylinder_subdivisions(twig.mesh)?;
                let centerline =
                    extract_centerline(kernel, twig.mesh, height_subdivs, axial_subdivs)?;
                for pair in centerline.windows(2) {
                    strips.push(Strip {
                        start: (pair[0].pos.x, pair[0].pos.y),
                        end: (pair[1].pos.x, pair[1].pos.y),
                        radius: twig.radius,
                        color: self.twig_color,
                    });
                }

                for leaf in &twig.leaves {
                    let (min, max) = kernel.bounding_box(leaf.mesh)?;
                    let center = (min + max) * 0.5;
                    let extent = max - min;
                    let radius = (extent.x.max(extent.y).max(extent.z)) * 0.5;
                    dots.push(((center.x, center.y), radius));
                }
            }
        }

        let ctx = match self.fit(&strips, &dots) {
            Some(ctx) => ctx,
            // nothing to draw
            None => return Ok(buf.0),
        };

        for strip in &strips {
            let corners = strip.corners();
            let points = [
                ctx.map(corners[0]),
                ctx.map(corners[1]),
                ctx.map(corners[2]),
                ctx.map(corners[3]),
            ];
            // draw_polygon_mut panics when the polygon closes on itself
            if points[0] != points[3] {
                drawing::draw_polygon_mut(&mut buf, &points, strip.color);
            }
        }

        for &(center, radius) in &dots {
            let (x, y) = ctx.map_raw(center);
            let px_radius = ((radius * ctx.scale).round() as i32).max(1);
            drawing::draw_filled_circle_mut(&mut buf, (x, y), px_radius, self.leaf_color);
        }

        Ok(buf.0)
    }

    /// Derives the world-to-image mapping that fits everything drawable into the frame
    fn fit(&self, strips: &[Strip], dots: &[((Float, Float), Float)]) -> Option<DrawContext> {
        let points = strips
            .iter()
            .flat_map(|s| [s.start, s.end])
            .chain(dots.iter().map(|&(c, _)| c));

        let mut bounds: Option<(Float, Float, Float, Float)> = None;
        for (x, y) in points {
            let b = bounds.get_or_insert((x, y, x, y));
            b.0 = b.0.min(x);
            b.1 = b.1.min(y);
            b.2 = b.2.max(x);
            b.3 = b.3.max(y);
        }
        let (min_x, min_y, max_x, max_y) = bounds?;

        let span_x = (max_x - min_x).max(1e-3);
        let span_y = (max_y - min_y).max(1e-3);
        let usable = 1.0 - 2.0 * self.padding;
        let scale = (self.width as Float * usable / span_x)
            .min(self.height as Float * usable / span_y);

        Some(DrawContext {
            // center the scene in the frame
            offset: (
                (self.width as Float - (min_x + max_x) * scale) / 2.0,
                (self.height as Float - (min_y + max_y) * scale) / 2.0,
            ),
            scale,
            height: self.height,
        })
    }
}

#[derive(Copy, Clone, Debug)]
struct DrawContext {
    /// Pixel offset applied after scaling
    offset: (Float, Float),
    /// Pixels per world unit
    scale: Float,
    /// The height of the image. We need this because drawing has the origin at the top-left
    /// corner, so the image is flipped to put the origin at the bottom-left.
    height: PixelCount,
}

impl DrawContext {
    fn map_raw(&self, p: (Float, Float)) -> (i32, i32) {
        let x = (p.0 * self.scale + self.offset.0).round() as i32;
        let y = (p.1 * self.scale + self.offset.1).round() as i32;
        (x, self.height as i32 - y)
    }

    fn map(&self, p: (Float, Float)) -> imageproc::point::Point<i32> {
        let (x, y) = self.map_raw(p);
        imageproc::point::Point { x, y }
    }
}
