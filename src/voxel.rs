//! Voxel mesh triangulation
//!
//! Binary marching squares over an image: dark pixels mark solid voxels,
//! and every 2x2 block of voxels forms a cell whose 4-bit corner pattern
//! picks its geometry from a lookup table. Edge vertices sit at cell-edge
//! midpoints; there is no interpolation.
//!
//! Cell layout, with `a` at the cell's lower-left voxel:
//!
//! ```text
//!   c ── Cd ── d
//!   │         │
//!   Ac        Bd
//!   │         │
//!   a ── Ab ── b
//! ```

use glam::{Vec2, Vec3};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::Result;

/// One sample point of the grid
#[derive(Debug, Clone, Copy)]
pub struct Voxel {
    pub solid: bool,
    /// Center of the voxel's cell
    pub position: Vec2,
    /// Midpoint toward the +x neighbor
    pub x_edge: Vec2,
    /// Midpoint toward the +y neighbor
    pub y_edge: Vec2,
}

impl Voxel {
    fn new(x: u32, y: u32, size: f32) -> Self {
        let position = Vec2::new((x as f32 + 0.5) * size, (y as f32 + 0.5) * size);
        Self {
            solid: false,
            position,
            x_edge: position + Vec2::new(size * 0.5, 0.0),
            y_edge: position + Vec2::new(0.0, size * 0.5),
        }
    }
}

/// A rectangular field of voxels sampled from an image, row-major with
/// row 0 at the bottom
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    width: u32,
    height: u32,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Sample a grid from an image: a pixel at or below `threshold` luma
    /// (0 is black) marks its voxel solid. Image rows run top-down, so
    /// they are flipped to keep the mesh oriented like the picture.
    pub fn from_image(image: &image::DynamicImage, cell_size: f32, threshold: u8) -> Self {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();

        let mut voxels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let mut voxel = Voxel::new(x, y, cell_size);
                voxel.solid = luma.get_pixel(x, height - 1 - y).0[0] <= threshold;
                voxels.push(voxel);
            }
        }

        Self {
            width,
            height,
            voxels,
        }
    }

    pub fn load(path: &Path, cell_size: f32, threshold: u8) -> Result<Self> {
        let image = image::open(path)?;
        let grid = Self::from_image(&image, cell_size, threshold);
        info!(
            path = %path.display(),
            width = grid.width,
            height = grid.height,
            solid = grid.voxels.iter().filter(|v| v.solid).count(),
            "Sampled voxel grid"
        );
        Ok(grid)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Walk every cell and emit its case geometry
    pub fn triangulate(&self) -> Mesh {
        let mut mesh = Mesh::default();
        if self.width < 2 || self.height < 2 {
            return mesh;
        }

        let stride = self.width as usize;
        for y in 0..(self.height - 1) as usize {
            for x in 0..(self.width - 1) as usize {
                let i = y * stride + x;
                triangulate_cell(
                    &mut mesh,
                    [
                        &self.voxels[i],
                        &self.voxels[i + 1],
                        &self.voxels[i + stride],
                        &self.voxels[i + stride + 1],
                    ],
                );
            }
        }
        mesh
    }
}

/// Points a cell's geometry can reference: the four corner voxel centers
/// and the four edge midpoints between them
#[derive(Debug, Clone, Copy)]
enum CellPoint {
    A,
    B,
    C,
    D,
    Ab,
    Ac,
    Bd,
    Cd,
}

use CellPoint::*;

/// Geometry per 4-bit corner pattern (bit 0 = a, 1 = b, 2 = c, 3 = d).
/// Each entry lists convex polygons to emit as triangle fans. The table
/// is plain data; swapping it out changes the meshing style without
/// touching the walker.
const CASES: [&[&[CellPoint]]; 16] = [
    &[],                             // 0b0000
    &[&[A, Ac, Ab]],                 // 0b0001
    &[&[B, Ab, Bd]],                 // 0b0010
    &[&[A, Ac, Bd, B]],              // 0b0011
    &[&[C, Cd, Ac]],                 // 0b0100
    &[&[A, C, Cd, Ab]],              // 0b0101
    &[&[B, Ab, Bd], &[C, Cd, Ac]],   // 0b0110 (saddle)
    &[&[A, C, Cd, Bd, B]],           // 0b0111
    &[&[D, Bd, Cd]],                 // 0b1000
    &[&[A, Ac, Ab], &[D, Bd, Cd]],   // 0b1001 (saddle)
    &[&[Ab, Cd, D, B]],              // 0b1010
    &[&[B, A, Ac, Cd, D]],           // 0b1011
    &[&[Ac, C, D, Bd]],              // 0b1100
    &[&[C, D, Bd, Ab, A]],           // 0b1101
    &[&[D, B, Ab, Ac, C]],           // 0b1110
    &[&[A, C, D, B]],                // 0b1111
];

fn triangulate_cell(mesh: &mut Mesh, corners: [&Voxel; 4]) {
    let mut cell = 0usize;
    for (bit, voxel) in corners.iter().enumerate() {
        if voxel.solid {
            cell |= 1 << bit;
        }
    }

    for polygon in CASES[cell] {
        let mut points = [Vec3::ZERO; 5];
        for (slot, point) in points.iter_mut().zip(polygon.iter()) {
            *slot = resolve(*point, &corners).extend(0.0);
        }
        match polygon.len() {
            3 => mesh.add_triangle(points[0], points[1], points[2]),
            4 => mesh.add_quad(points[0], points[1], points[2], points[3]),
            _ => mesh.add_pentagon(points[0], points[1], points[2], points[3], points[4]),
        }
    }
}

fn resolve(point: CellPoint, corners: &[&Voxel; 4]) -> Vec2 {
    let [a, b, c, d] = corners;
    match point {
        A => a.position,
        B => b.position,
        C => c.position,
        D => d.position,
        Ab => a.x_edge,
        Ac => a.y_edge,
        Bd => b.y_edge,
        Cd => c.x_edge,
    }
}

/// Triangle mesh assembled from cell geometry
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
}

impl Mesh {
    pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.add_fan(&[a, b, c]);
    }

    pub fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        self.add_fan(&[a, b, c, d]);
    }

    pub fn add_pentagon(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, e: Vec3) {
        self.add_fan(&[a, b, c, d, e]);
    }

    /// Fan a convex polygon into triangles from its first vertex
    fn add_fan(&mut self, points: &[Vec3]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(points);
        for i in 1..points.len() as u32 - 1 {
            self.triangles.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Render as Wavefront OBJ with 1-based face indices
    pub fn to_obj(&self) -> String {
        let mut out = String::new();
        for v in &self.vertices {
            let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
        }
        for face in self.triangles.chunks_exact(3) {
            let _ = writeln!(out, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1);
        }
        out
    }

    pub fn save_obj(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_obj())?;
        info!(
            path = %path.display(),
            vertices = self.vertices.len(),
            triangles = self.triangle_count(),
            "Wrote mesh"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a grid from rows of '#' (solid) and '.' (empty), listed
    /// top-down like the picture they came from
    fn grid(rows: &[&str]) -> VoxelGrid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let image = image::GrayImage::from_fn(width, height, |x, y| {
            let solid = rows[y as usize].as_bytes()[x as usize] == b'#';
            image::Luma([if solid { 0u8 } else { 255 }])
        });
        VoxelGrid::from_image(&image::DynamicImage::ImageLuma8(image), 10.0, 0)
    }

    #[test]
    fn test_empty_grid_yields_empty_mesh() {
        let mesh = grid(&["..", ".."]).triangulate();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn test_full_cell_is_one_quad() {
        let mesh = grid(&["##", "##"]).triangulate();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);

        // Corner voxel centers at half-cell offsets
        assert!(mesh.vertices.contains(&Vec3::new(5.0, 5.0, 0.0)));
        assert!(mesh.vertices.contains(&Vec3::new(15.0, 15.0, 0.0)));
    }

    #[test]
    fn test_single_corner_is_one_triangle() {
        // Only the bottom-left voxel is solid
        let mesh = grid(&["..", "#."]).triangulate();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.triangle_count(), 1);

        // The solid corner itself plus the two edge midpoints beside it
        assert!(mesh.vertices.contains(&Vec3::new(5.0, 5.0, 0.0)));
        assert!(mesh.vertices.contains(&Vec3::new(10.0, 5.0, 0.0)));
        assert!(mesh.vertices.contains(&Vec3::new(5.0, 10.0, 0.0)));
    }

    #[test]
    fn test_saddle_emits_two_triangles() {
        let mesh = grid(&[".#", "#."]).triangulate();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.len(), 6);
    }

    #[test]
    fn test_three_corners_emit_a_pentagon() {
        let mesh = grid(&["#.", "##"]).triangulate();
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.triangle_count(), 3);
    }

    #[test]
    fn test_half_filled_cell_is_one_quad() {
        // Bottom row solid: corners a and b
        let mesh = grid(&["..", "##"]).triangulate();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);

        // Quad spans the two solid corners and the side edge midpoints
        assert!(mesh.vertices.contains(&Vec3::new(5.0, 10.0, 0.0)));
        assert!(mesh.vertices.contains(&Vec3::new(15.0, 10.0, 0.0)));
    }

    #[test]
    fn test_wider_grid_walks_every_cell() {
        // A solid 3x2 block: two full cells side by side
        let mesh = grid(&["###", "###"]).triangulate();
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_degenerate_grid_has_no_cells() {
        let mesh = grid(&["###"]).triangulate();
        assert!(mesh.triangles.is_empty());
    }

    #[test]
    fn test_obj_output_counts_match() {
        let mesh = grid(&["#.", "##"]).triangulate();
        let obj = mesh.to_obj();

        let vertex_lines = obj.lines().filter(|l| l.starts_with("v ")).count();
        let face_lines = obj.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(vertex_lines, mesh.vertices.len());
        assert_eq!(face_lines, mesh.triangle_count());

        // OBJ faces are 1-based
        assert!(obj.lines().any(|l| l == "f 1 2 3"));
    }
}
