//! Connected-component scanning over an alpha mask.
//!
//! Regions are grown breadth-first over the 4-neighbourhood with an explicit
//! worklist, so large sprites never recurse.

use std::collections::VecDeque;

use crate::types::{AlphaMask, Component};

/// Finds 4-connected sprite regions in a mask.
#[derive(Debug, Clone, Copy)]
pub struct ComponentScanner {
    pub min_pixels: usize,
}

impl ComponentScanner {
    pub fn new(min_pixels: usize) -> Self {
        Self { min_pixels }
    }

    /// Scan the mask and return every region with at least `min_pixels` cells.
    ///
    /// Components come back in discovery order: row-major by their first
    /// pixel. Regions below the threshold are dropped, but their cells stay
    /// visited and never join a later region.
    pub fn scan(&self, mask: &AlphaMask) -> Vec<Component> {
        let (w, h) = (mask.width(), mask.height());
        let mut visited = vec![false; w * h];
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        let mut components = Vec::new();

        for y in 0..h {
            for x in 0..w {
                if visited[y * w + x] || !mask.get(x, y) {
                    continue;
                }

                visited[y * w + x] = true;
                queue.push_back((x, y));

                let mut pixels = 0usize;
                let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);

                while let Some((cx, cy)) = queue.pop_front() {
                    pixels += 1;
                    min_x = min_x.min(cx);
                    max_x = max_x.max(cx);
                    min_y = min_y.min(cy);
                    max_y = max_y.max(cy);

                    let neighbours = [
                        (cx, cy.wrapping_sub(1)),
                        (cx, cy + 1),
                        (cx.wrapping_sub(1), cy),
                        (cx + 1, cy),
                    ];

                    // Wrapped coordinates land out of bounds and read as unset.
                    for (nx, ny) in neighbours {
                        if mask.get(nx, ny) && !visited[ny * w + nx] {
                            visited[ny * w + nx] = true;
                            queue.push_back((nx, ny));
                        }
                    }
                }

                if pixels >= self.min_pixels {
                    components.push(Component::new(
                        min_x as u32,
                        min_y as u32,
                        max_x as u32,
                        max_y as u32,
                        pixels,
                    ));
                }
            }
        }

        components
    }
}
