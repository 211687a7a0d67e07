//! # Headless Renderer
//!
//! Stands in for a real renderer: between ticks it copies the live set out
//! of the world and reduces it to a [`FrameSummary`] instead of pixels.
//! All buffers are sized once, so a frame allocates nothing.

use swarm_core::{EntityView, ScreenBounds, World};

/// What a frame would have drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Entities drawn.
    pub live: usize,
    /// Entities drawn per palette color.
    pub per_color: Vec<usize>,
    /// Distinct `entity_size` grid cells holding at least one entity.
    pub occupied_cells: usize,
}

/// Reads a world between ticks and summarizes it.
pub struct HeadlessRenderer {
    snapshot: Vec<EntityView>,
    occupied: Vec<bool>,
    columns: usize,
    cell_size: i32,
    summary: FrameSummary,
}

impl HeadlessRenderer {
    /// Creates a renderer for a playfield, palette and entity square size.
    #[must_use]
    pub fn new(bounds: ScreenBounds, palette_size: u8, entity_size: i32) -> Self {
        let cell_size = entity_size.max(1);
        let columns = cells_along(bounds.width, cell_size);
        let rows = cells_along(bounds.height, cell_size);

        Self {
            snapshot: Vec::new(),
            occupied: vec![false; columns * rows],
            columns,
            cell_size,
            summary: FrameSummary {
                live: 0,
                per_color: vec![0; usize::from(palette_size)],
                occupied_cells: 0,
            },
        }
    }

    /// Draws one frame from the world's current live set.
    pub fn render<R>(&mut self, world: &World<R>) -> &FrameSummary {
        world.snapshot_into(&mut self.snapshot);

        self.occupied.fill(false);
        self.summary.per_color.fill(0);
        self.summary.occupied_cells = 0;
        self.summary.live = self.snapshot.len();

        for view in &self.snapshot {
            if let Some(count) = self.summary.per_color.get_mut(usize::from(view.color.index)) {
                *count += 1;
            }

            let cell = cell_index(view.position.x, self.cell_size)
                + cell_index(view.position.y, self.cell_size) * self.columns;
            if let Some(slot) = self.occupied.get_mut(cell) {
                if !*slot {
                    *slot = true;
                    self.summary.occupied_cells += 1;
                }
            }
        }

        &self.summary
    }
}

fn cells_along(extent: i32, cell_size: i32) -> usize {
    usize::try_from((extent + cell_size - 1) / cell_size).unwrap_or(0)
}

fn cell_index(coordinate: i32, cell_size: i32) -> usize {
    usize::try_from(coordinate / cell_size).unwrap_or(0)
}
