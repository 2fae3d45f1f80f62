use crate::units::*;
use cgmath::prelude::*;
use rayon::prelude::*;

use super::messages::ParticleMessage;
use super::particles::ParticleId;
use super::morton;

pub type ParticleIndex = u32;
pub type CellIndex = u64;

#[derive(Copy, Clone)]
struct SortedParticle {
    pidx: ParticleIndex,
    cidx: CellIndex,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CellPos {
    x: u32,
    y: u32,
    z: u32,
}
impl CellPos {
    #[inline]
    fn to_cidx(self) -> CellIndex {
        morton::encode(self.x, self.y, self.z)
    }
}

#[derive(Copy, Clone)]
struct Cell {
    first_particle: ParticleIndex,
    cidx: CellIndex,
}

struct GridProperties {
    cell_size: Real,
    cell_size_inv: Real,
    grid_min: Point,
}
impl GridProperties {
    // Positions outside the representable range are clamped to the border cells.
    // That merges far away cells but never separates particles that are closer than one cell.
    #[inline]
    fn position_to_cellpos(&self, position: Point) -> CellPos {
        let cellspace = (position - self.grid_min) * self.cell_size_inv;
        let clamp = |v: Real| (v.floor() as i64).clamp(0, morton::MORTON_MAX_COORDINATE as i64) as u32;
        CellPos {
            x: clamp(cellspace.x),
            y: clamp(cellspace.y),
            z: clamp(cellspace.z),
        }
    }

    #[inline]
    fn position_to_cidx(&self, position: Point) -> CellIndex {
        self.position_to_cellpos(position).to_cidx()
    }
}

/// Uniform grid over all particles with cells as large as the search radius.
///
/// Particles are sorted by the morton code of their cell, every cell knows the range of its particles.
/// Rebuilt from scratch with [`NeighborhoodSearch::update`] whenever positions changed.
pub struct NeighborhoodSearch {
    grid: GridProperties,
    particles: Vec<SortedParticle>,
    cells: Vec<Cell>,
}

impl NeighborhoodSearch {
    /// * radius: Radius that determines if a point is a neighbor
    pub fn new(radius: Real) -> NeighborhoodSearch {
        NeighborhoodSearch {
            grid: GridProperties {
                cell_size: radius,
                cell_size_inv: 1.0 / radius,
                grid_min: Point::origin(),
            },
            particles: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn radius(&self) -> Real {
        self.grid.cell_size
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len().saturating_sub(1) // sentinel
    }

    pub fn update(&mut self, positions: &[Point]) {
        microprofile::scope!("NeighborhoodSearch", "update");

        // Keep one empty layer of cells below the smallest position so that every particle has all 26 neighbor cells.
        let min = positions.iter().fold(Point::new(Real::MAX, Real::MAX, Real::MAX), |min, p| {
            Point::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z))
        });
        self.grid.grid_min = if min.x.is_finite() && min.y.is_finite() && min.z.is_finite() && min.x < Real::MAX {
            min - Vector::new(self.grid.cell_size, self.grid.cell_size, self.grid.cell_size)
        } else {
            Point::origin()
        };

        let grid = &self.grid;
        self.particles.clear();
        self.particles
            .par_extend(positions.par_iter().enumerate().map(|(pidx, position)| SortedParticle {
                pidx: pidx as ParticleIndex,
                cidx: grid.position_to_cidx(*position),
            }));
        self.particles.par_sort_unstable_by_key(|p| (p.cidx, p.pidx));

        // create cells
        self.cells.clear();
        let mut prev_cidx = CellIndex::MAX;
        for (i, p) in self.particles.iter().enumerate() {
            if p.cidx != prev_cidx {
                self.cells.push(Cell {
                    first_particle: i as ParticleIndex,
                    cidx: p.cidx,
                });
                prev_cidx = p.cidx;
            }
        }
        self.cells.push(Cell {
            first_particle: self.particles.len() as ParticleIndex,
            cidx: CellIndex::MAX,
        }); // sentinel cell, morton codes never reach CellIndex::MAX
    }

    /// Calls `f` for every particle in the cell of `position` and the 26 cells around it.
    ///
    /// Superset of all particles within the search radius, callers need to check distances.
    /// Enumeration order only depends on the positions passed to the last update.
    pub fn foreach_potential_neighbor(&self, position: Point, mut f: impl FnMut(ParticleIndex)) {
        if self.particles.is_empty() {
            return;
        }
        let center = self.grid.position_to_cellpos(position);
        for dz in -1..=1_i64 {
            for dy in -1..=1_i64 {
                for dx in -1..=1_i64 {
                    let x = center.x as i64 + dx;
                    let y = center.y as i64 + dy;
                    let z = center.z as i64 + dz;
                    let range = 0..=morton::MORTON_MAX_COORDINATE as i64;
                    if !range.contains(&x) || !range.contains(&y) || !range.contains(&z) {
                        continue;
                    }
                    let cidx = morton::encode(x as u32, y as u32, z as u32);

                    // the last cell is the sentinel, so every found cell has a successor
                    if let Ok(cell_arrayidx) = self.cells.binary_search_by_key(&cidx, |cell| cell.cidx) {
                        let first_particle = self.cells[cell_arrayidx].first_particle;
                        let last_particle = self.cells[cell_arrayidx + 1].first_particle;
                        for p in first_particle..last_particle {
                            f(self.particles[p as usize].pidx);
                        }
                    }
                }
            }
        }
    }
}

/// How stages enumerate the messages of potential neighbors.
#[derive(Copy, Clone)]
pub enum NeighborQuery<'a> {
    // Every message is a potential neighbor.
    BruteForce,
    // Only messages in the adjacent cells of the partition. Messages need to be indexed like the positions of the last update.
    Partitioned(&'a NeighborhoodSearch),
}

impl<'a> NeighborQuery<'a> {
    /// Calls `f(message, ri_to_rj, r_sq)` for every message closer than `radius` to `position`.
    ///
    /// The message emitted by `id` itself is skipped.
    #[inline]
    pub fn foreach_neighbor_message<M: ParticleMessage>(
        self,
        messages: &[M],
        id: ParticleId,
        position: Point,
        radius: Real,
        mut f: impl FnMut(&M, Vector, Real),
    ) {
        let radius_sq = radius * radius;
        let mut visit = |message: &M| {
            if message.id() == id {
                return;
            }
            let ri_to_rj = message.position() - position;
            let r_sq = ri_to_rj.magnitude2();
            if r_sq < radius_sq {
                f(message, ri_to_rj, r_sq);
            }
        };

        match self {
            NeighborQuery::BruteForce => {
                for message in messages.iter() {
                    visit(message);
                }
            }
            NeighborQuery::Partitioned(search) => {
                search.foreach_potential_neighbor(position, |pidx| visit(&messages[pidx as usize]));
            }
        }
    }
}
