//! Supply module - next-piece selection and the preview queue
//!
//! The size of the next piece is a weighted draw across configured sizes,
//! where each size weighs its `chance`. The shape is then picked by that
//! size's strategy:
//!
//! - **random**: uniform from the catalog, with replacement
//! - **bag**: every catalog shape once per cycle, refilled when empty
//! - **jit**: generated on demand, no catalog and no uniqueness guarantee
//!
//! Each drawn piece carries the colour chosen for it at draw time.

use std::sync::Arc;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::{color, Catalog, Catalogs};
use crate::config::ConfigError;
use crate::generator::generate;
use crate::shape::Shape;
use crate::types::{ColorScheme, GameConfig, Rgba, SupplyStrategy, MAX_LOOKAHEAD};

/// A drawn piece with its pre-chosen colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedPiece {
    pub shape: Shape,
    pub color: Rgba,
}

#[derive(Debug, Clone)]
enum Source {
    Random(Arc<Catalog>),
    Bag {
        catalog: Arc<Catalog>,
        remaining: Vec<Shape>,
    },
    JustInTime,
}

#[derive(Debug, Clone)]
struct SizeSupply {
    size: u8,
    chance: u32,
    scheme: ColorScheme,
    source: Source,
}

impl SizeSupply {
    fn draw_shape(&mut self, rng: &mut StdRng) -> Shape {
        match &mut self.source {
            Source::Random(catalog) => {
                let index = rng.gen_range(0..catalog.len());
                catalog.shapes()[index].clone()
            }
            Source::Bag { catalog, remaining } => {
                if remaining.is_empty() {
                    remaining.extend_from_slice(catalog.shapes());
                }
                let index = rng.gen_range(0..remaining.len());
                remaining.swap_remove(index)
            }
            Source::JustInTime => generate(self.size, rng),
        }
    }
}

/// Per-size piece selection for one session.
#[derive(Debug, Clone)]
pub struct PieceSupply {
    sizes: Vec<SizeSupply>,
    total_chance: u64,
    rng: StdRng,
}

impl PieceSupply {
    /// Set up every configured size from `catalogs`.
    ///
    /// Sizes using `random` or `bag` need a non-empty catalog of the same size.
    pub fn new(config: &GameConfig, catalogs: &Catalogs, rng: StdRng) -> Result<Self, ConfigError> {
        let mut sizes = Vec::with_capacity(config.polyominoes.len());

        for (&size, poly) in &config.polyominoes {
            if poly.chance == 0 {
                return Err(ConfigError::ZeroChance(size));
            }

            let source = match poly.next_piece {
                SupplyStrategy::JustInTime => Source::JustInTime,
                strategy => {
                    let catalog = catalogs
                        .get(&size)
                        .filter(|c| c.size() == size && !c.is_empty())
                        .cloned()
                        .ok_or(ConfigError::MissingCatalog(size))?;
                    if strategy == SupplyStrategy::Bag {
                        Source::Bag {
                            remaining: catalog.shapes().to_vec(),
                            catalog,
                        }
                    } else {
                        Source::Random(catalog)
                    }
                }
            };

            sizes.push(SizeSupply {
                size,
                chance: poly.chance,
                scheme: poly.colors,
                source,
            });
        }

        if sizes.is_empty() {
            return Err(ConfigError::NoPieceSizes);
        }

        let total_chance = sizes.iter().map(|s| s.chance as u64).sum();
        Ok(Self {
            sizes,
            total_chance,
            rng,
        })
    }

    /// Weighted size choice: each size appears `chance` times in the pool.
    fn pick_size(&mut self) -> usize {
        let mut roll = self.rng.gen_range(0..self.total_chance);
        for (i, size) in self.sizes.iter().enumerate() {
            let chance = size.chance as u64;
            if roll < chance {
                return i;
            }
            roll -= chance;
        }
        self.sizes.len() - 1
    }

    /// Draw the next piece and its colour.
    pub fn draw(&mut self) -> QueuedPiece {
        let index = self.pick_size();
        let entry = &mut self.sizes[index];
        let shape = entry.draw_shape(&mut self.rng);
        let color = color(&shape, entry.scheme, &mut self.rng);
        QueuedPiece { shape, color }
    }

    /// Configured sizes in ascending order.
    pub fn sizes(&self) -> impl Iterator<Item = u8> + '_ {
        self.sizes.iter().map(|s| s.size)
    }

    /// Shapes left in the current bag cycle of `size`, if it uses a bag.
    pub fn bag_remaining(&self, size: u8) -> Option<usize> {
        self.sizes
            .iter()
            .find(|s| s.size == size)
            .and_then(|s| match &s.source {
                Source::Bag { remaining, .. } => Some(remaining.len()),
                _ => None,
            })
    }
}

/// FIFO of upcoming pieces topped up to the look-ahead count.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    supply: PieceSupply,
    /// One slot beyond the look-ahead for the piece being handed out.
    upcoming: ArrayVec<QueuedPiece, { MAX_LOOKAHEAD + 1 }>,
    lookahead: usize,
}

impl PieceQueue {
    /// Create a queue pre-filled with `lookahead` pieces.
    pub fn new(supply: PieceSupply, lookahead: usize) -> Result<Self, ConfigError> {
        if lookahead > MAX_LOOKAHEAD {
            return Err(ConfigError::LookaheadTooLong(lookahead));
        }
        let mut queue = Self {
            supply,
            upcoming: ArrayVec::new(),
            lookahead,
        };
        for _ in 0..lookahead {
            queue.enqueue_next();
        }
        Ok(queue)
    }

    /// Draw a piece and append it to the tail.
    pub fn enqueue_next(&mut self) {
        if self.upcoming.is_full() {
            return;
        }
        let piece = self.supply.draw();
        self.upcoming.push(piece);
    }

    /// Pop the head of the queue.
    pub fn dequeue_current(&mut self) -> Option<QueuedPiece> {
        if self.upcoming.is_empty() {
            return None;
        }
        Some(self.upcoming.remove(0))
    }

    /// Top up the tail and hand out the head.
    pub fn next_piece(&mut self) -> QueuedPiece {
        self.enqueue_next();
        match self.dequeue_current() {
            Some(piece) => piece,
            None => self.supply.draw(),
        }
    }

    /// Upcoming pieces, head first.
    pub fn upcoming(&self) -> &[QueuedPiece] {
        &self.upcoming
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub fn supply(&self) -> &PieceSupply {
        &self.supply
    }
}
