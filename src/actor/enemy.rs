//! Enemy chain: segment state machine, segment actor and spawner.
//!
//! A segment enters on [`Board::ENEMY_START_ROW`] just inside the right
//! edge and crawls left one column per tick. Once its head leaves the
//! grid, the part that slid off is mirrored onto the row below, crawling
//! right. When the mirrored copy has crossed the whole grid the segment
//! drops two rows and starts over, until it passes
//! [`Board::ENEMY_BOTTOM_ROW`].

use super::{spawn_actor, ActorHandle, Pacer};
use crate::error::EngineError;
use crate::layout::{Board, GAME_COLS};
use crate::sprites::{self, Sprite, ANIM_FRAMES};
use crate::state::Shared;
use crate::surface::RenderSurface;
use std::sync::Arc;
use std::time::Duration;

/// Which way a sprite copy is crawling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Towards column 0.
    Leftward,
    /// Towards the right edge, one row down.
    Rightward,
}

impl Heading {
    /// Glyph table for this heading.
    pub const fn sprite(self) -> Sprite {
        match self {
            Self::Leftward => sprites::ENEMY_LEFTWARD,
            Self::Rightward => sprites::ENEMY_RIGHTWARD,
        }
    }
}

/// One drawn copy of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Top row.
    pub row: i32,
    /// Left column; may be off-grid.
    pub col: i32,
    /// Which glyph table to draw.
    pub heading: Heading,
}

/// Position and animation of one enemy segment.
#[derive(Debug, Clone)]
pub struct EnemySegment {
    id: usize,
    row: i32,
    col: i32,
    anim_frame: usize,
    width: i32,
    grid_width: i32,
    /// Placements currently on screen.
    painted: Vec<Placement>,
}

impl EnemySegment {
    /// Segment `index` of a wave, queued `index` sprite widths off the right edge.
    pub fn new(id: usize, index: usize) -> Self {
        let width = i32::from(sprites::ENEMY_LEFTWARD.width());
        let grid_width = i32::from(GAME_COLS);
        let offset = i32::try_from(index).unwrap_or(i32::MAX / 2).saturating_mul(width);
        Self {
            id,
            row: Board::ENEMY_START_ROW,
            col: (grid_width - width).saturating_add(offset),
            anim_frame: 0,
            width,
            grid_width,
            painted: Vec::new(),
        }
    }

    /// Identifier within the chain.
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Current sweep row.
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Current head column; negative once the head has left the grid.
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Column every sweep starts from.
    pub const fn start_col(&self) -> i32 {
        self.grid_width - self.width
    }

    /// Where the segment is drawn this tick.
    pub fn placements(&self) -> Vec<Placement> {
        let mut out = Vec::with_capacity(2);
        if self.col > -self.width {
            out.push(Placement {
                row: self.row,
                col: self.col,
                heading: Heading::Leftward,
            });
        }
        if self.col < 0 {
            out.push(Placement {
                row: self.row + 1,
                col: self.col.abs() - self.width,
                heading: Heading::Rightward,
            });
        }
        out
    }

    /// Advance one tick: next animation frame, one column left, and a
    /// two-row drop once the sweep has crossed the grid.
    pub fn advance(&mut self) {
        self.anim_frame = (self.anim_frame + 1) % ANIM_FRAMES;
        self.col -= 1;
        if self.col < -self.grid_width {
            self.col = self.start_col();
            self.row += 2;
        }
    }

    /// Whether the segment has passed the bottom of the enemy field.
    pub const fn is_done(&self) -> bool {
        self.row > Board::ENEMY_BOTTOM_ROW
    }

    /// Clear whatever this segment last drew.
    pub fn erase<S: RenderSurface>(&mut self, surface: &mut S) {
        for placement in self.painted.drain(..) {
            let sprite = placement.heading.sprite();
            surface.clear_region(placement.row, placement.col, sprite.height(), sprite.width());
        }
    }

    /// Clear the previous placements and draw the current ones.
    pub fn repaint<S: RenderSurface>(&mut self, surface: &mut S) {
        self.erase(surface);
        for placement in self.placements() {
            let sprite = placement.heading.sprite();
            surface.draw_glyphs(placement.row, placement.col, sprite.frame(self.anim_frame), sprite.color());
            self.painted.push(placement);
        }
    }
}

/// Thread body driving one segment of the chain.
pub struct SegmentActor<S> {
    shared: Arc<Shared<S>>,
    id: usize,
    tick: Duration,
}

impl<S: RenderSurface> SegmentActor<S> {
    /// An actor for the segment with `id`, which must already be in the chain.
    pub const fn new(shared: Arc<Shared<S>>, id: usize, tick: Duration) -> Self {
        Self { shared, id, tick }
    }

    /// Repaint and advance once. Returns `false` once the segment is gone.
    pub fn step(&self) -> bool {
        self.shared.with_caterpillar(|chain, screen| {
            let Some(segment) = chain.get_mut(self.id) else {
                return false;
            };
            screen.paint(|surface| segment.repaint(surface));
            segment.advance();
            if !segment.is_done() {
                return true;
            }
            screen.paint(|surface| segment.erase(surface));
            chain.remove(self.id);
            false
        })
    }

    /// Crawl until the bottom is reached or the game stops.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other actors.
    pub fn run(self) -> Result<(), EngineError> {
        let mut pacer = Pacer::new(self.tick);
        while self.shared.is_running() {
            if !self.step() {
                tracing::debug!(segment = self.id, "segment reached the bottom");
                break;
            }
            pacer.wait();
        }
        Ok(())
    }
}

/// Creates enemy waves and waits on them.
pub struct EnemySpawner<S> {
    shared: Arc<Shared<S>>,
    tick: Duration,
    segments: usize,
    respawn: bool,
}

impl<S: RenderSurface + 'static> EnemySpawner<S> {
    /// A spawner producing waves of `segments` segments.
    pub const fn new(shared: Arc<Shared<S>>, tick: Duration, segments: usize, respawn: bool) -> Self {
        Self {
            shared,
            tick,
            segments,
            respawn,
        }
    }

    fn launch_segment(&self, actor: SegmentActor<S>) -> Result<ActorHandle, EngineError> {
        spawn_actor("segment", &self.shared, move || actor.run())
    }

    /// Insert one wave, start its segments through `launch` and wait for
    /// them all to finish.
    ///
    /// If a launch fails, the failed segment is taken back out of the
    /// chain, the game is stopped and the segments already running are
    /// joined before the error is returned.
    fn run_wave<L>(&self, wave: usize, mut launch: L) -> Result<(), EngineError>
    where
        L: FnMut(SegmentActor<S>) -> Result<ActorHandle, EngineError>,
    {
        let mut handles = Vec::with_capacity(self.segments);
        let mut failure = None;
        for index in 0..self.segments {
            let id = wave * self.segments + index;
            self.shared.with_caterpillar(|chain, _| chain.insert(EnemySegment::new(id, index)));
            match launch(SegmentActor::new(Arc::clone(&self.shared), id, self.tick)) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    self.shared.with_caterpillar(|chain, _| chain.remove(id));
                    failure = Some(err);
                    break;
                }
            }
        }
        tracing::info!(wave, segments = handles.len(), "enemy wave started");
        if failure.is_some() {
            self.shared.stop();
        }
        for handle in handles {
            if let Err(err) = handle.join() {
                tracing::error!(error = %err, "segment actor failed");
            }
        }
        match failure {
            Some(err) => {
                tracing::error!(wave, error = %err, "enemy wave aborted");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Run waves until the game stops.
    ///
    /// With no segments configured the spawner just idles.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Spawn`] if a segment thread could not be
    /// started; the game is stopped first.
    pub fn run(self) -> Result<(), EngineError> {
        let mut pacer = Pacer::new(self.tick);
        let mut wave = 0;
        while self.segments > 0 && self.shared.is_running() {
            self.run_wave(wave, |actor| self.launch_segment(actor))?;
            wave += 1;
            if !self.respawn {
                break;
            }
            pacer.wait();
        }
        while self.shared.is_running() {
            pacer.wait();
        }
        Ok(())
    }
}
