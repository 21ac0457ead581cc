//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, top to bottom: title row with the wallet address, a blank
//! row, the HUD (coins, score, penalties, seconds), the timer bar, a blank
//! row, the framed 3x3 grid, a blank row and a status/hint row. The whole
//! block is centred in the viewport.

use crate::core::GameSnapshot;
use crate::fb::{char_width, CellStyle, FrameBuffer, Rgb};
use crate::types::{
    ItemKind, RoundPhase, ScreenPoint, BOMB_TOKEN, COIN_TOKEN, GRID_SIDE, LOW_TIME_WARNING_SECS,
};

/// Rows above the grid frame: title, blank, HUD, timer bar, blank.
const HEADER_ROWS: u16 = 5;
/// Rows below the grid frame: blank, status.
const FOOTER_ROWS: u16 = 2;

const CELL_KEYS: [char; 9] = ['q', 'w', 'e', 'a', 's', 'd', 'z', 'x', 'c'];

const CONFETTI: [(i16, i16, char); 12] = [
    (-6, 0, '*'),
    (-4, -1, '✦'),
    (-2, -2, '+'),
    (0, -2, '*'),
    (2, -2, '✦'),
    (4, -1, '+'),
    (6, 0, '*'),
    (4, 1, '✦'),
    (2, 2, '+'),
    (-2, 2, '*'),
    (-4, 1, '✦'),
    (0, 2, '+'),
];

const CONFETTI_COLORS: [Rgb; 4] = [
    Rgb::new(255, 215, 0),
    Rgb::new(255, 105, 180),
    Rgb::new(80, 200, 255),
    Rgb::new(120, 230, 120),
];

const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
const LABEL: CellStyle = CellStyle {
    fg: Rgb::new(240, 240, 240),
    bg: Rgb::new(0, 0, 0),
    bold: true,
    dim: false,
};
const HINT: CellStyle = CellStyle {
    fg: Rgb::new(150, 150, 160),
    bg: Rgb::new(0, 0, 0),
    bold: false,
    dim: true,
};
const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Session state shown around the round: wallet and the last status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionView<'a> {
    pub wallet_connected: bool,
    pub address: Option<&'a str>,
    pub status: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    top: u16,
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the fruit grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Roughly square cells on a typical terminal font.
        Self {
            cell_w: 8,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(3),
            cell_h: cell_h.max(1),
        }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = GRID_SIDE as u16 * self.cell_w + 2;
        let frame_h = GRID_SIDE as u16 * self.cell_h + 2;
        let total_h = HEADER_ROWS + frame_h + FOOTER_ROWS;
        let top = viewport.height.saturating_sub(total_h) / 2;
        Layout {
            top,
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: top + HEADER_ROWS,
            frame_w,
            frame_h,
        }
    }

    /// Cell under a screen position, if any.
    ///
    /// Hit-testing uses the resting grid position; the shake offset is purely
    /// cosmetic.
    pub fn cell_at(&self, viewport: Viewport, point: ScreenPoint) -> Option<u8> {
        let l = self.layout(viewport);
        let x0 = l.frame_x + 1;
        let y0 = l.frame_y + 1;
        if point.x < x0 || point.y < y0 {
            return None;
        }
        let col = (point.x - x0) / self.cell_w;
        let row = (point.y - y0) / self.cell_h;
        let side = GRID_SIDE as u16;
        if col >= side || row >= side {
            return None;
        }
        Some((row * side + col) as u8)
    }

    /// Screen position at the middle of `cell`.
    pub fn cell_center(&self, viewport: Viewport, cell: u8) -> ScreenPoint {
        let l = self.layout(viewport);
        let side = GRID_SIDE as u16;
        let col = cell as u16 % side;
        let row = cell as u16 / side;
        ScreenPoint::new(
            l.frame_x + 1 + col * self.cell_w + self.cell_w / 2,
            l.frame_y + 1 + row * self.cell_h + self.cell_h / 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        session: &SessionView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        if !session.wallet_connected {
            self.draw_wallet_gate(fb, session, viewport);
            return;
        }

        let l = self.layout(viewport);
        self.draw_header(fb, session, l);
        self.draw_hud(fb, snap, l);
        self.draw_timer_bar(fb, snap, l);

        // Shake nudges the grid one column left or right every 50ms.
        let shake_dx: i16 = if snap.shaking() {
            if (snap.shake_ms / 50) % 2 == 0 {
                1
            } else {
                -1
            }
        } else {
            0
        };
        let grid = Layout {
            frame_x: offset(l.frame_x, shake_dx).unwrap_or(l.frame_x),
            ..l
        };
        self.draw_grid(fb, snap, grid);

        match snap.phase {
            RoundPhase::Idle => {
                let mid = grid.frame_y + grid.frame_h / 2;
                put_centered(fb, grid.frame_x, grid.frame_w, mid, "Press Enter to start", LABEL);
            }
            RoundPhase::Running => {}
            RoundPhase::Over => self.draw_over_panel(fb, snap, grid),
        }

        if snap.reward.active {
            draw_confetti(fb, ScreenPoint::new(snap.reward.x, snap.reward.y));
        }

        let status_y = l.frame_y + l.frame_h + 1;
        match session.status {
            Some(status) => put_centered(fb, 0, viewport.width, status_y, status, TEXT),
            None => put_centered(fb, 0, viewport.width, status_y, phase_hint(snap.phase), HINT),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        session: &SessionView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, session, viewport, &mut fb);
        fb
    }

    fn draw_wallet_gate(&self, fb: &mut FrameBuffer, session: &SessionView<'_>, viewport: Viewport) {
        let mid = viewport.height / 2;
        let w = viewport.width;
        put_centered(fb, 0, w, mid.saturating_sub(3), "FRUIT WHACK", LABEL);
        put_centered(fb, 0, w, mid.saturating_sub(1), "Connect your wallet to play", TEXT);
        put_centered(
            fb,
            0,
            w,
            mid.saturating_add(1),
            "[Enter] Connect wallet    [Esc] Quit",
            HINT,
        );
        if let Some(status) = session.status {
            put_centered(fb, 0, w, mid.saturating_add(3), status, TEXT);
        }
    }

    fn draw_header(&self, fb: &mut FrameBuffer, session: &SessionView<'_>, l: Layout) {
        fb.put_str(l.frame_x, l.top, "FRUIT WHACK", LABEL);

        // Address right-aligned on the frame edge, dropped if it would
        // collide with the title.
        if let Some(address) = session.address {
            let x = (l.frame_x + l.frame_w).saturating_sub(short_address_width(address));
            if x > l.frame_x + 12 {
                put_short_address(fb, x, l.top, address, HINT);
            }
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        let y = l.top + 2;
        let mut x = fb.put_str(l.frame_x, y, COIN_TOKEN, TEXT);
        x = fb.put_u32(x + 1, y, snap.currency, LABEL);
        x = fb.put_str(x + 2, y, "Score ", TEXT);
        x = fb.put_u32(x, y, snap.score, LABEL);
        x = fb.put_str(x + 2, y, BOMB_TOKEN, TEXT);
        x = fb.put_u32(x + 1, y, snap.penalties, LABEL);
        x = fb.put_str(x, y, "/", HINT);
        fb.put_u32(x, y, snap.penalty_cap, HINT);

        // Seconds, right-aligned on the frame edge.
        let secs = snap.time_remaining_secs;
        let digits = secs.checked_ilog10().map_or(1, |d| d as u16 + 1);
        let sx = (l.frame_x + l.frame_w).saturating_sub(digits + 1);
        let end = fb.put_u32(sx, y, secs, LABEL);
        fb.put_char(end, y, 's', TEXT);
    }

    fn draw_timer_bar(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        let y = l.top + 3;
        let filled = (l.frame_w as f32 * snap.time_fraction()).round() as u16;
        let color = if snap.time_remaining_secs < LOW_TIME_WARNING_SECS {
            Rgb::new(230, 70, 70)
        } else {
            Rgb::new(90, 200, 120)
        };
        fb.fill_rect(l.frame_x, y, filled, 1, '█', CellStyle::fg(color));
        fb.fill_rect(
            l.frame_x + filled,
            y,
            l.frame_w.saturating_sub(filled),
            1,
            '░',
            HINT,
        );
    }

    fn draw_grid(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        draw_border(fb, l.frame_x, l.frame_y, l.frame_w, l.frame_h, BORDER);

        let side = GRID_SIDE as u16;
        for idx in 0..(side * side) {
            let col = idx % side;
            let row = idx / side;
            let px = l.frame_x + 1 + col * self.cell_w;
            let py = l.frame_y + 1 + row * self.cell_h;
            let cell = snap.cells[idx as usize];

            let bg = match cell.map(|c| c.kind) {
                Some(ItemKind::Bomb) => Rgb::new(70, 30, 30),
                Some(ItemKind::Coin) => Rgb::new(70, 60, 20),
                _ if (row + col) % 2 == 0 => Rgb::new(40, 40, 52),
                _ => Rgb::new(32, 32, 42),
            };
            let fill = CellStyle {
                fg: Rgb::new(110, 110, 125),
                bg,
                bold: false,
                dim: true,
            };
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', fill);
            fb.put_char(px, py, CELL_KEYS[idx as usize], fill);

            if let Some(c) = cell {
                let style = CellStyle {
                    fg: Rgb::new(255, 255, 255),
                    bg,
                    bold: true,
                    dim: false,
                };
                let tx = px + self.cell_w / 2 - 1;
                fb.put_str(tx, py + self.cell_h / 2, c.token, style);
            }
        }
    }

    fn draw_over_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        let panel = CellStyle {
            fg: Rgb::new(230, 230, 230),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: false,
        };
        fb.fill_rect(
            l.frame_x + 1,
            l.frame_y + 1,
            l.frame_w.saturating_sub(2),
            l.frame_h.saturating_sub(2),
            ' ',
            panel,
        );

        let mid = l.frame_y + l.frame_h / 2;
        let title = CellStyle { bold: true, ..panel };
        put_centered(fb, l.frame_x, l.frame_w, mid.saturating_sub(2), "GAME OVER", title);

        let row = mid;
        let label_w = "Final score: ".len() as u16;
        let x = l.frame_x + l.frame_w.saturating_sub(label_w + 4) / 2;
        fb.put_str(x, row, "Final score: ", panel);
        fb.put_u32(x + label_w, row, snap.score, title);
        fb.put_str(x, row + 1, "Coins:       ", panel);
        fb.put_u32(x + label_w, row + 1, snap.currency, title);

        put_centered(
            fb,
            l.frame_x,
            l.frame_w,
            row + 3,
            "[p] Claim  [r] Replay",
            CellStyle { dim: true, ..panel },
        );
    }
}

fn phase_hint(phase: RoundPhase) -> &'static str {
    match phase {
        RoundPhase::Idle => "Enter start   Esc quit",
        RoundPhase::Running => "qwe/asd/zxc, 1-9 or click to tap",
        RoundPhase::Over => "p claim   r replay   Esc quit",
    }
}

fn offset(v: u16, d: i16) -> Option<u16> {
    u16::try_from(v as i32 + d as i32).ok()
}

fn text_width(s: &str) -> u16 {
    s.chars().map(char_width).sum()
}

fn put_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let cx = x + w.saturating_sub(text_width(text)) / 2;
    fb.put_str(cx, y, text, style);
}

fn short_address_width(address: &str) -> u16 {
    if address.len() <= 12 || !address.is_ascii() {
        text_width(address)
    } else {
        11
    }
}

/// `0x1234…abcd` without allocating.
fn put_short_address(fb: &mut FrameBuffer, x: u16, y: u16, address: &str, style: CellStyle) {
    if address.len() <= 12 || !address.is_ascii() {
        fb.put_str(x, y, address, style);
        return;
    }
    let mut cx = fb.put_str(x, y, &address[..6], style);
    fb.put_char(cx, y, '…', style);
    cx += 1;
    fb.put_str(cx, y, &address[address.len() - 4..], style);
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Sprinkle confetti around `at`, leaving wide glyphs intact.
fn draw_confetti(fb: &mut FrameBuffer, at: ScreenPoint) {
    for (i, &(dx, dy, ch)) in CONFETTI.iter().enumerate() {
        let (Some(x), Some(y)) = (offset(at.x, dx), offset(at.y, dy)) else {
            continue;
        };
        let Some(under) = fb.get(x, y) else {
            continue;
        };
        if under.is_continuation() || char_width(under.ch) == 2 {
            continue;
        }
        let style = CellStyle {
            fg: CONFETTI_COLORS[i % CONFETTI_COLORS.len()],
            bg: under.style.bg,
            bold: true,
            dim: false,
        };
        fb.put_char(x, y, ch, style);
    }
}
