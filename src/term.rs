use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use orbitview::{PixelBuffer, Rgba};
use std::io::{self, Write};

const UPPER_HALF: char = '▀';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    let mut xx = x;
    for ch in s.chars() {
        if xx >= buf.w {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg });
        xx += 1;
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Placement of the pixel buffer inside the terminal, in half-block sub-pixels
/// (one column wide, half a row tall).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Letterbox {
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    /// Sub-pixels per buffer pixel.
    pub(crate) scale: f64,
}

impl Letterbox {
    pub(crate) fn fit(buf_w: u32, buf_h: u32, cols: u16, rows: u16) -> Self {
        let area_w = cols as f64;
        let area_h = rows as f64 * 2.0;
        let scale = (area_w / buf_w.max(1) as f64).min(area_h / buf_h.max(1) as f64);
        Self {
            x0: (area_w - buf_w as f64 * scale) / 2.0,
            y0: (area_h - buf_h as f64 * scale) / 2.0,
            scale,
        }
    }

    /// Buffer pixels covered by one column and one row of cells.
    pub(crate) fn pixels_per_cell(&self) -> (f64, f64) {
        if self.scale <= 0.0 {
            return (0.0, 0.0);
        }
        (1.0 / self.scale, 2.0 / self.scale)
    }
}

// Box-average the buffer over [fx0, fx1) x [fy0, fy1), at least one pixel.
fn sample_box(buf: &PixelBuffer, fx0: f64, fy0: f64, fx1: f64, fy1: f64) -> Option<Rgba> {
    let w = buf.width() as i64;
    let h = buf.height() as i64;
    let ix0 = (fx0.floor() as i64).clamp(0, w);
    let iy0 = (fy0.floor() as i64).clamp(0, h);
    let ix1 = (fx1.ceil() as i64).max(ix0 + 1).min(w);
    let iy1 = (fy1.ceil() as i64).max(iy0 + 1).min(h);
    if ix0 >= ix1 || iy0 >= iy1 {
        return None;
    }

    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
    for y in iy0..iy1 {
        for x in ix0..ix1 {
            if let Some(c) = buf.get(x, y) {
                r += c.r as u32;
                g += c.g as u32;
                b += c.b as u32;
                n += 1;
            }
        }
    }
    if n == 0 {
        return None;
    }
    Some(Rgba::new((r / n) as u8, (g / n) as u8, (b / n) as u8, 0xFF))
}

/// Downsample `buf` into rows `top..` of `out`, two sub-pixels per cell.
pub(crate) fn pixels_to_cells(buf: &PixelBuffer, out: &mut CellBuffer, top: u16, lb: Letterbox) {
    if lb.scale <= 0.0 {
        return;
    }
    let inv = 1.0 / lb.scale;
    let rows = out.h.saturating_sub(top);

    let sub = |sx: f64, sy: f64| -> Option<Rgba> {
        let fx0 = (sx - lb.x0) * inv;
        let fy0 = (sy - lb.y0) * inv;
        if fx0 + inv <= 0.0 || fy0 + inv <= 0.0 {
            return None;
        }
        sample_box(buf, fx0, fy0, fx0 + inv, fy0 + inv)
    };

    for row in 0..rows {
        for col in 0..out.w {
            let top_px = sub(col as f64, row as f64 * 2.0);
            let bot_px = sub(col as f64, row as f64 * 2.0 + 1.0);
            if top_px.is_none() && bot_px.is_none() {
                continue;
            }
            out.set(
                col,
                row + top,
                Cell {
                    ch: UPPER_HALF,
                    fg: to_color(top_px.unwrap_or(Rgba::BLACK)),
                    bg: to_color(bot_px.unwrap_or(Rgba::BLACK)),
                },
            );
        }
    }
}

/// Full-screen raw-mode terminal; restored on drop.
pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        let setup = execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )
        .and_then(|_| terminal::size());

        // no guard exists yet, so undo by hand
        let (cols, rows) = match setup {
            Ok(size) => size,
            Err(e) => {
                restore(&mut out);
                return Err(e.into());
            }
        };
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        execute!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Write the cells that changed since the last call.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.out);
    }
}

fn write_leave<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        EndSynchronizedUpdate,
        ResetColor,
        DisableMouseCapture,
        cursor::Show,
        EnableLineWrap,
        LeaveAlternateScreen
    )
}

/// Best effort: leave the alternate screen and raw mode.
fn restore<W: Write>(out: &mut W) {
    let _ = write_leave(out);
    let _ = terminal::disable_raw_mode();
}
