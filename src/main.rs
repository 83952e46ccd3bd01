use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use chrysanthemum::{
    dip_to_px, present, Color, MeasureSpec, Pixmap, RasterCanvas, SpinnerOptions, SpinnerView,
    Tick,
};

/// Start color of the second spinner, so the demo shows the styling
/// plumbing and not two identical widgets.
const ALT_START_COLOR: Color = Color::rgb(0x40, 0xC4, 0xFF);

const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(author, version, about = "Terminal demo host for the radial fade spinner")]
struct Cli {
    /// Cycle duration in milliseconds for both spinners.
    #[arg(long, default_value_t = 1500)]
    duration: u64,

    /// Number of radial segments.
    #[arg(long)]
    line_count: Option<usize>,

    /// Color of the brightest segment, e.g. '#FFFFFFFF'.
    #[arg(long)]
    start_color: Option<Color>,

    /// Color the trailing segments fade towards.
    #[arg(long)]
    end_color: Option<Color>,

    /// Square size of each spinner in density-independent units.
    #[arg(long, default_value_t = 40.0)]
    size: f32,

    /// Display density scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Load spinner styling from a YAML file; flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render a single frame to a PNG file and exit.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> Result<SpinnerOptions> {
        let mut options = match &self.config {
            Some(path) => SpinnerOptions::from_yaml_file(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => SpinnerOptions::default(),
        };
        if let Some(line_count) = self.line_count {
            options.line_count = line_count;
        }
        if let Some(start_color) = self.start_color {
            options.start_color = start_color;
        }
        if let Some(end_color) = self.end_color {
            options.end_color = end_color;
        }
        Ok(options.sanitized())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.options()?;

    // The host screen instantiates two spinners, the second restyled.
    let mut spinners = [
        SpinnerView::new(options.clone()),
        SpinnerView::new(SpinnerOptions { start_color: ALT_START_COLOR, ..options }),
    ];
    let size_px = dip_to_px(cli.size, cli.scale);
    for spinner in &mut spinners {
        spinner.measure(MeasureSpec::AtMost(size_px), MeasureSpec::AtMost(size_px), cli.scale);
    }

    if let Some(path) = &cli.snapshot {
        return snapshot(&spinners, path);
    }

    let duration = Duration::from_millis(cli.duration.max(1));
    for spinner in &mut spinners {
        spinner.start_animation_with(duration);
    }

    let result = run_loop(&mut spinners);

    for spinner in &mut spinners {
        spinner.detach();
    }
    result
}

/// Render one frame of both spinners side by side into a PNG.
fn snapshot(spinners: &[SpinnerView; 2], path: &std::path::Path) -> Result<()> {
    let size = spinners[0].geometry().size;
    let gap = size / 4;
    let mut pixmap = Pixmap::new(size * 2 + gap, size);
    let mut canvas = RasterCanvas::new(&mut pixmap);
    spinners[0].render(&mut canvas);
    // The second spinner sits to the right of the first.
    let mut shifted = ShiftedCanvas { inner: &mut canvas, dx: (size + gap) as f32 };
    spinners[1].render(&mut shifted);
    pixmap
        .save_png(path)
        .with_context(|| format!("writing snapshot to {}", path.display()))?;
    Ok(())
}

/// Canvas adapter that offsets all drawing horizontally.
struct ShiftedCanvas<'a, C> {
    inner: &'a mut C,
    dx: f32,
}

impl<C: chrysanthemum::Canvas> chrysanthemum::Canvas for ShiftedCanvas<'_, C> {
    fn save(&mut self) {
        self.inner.save();
    }

    fn restore(&mut self) {
        self.inner.restore();
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.inner.rotate(degrees, px + self.dx, py);
    }

    fn draw_line(
        &mut self,
        from: chrysanthemum::Point,
        to: chrysanthemum::Point,
        paint: &chrysanthemum::LinePaint,
    ) {
        let shift = |p: chrysanthemum::Point| chrysanthemum::Point::new(p.x + self.dx, p.y);
        self.inner.draw_line(shift(from), shift(to), paint);
    }
}

fn run_loop(spinners: &mut [SpinnerView; 2]) -> Result<()> {
    let mut terminal = TerminalGuard::enter()?;
    let size = spinners[0].geometry().size;
    let mut pixmaps = [Pixmap::new(size, size), Pixmap::new(size, size)];
    let columns = [1u16, size as u16 + size as u16 / 4 + 1];

    loop {
        if event::poll(FRAME_POLL).context("polling terminal events")? {
            if let Event::Key(key) = event::read().context("reading terminal event")? {
                if should_quit(&key) {
                    break;
                }
            }
        }

        let now = Instant::now();
        for (index, spinner) in spinners.iter_mut().enumerate() {
            if spinner.tick(now) == Tick::Changed {
                let pixmap = &mut pixmaps[index];
                pixmap.clear();
                let mut canvas = RasterCanvas::new(pixmap);
                spinner.render(&mut canvas);
                present(&mut terminal.out, pixmap, columns[index], 1, Color::BLACK)?;
            }
        }
        terminal.out.flush().context("flushing terminal output")?;
    }
    Ok(())
}

fn should_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Raw-mode alternate screen, restored on drop so error paths cannot leave
/// the terminal unusable.
struct TerminalGuard {
    out: io::Stdout,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let mut out = io::stdout();
        enable_raw_mode().context("enabling raw mode")?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))
            .context("entering alternate screen")?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
