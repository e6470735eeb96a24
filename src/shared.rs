// Everything the layers agree on lives here: the tunables, the colour type and
// the input vocabulary the tui hands to the middle layer.
//
// Keys:
//   Esc           //  hold for 3 seconds to exit (a grown-up's key)
//   anything else //  a random tone plus a random fading shape
//
// The idea of the frame:
//   - tui collects key events while it waits for the next frame deadline
//   - middle turns them into audio commands and new shapes
//   - middle.tick() fades the shapes and advances the exit guard
//   - tui renders the display state: white background, shapes, the hint

pub const SAMPLE_RATE: u32 = 44100;
pub const FRAMES_PER_SECOND: u32 = 60;

// shapes
pub const MAX_SHAPES: usize = 50;
pub const FADE_PER_FRAME: f32 = 0.5;
pub const MIN_SHAPE_SIZE: i32 = 50;
pub const MAX_SHAPE_SIZE: i32 = 150;

// exit guard, both in frames (3 seconds at 60fps)
pub const EXIT_HOLD_FRAMES: u32 = 180;
pub const HINT_FRAMES: i32 = 180;
pub const EXIT_HINT: &str = "Hold ESC to exit";
pub const WINDOW_TITLE: &str = "Baby's Keyboard Fun!";

// one terminal cell covers this many logical pixels
pub const CELL_WIDTH_PX: u32 = 8;
pub const CELL_HEIGHT_PX: u32 = 16;

// key tracking when the terminal can't report releases
pub const HOLD_GRACE_FRAMES: u64 = 45;
pub const REPEAT_WINDOW_FRAMES: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BACKGROUND: Rgb = Rgb::new(255, 255, 255);
pub const HINT_COLOR: Rgb = Rgb::new(0, 0, 0);

// bright, baby-friendly colours
pub const PALETTE: [Rgb; 6] = [
    Rgb::new(255, 105, 180), // hot pink
    Rgb::new(0, 191, 255),   // deep sky blue
    Rgb::new(255, 255, 0),   // yellow
    Rgb::new(0, 255, 0),     // lime green
    Rgb::new(178, 102, 255), // medium purple
    Rgb::new(255, 165, 0),   // orange
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Exit,
    Trigger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    // held_over: the key was still physically down when this press arrived
    KeyDown { key: Key, held_over: bool },
    KeyUp(Key),
    Resize { cols: u16, rows: u16 },
}

/// Logical pixel size of a terminal of `cols` x `rows` cells.
pub fn screen_size_px(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32 * CELL_WIDTH_PX, rows as u32 * CELL_HEIGHT_PX)
}
