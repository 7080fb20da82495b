use crate::app::view::{ControlLine, HudView, ObjectiveLine};

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
const TEXT_SCALE: i32 = 3;
const GLYPH_ADVANCE: i32 = (GLYPH_WIDTH + 1) * TEXT_SCALE;
const LINE_ADVANCE: i32 = (GLYPH_HEIGHT + 2) * TEXT_SCALE;
const HUD_PADDING: i32 = 6 * TEXT_SCALE;
const PANEL_INSET_X: i32 = 4 * TEXT_SCALE;
const PANEL_INSET_Y: i32 = 3 * TEXT_SCALE;
const TEXT_PRIMARY_COLOR: [u8; 4] = [244, 248, 252, 255];
const TEXT_DIM_COLOR: [u8; 4] = [176, 198, 220, 255];
const PANEL_BG_COLOR: [u8; 4] = [10, 12, 16, 210];
const PANEL_BORDER_COLOR: [u8; 4] = [92, 106, 126, 255];
const MISSION_TITLE: &str = "MISSION";
const CONTROLS_TITLE: &str = "CONTROLS";
const PRESSED_KEYS_PREFIX: &str = "KEYS:";
const OBJECTIVE_DONE_MARK: &str = "[X] ";
const OBJECTIVE_PENDING_MARK: &str = "[ ] ";

#[derive(Debug, Clone)]
struct PanelLine {
    text: String,
    color: [u8; 4],
}

/// Draws the three stage panels: pressed keys top-left, missions top-right,
/// controls bottom-left. Empty sections draw nothing.
pub(crate) fn draw_hud_panels(frame: &mut [u8], width: u32, height: u32, hud: &HudView) {
    if width == 0 || height == 0 {
        return;
    }

    if let Some(keys_line) = build_keys_line(&hud.pressed_keys) {
        let lines = [PanelLine {
            text: keys_line,
            color: TEXT_PRIMARY_COLOR,
        }];
        draw_panel(frame, width, height, HUD_PADDING, HUD_PADDING, &lines);
    }

    let mission_lines = build_mission_lines(&hud.objectives);
    if !mission_lines.is_empty() {
        let (panel_width, _) = panel_size(&mission_lines);
        let left = width as i32 - panel_width - HUD_PADDING;
        draw_panel(frame, width, height, left, HUD_PADDING, &mission_lines);
    }

    let control_lines = build_control_lines(&hud.controls);
    if !control_lines.is_empty() {
        let (_, panel_height) = panel_size(&control_lines);
        let top = height as i32 - panel_height - HUD_PADDING;
        draw_panel(frame, width, height, HUD_PADDING, top, &control_lines);
    }
}

/// Full-screen notice for a scene id the catalog does not define.
pub(crate) fn draw_missing_scene_notice(
    frame: &mut [u8],
    width: u32,
    height: u32,
    scene_id: &str,
) {
    if width == 0 || height == 0 {
        return;
    }
    let lines = [PanelLine {
        text: format!("SCENE NOT FOUND: {scene_id}"),
        color: TEXT_PRIMARY_COLOR,
    }];
    let (panel_width, panel_height) = panel_size(&lines);
    let left = (width as i32 - panel_width) / 2;
    let top = (height as i32 - panel_height) / 2;
    draw_panel(frame, width, height, left, top, &lines);
}

fn build_mission_lines(objectives: &[ObjectiveLine]) -> Vec<PanelLine> {
    if objectives.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![PanelLine {
        text: MISSION_TITLE.to_string(),
        color: TEXT_DIM_COLOR,
    }];
    for objective in objectives {
        let (mark, color) = if objective.complete {
            (OBJECTIVE_DONE_MARK, TEXT_DIM_COLOR)
        } else {
            (OBJECTIVE_PENDING_MARK, TEXT_PRIMARY_COLOR)
        };
        lines.push(PanelLine {
            text: format!("{mark}{}", objective.label),
            color,
        });
    }
    lines
}

fn build_control_lines(controls: &[ControlLine]) -> Vec<PanelLine> {
    if controls.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![PanelLine {
        text: CONTROLS_TITLE.to_string(),
        color: TEXT_DIM_COLOR,
    }];
    for control in controls {
        lines.push(PanelLine {
            text: format!("{} - {}", control.key, control.action),
            color: TEXT_PRIMARY_COLOR,
        });
    }
    lines
}

fn build_keys_line(pressed_keys: &[String]) -> Option<String> {
    if pressed_keys.is_empty() {
        return None;
    }
    Some(format!("{PRESSED_KEYS_PREFIX} {}", pressed_keys.join(" ")))
}

fn panel_size(lines: &[PanelLine]) -> (i32, i32) {
    let longest_line_chars = lines
        .iter()
        .map(|line| line.text.chars().count() as i32)
        .max()
        .unwrap_or(0);
    let width = longest_line_chars * GLYPH_ADVANCE + PANEL_INSET_X * 2;
    let height = lines.len() as i32 * LINE_ADVANCE + PANEL_INSET_Y * 2;
    (width, height)
}

fn draw_panel(frame: &mut [u8], width: u32, height: u32, left: i32, top: i32, lines: &[PanelLine]) {
    if lines.is_empty() {
        return;
    }
    let (panel_width, panel_height) = panel_size(lines);
    draw_filled_rect(
        frame,
        width,
        height,
        left,
        top,
        panel_width,
        panel_height,
        PANEL_BG_COLOR,
    );
    draw_rect_outline(
        frame,
        width,
        height,
        left,
        top,
        panel_width,
        panel_height,
        PANEL_BORDER_COLOR,
    );

    let mut y = top + PANEL_INSET_Y;
    for line in lines {
        draw_text_clipped(
            frame,
            width,
            height,
            left + PANEL_INSET_X,
            y,
            &line.text,
            line.color,
        );
        y += LINE_ADVANCE;
    }
}

fn draw_text_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    mut x: i32,
    y: i32,
    text: &str,
    color: [u8; 4],
) {
    for ch in text.chars() {
        let glyph = glyph_for(ch).unwrap_or(SPACE_GLYPH);
        draw_glyph_clipped(frame, width, height, x, y, glyph, color);
        x += GLYPH_ADVANCE;
    }
}

fn draw_glyph_clipped(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    glyph: Glyph,
    color: [u8; 4],
) {
    if width == 0 || height == 0 {
        return;
    }

    let height_i32 = height as i32;
    let width_i32 = width as i32;

    for (row_index, row_bits) in glyph.rows.iter().enumerate() {
        let glyph_y = y + row_index as i32 * TEXT_SCALE;

        for col in 0..GLYPH_WIDTH {
            if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                continue;
            }

            let glyph_x = x + col * TEXT_SCALE;
            for sy in 0..TEXT_SCALE {
                let pixel_y = glyph_y + sy;
                if pixel_y < 0 || pixel_y >= height_i32 {
                    continue;
                }
                for sx in 0..TEXT_SCALE {
                    let pixel_x = glyph_x + sx;
                    if pixel_x < 0 || pixel_x >= width_i32 {
                        continue;
                    }
                    write_pixel_rgba(
                        frame,
                        width as usize,
                        pixel_x as usize,
                        pixel_y as usize,
                        color,
                    );
                }
            }
        }
    }
}

fn write_pixel_rgba(frame: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 4]) {
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }

    frame[byte_offset..end].copy_from_slice(&color);
}

#[allow(clippy::too_many_arguments)]
fn draw_filled_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: [u8; 4],
) {
    let start_x = x.max(0);
    let start_y = y.max(0);
    let end_x = (x + rect_width).min(width as i32);
    let end_y = (y + rect_height).min(height as i32);
    if end_x <= start_x || end_y <= start_y {
        return;
    }

    let width_usize = width as usize;
    for py in start_y..end_y {
        for px in start_x..end_x {
            write_pixel_rgba(frame, width_usize, px as usize, py as usize, color);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_rect_outline(
    frame: &mut [u8],
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    rect_width: i32,
    rect_height: i32,
    color: [u8; 4],
) {
    if rect_width <= 1 || rect_height <= 1 {
        return;
    }
    draw_filled_rect(frame, width, height, x, y, rect_width, 1, color);
    draw_filled_rect(
        frame,
        width,
        height,
        x,
        y + rect_height - 1,
        rect_width,
        1,
        color,
    );
    draw_filled_rect(frame, width, height, x, y, 1, rect_height, color);
    draw_filled_rect(
        frame,
        width,
        height,
        x + rect_width - 1,
        y,
        1,
        rect_height,
        color,
    );
}

#[derive(Debug, Clone, Copy)]
struct Glyph {
    rows: [u8; GLYPH_HEIGHT as usize],
}

const SPACE_GLYPH: Glyph = Glyph {
    rows: [0, 0, 0, 0, 0],
};

/// Uppercase-only table; lowercase input is folded before lookup and
/// anything else renders as a blank cell.
fn glyph_for(ch: char) -> Option<Glyph> {
    let rows = match ch.to_ascii_uppercase() {
        ' ' => return Some(SPACE_GLYPH),
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b011, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        '<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        _ => return None,
    };
    Some(Glyph { rows })
}
