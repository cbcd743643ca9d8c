use lane_detector::stages::draw_segment;
use lane_detector::{Frame, LineSegment};

pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;

pub const ASPHALT: [u8; 3] = [60, 60, 60];
pub const WHITE: [u8; 3] = [255, 255, 255];
pub const YELLOW: [u8; 3] = [255, 210, 0];

/// Left marking of the converging road: slope -1, bottom at x = 130.
pub const LEFT_MARKING: LineSegment = LineSegment::new(130.0, 480.0, 290.0, 320.0);
/// Right marking of the converging road: slope +1, bottom at x = 510.
pub const RIGHT_MARKING: LineSegment = LineSegment::new(510.0, 480.0, 350.0, 320.0);

/// Uniform frame of `rgb`.
pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Frame {
    let data = rgb.iter().copied().cycle().take(width * height * 3).collect();
    Frame::from_raw(width, height, 3, data).expect("valid buffer")
}

/// Asphalt frame with the given painted markings.
pub fn road(markings: &[(LineSegment, [u8; 3])], thickness: u32) -> Frame {
    let mut frame = filled(WIDTH, HEIGHT, ASPHALT);
    for (seg, color) in markings {
        draw_segment(&mut frame, seg, *color, thickness);
    }
    frame
}

/// Two-lane road: yellow left marking, white right marking.
pub fn two_lane_road() -> Frame {
    road(&[(LEFT_MARKING, YELLOW), (RIGHT_MARKING, WHITE)], 6)
}

/// Same road shifted horizontally by `dx` pixels.
pub fn shifted_road(dx: f64) -> Frame {
    let shift = |s: LineSegment| LineSegment::new(s.x1 + dx, s.y1, s.x2 + dx, s.y2);
    road(
        &[(shift(LEFT_MARKING), YELLOW), (shift(RIGHT_MARKING), WHITE)],
        6,
    )
}

/// Road with only the left marking painted.
pub fn left_only_road() -> Frame {
    road(&[(LEFT_MARKING, WHITE)], 6)
}

/// `true` where the overlay saturated the red channel.
pub fn is_overlay(frame: &Frame, x: usize, y: usize) -> bool {
    frame.pixel(x, y)[0] == 255 && frame.pixel(x, y)[1] < 230
}
