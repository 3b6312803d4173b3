//! Static cake illustration, drawn once at startup.

use crate::surface::Surface;

const CANDLES: usize = 3;

pub fn draw_cake<S: Surface>(s: &S) {
    s.clear();

    // Body
    s.set_fill_style("#f8a5c2");
    s.set_stroke_style("#d46a7e");
    s.set_line_width(5.0);
    s.begin_path();
    s.move_to(50.0, 140.0);
    s.line_to(150.0, 140.0);
    s.line_to(140.0, 80.0);
    s.line_to(60.0, 80.0);
    s.close_path();
    s.fill();
    s.stroke();

    // Frosting
    s.set_fill_style("#fff0f6");
    s.begin_path();
    s.move_to(60.0, 80.0);
    s.bezier_curve_to(70.0, 30.0, 130.0, 30.0, 140.0, 80.0);
    s.close_path();
    s.fill();
    s.stroke();

    for i in 0..CANDLES {
        let dx = i as f64 * 20.0;
        s.set_fill_style("#fff");
        s.fill_rect(80.0 + dx, 20.0, 5.0, 20.0);
        s.stroke_rect(80.0 + dx, 20.0, 5.0, 20.0);

        // Flame
        s.begin_path();
        s.set_fill_style("#ffcb05");
        s.move_to(82.0 + dx, 20.0);
        s.quadratic_curve_to(85.0 + dx, 10.0, 88.0 + dx, 20.0);
        s.close_path();
        s.fill();
    }
}
