// Viewport click -> backing pixel mapping for a CSS-scaled canvas
use crate::model::{Point, PointerClick, SurfaceSize};

/// Maps a click into the surface's backing pixel space. The canvas may be
/// stretched by CSS, so the offset inside its rectangle is multiplied by
/// backing/displayed on each axis. Returns `None` for a collapsed rectangle.
pub fn map_click(surface: SurfaceSize, click: &PointerClick) -> Option<Point> {
    let rect = click.rect;
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let scale_x = surface.width as f64 / rect.width;
    let scale_y = surface.height as f64 / rect.height;
    let x = (click.client_x - rect.left) * scale_x;
    let y = (click.client_y - rect.top) * scale_y;
    Some(Point::new(x, y))
}
