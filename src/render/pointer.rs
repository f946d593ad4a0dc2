use bevy::prelude::*;
use bevy::window::CursorMoved;

/// Last known pointer position in normalized device coordinates.
/// `None` until the pointer first moves over the window.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerNdc(pub Option<Vec2>);

/// Window pixel position (origin top-left, Y down) to NDC (Y up).
pub fn pointer_to_ndc(position: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (position.x / viewport.x) * 2.0 - 1.0,
        -(position.y / viewport.y) * 2.0 + 1.0,
    ))
}

pub fn track_pointer(
    mut moved: MessageReader<CursorMoved>,
    windows: Query<&Window>,
    mut pointer: ResMut<PointerNdc>,
) {
    // Only the latest movement matters
    let Some(event) = moved.read().last() else {
        return;
    };
    let Ok(window) = windows.get(event.window) else {
        return;
    };

    if let Some(ndc) = pointer_to_ndc(event.position, window.size()) {
        pointer.0 = Some(ndc);
    }
}
