use egui::{Context, Event, PointerButton, Pos2, Rect};

/// A pointer event in surface-local coordinates (origin at the canvas's top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed over the canvas
    PointerDown { position: Pos2, button: PointerButton },
    /// The pointer moved, anywhere in the window
    PointerMove { position: Pos2 },
    /// A button was released, anywhere in the window
    PointerUp { position: Pos2, button: PointerButton },
}

/// Converts a screen position into the canvas's local pixel space.
pub fn to_surface(pos: Pos2, canvas_rect: Rect) -> Pos2 {
    (pos - canvas_rect.min).to_pos2()
}

/// Handles converting raw egui input into surface-local `InputEvent`s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's pointer input against the canvas rectangle
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        ctx.input(|input| self.translate(&input.events, canvas_rect))
    }

    /// Translates raw events in arrival order, each at the position it carries,
    /// so every device move becomes its own `PointerMove`.
    ///
    /// Presses outside the canvas are dropped. Moves and releases are kept so a
    /// drag that leaves the canvas still ends.
    pub fn translate(&mut self, events: &[Event], canvas_rect: Rect) -> Vec<InputEvent> {
        let mut translated = Vec::new();

        for event in events {
            match *event {
                Event::PointerMoved(pos) => {
                    if self.last_pointer_pos != Some(pos) {
                        translated.push(InputEvent::PointerMove {
                            position: to_surface(pos, canvas_rect),
                        });
                    }
                    self.last_pointer_pos = Some(pos);
                }
                Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    ..
                } => {
                    self.last_pointer_pos = Some(pos);
                    if canvas_rect.contains(pos) {
                        translated.push(InputEvent::PointerDown {
                            position: to_surface(pos, canvas_rect),
                            button,
                        });
                    } else {
                        log::trace!("ignoring {button:?} press outside the canvas");
                    }
                }
                Event::PointerButton {
                    pos,
                    button,
                    pressed: false,
                    ..
                } => {
                    self.last_pointer_pos = Some(pos);
                    translated.push(InputEvent::PointerUp {
                        position: to_surface(pos, canvas_rect),
                        button,
                    });
                }
                _ => {}
            }
        }

        translated
    }
}
