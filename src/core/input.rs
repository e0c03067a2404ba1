//! Per-tick input snapshot shared between the host input layer and the controller
//!
//! Directional flags are level-triggered: the host sets them while a key is
//! held. Jump and break are edge-triggered: the host fires them once and the
//! controller consumes them on its next tick.

/// A one-shot action flag, set by the host and cleared on first read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Trigger {
    pending: bool,
}

impl Trigger {
    /// Arm the trigger. Firing twice before a read still yields a single action.
    pub fn fire(&mut self) {
        self.pending = true;
    }

    /// Read and clear.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Check without consuming
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Movement, look and action flags for one tick
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Jump request (edge-triggered)
    pub jump: Trigger,
    /// Break-block request (edge-triggered)
    pub break_block: Trigger,
    /// Accumulated look delta (yaw, pitch) in raw device units since last tick
    look_delta: (f32, f32),
}

impl InputState {
    /// Create an idle input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a jump on the next tick
    pub fn request_jump(&mut self) {
        self.jump.fire();
    }

    /// Request a block break on the next tick
    pub fn request_break(&mut self) {
        self.break_block.fire();
    }

    /// Accumulate raw mouse motion (for when the cursor is grabbed)
    pub fn add_look_delta(&mut self, dx: f32, dy: f32) {
        self.look_delta.0 += dx;
        self.look_delta.1 += dy;
    }

    /// Consume the accumulated look delta
    pub fn take_look_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.look_delta)
    }

    /// Planar movement intent as (right, forward), each in {-1, 0, 1}.
    ///
    /// Opposing keys cancel out.
    pub fn movement_axes(&self) -> (f32, f32) {
        let axis = |pos: bool, neg: bool| pos as i8 as f32 - neg as i8 as f32;
        (
            axis(self.move_right, self.move_left),
            axis(self.move_forward, self.move_backward),
        )
    }

    /// True when any directional flag is held
    pub fn has_movement(&self) -> bool {
        self.move_forward || self.move_backward || self.move_left || self.move_right
    }
}
