// Player animation state machine

/// What the player is visibly doing; each state has its own sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground
    Walking,
    /// Anywhere off the ground, rising or falling
    Jumping,
    /// Swinging; overrides every other state until the swing ends
    Attacking,
}

impl AnimationState {
    pub const ALL: [AnimationState; 4] = [
        AnimationState::Idle,
        AnimationState::Walking,
        AnimationState::Jumping,
        AnimationState::Attacking,
    ];

    /// Dense index for per-state tables
    pub fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Walking => 1,
            Self::Jumping => 2,
            Self::Attacking => 3,
        }
    }

    /// Looping states wrap their frame index; the attack plays once
    pub fn is_looping(self) -> bool {
        !matches!(self, Self::Attacking)
    }

    /// Get the animation name for this state
    pub fn animation_name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walk",
            Self::Jumping => "jump",
            Self::Attacking => "attack",
        }
    }

    /// Pick the state for this frame.
    ///
    /// Priority is fixed: an attack in progress beats being airborne, which
    /// beats walking, which beats idling.
    pub fn decide(attacking: bool, on_ground: bool, velocity_x: f32) -> Self {
        if attacking {
            Self::Attacking
        } else if !on_ground {
            Self::Jumping
        } else if velocity_x != 0.0 {
            Self::Walking
        } else {
            Self::Idle
        }
    }
}

/// Current and previous state, compared to detect transitions
#[derive(Debug, Default)]
pub struct StateMachine {
    current_state: AnimationState,
    previous_state: AnimationState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> AnimationState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> AnimationState {
        self.previous_state
    }

    /// Whether the last `transition` changed the state
    pub fn state_just_changed(&self) -> bool {
        self.current_state != self.previous_state
    }

    /// Record this frame's state; the old one becomes the previous state
    pub fn transition(&mut self, new_state: AnimationState) {
        self.previous_state = self.current_state;
        self.current_state = new_state;

        if self.state_just_changed() {
            log::debug!(
                "Player state {} -> {}",
                self.previous_state.animation_name(),
                self.current_state.animation_name()
            );
        }
    }
}
