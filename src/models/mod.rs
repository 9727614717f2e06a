pub mod slot_state;

pub use slot_state::{SlotState, TransitionError};
