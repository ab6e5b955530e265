//! State/intent/reducer primitives.
//!
//! Store state only changes by reducing an intent:
//!
//! ```text
//! operation ──→ Intent ──→ Reducer ──→ State ──→ snapshot()
//! ```
//!
//! - **State**: cloneable, self-contained value
//! - **Intent**: something that happened (load started, page arrived, ...)
//! - **Reducer**: pure function `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
