//! UI primitives (Button, Card, Input, feedback states).

pub mod button;
pub mod card;
pub mod feedback;
pub mod input;

pub use button::*;
pub use card::*;
pub use feedback::*;
pub use input::*;
