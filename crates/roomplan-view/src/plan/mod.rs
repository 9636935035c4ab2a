//! The 2D top-down plan projection.

mod interaction;
mod renderer;
mod viewport;

pub use interaction::PlanInteraction;
pub use renderer::{plan_footprint, PlanPrimitive, PlanRenderer, PixelRect};
pub use viewport::PlanViewport;
