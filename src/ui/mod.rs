mod indicator;
mod style;

pub use indicator::{
    CLEAR_LINE, FRAMES, IndicatorHandle, ProgressIndicator, ProgressState, TICK_INTERVAL,
};
pub use style::Style;
