mod fsm;
mod segmenter;

pub use fsm::{SegmentEvent, SegmentState, SegmentStateMachine};
pub use segmenter::{Segmentation, Segmenter};
