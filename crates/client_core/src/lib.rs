//! Client-side core of the labeling review tool: field grouping, rendering,
//! the in-memory item store, the HTTP gateway and the controller that ties
//! them to a front-end.

pub mod controller;
pub mod error;
pub mod field_groups;
pub mod gateway;
pub mod item_store;
pub mod render;

pub use controller::{
    Action, ActionOutcome, AppState, LabelInputs, RangeRequest, ReviewController, ReviewView,
    ScreenRenderer,
};
pub use error::GatewayError;
pub use field_groups::{FieldGroup, FieldGroupRegistry};
pub use gateway::{HttpLabelingApi, LabelingApi};
pub use item_store::ItemStore;
pub use render::{render, FieldLine, RenderedGroup, Screen};
