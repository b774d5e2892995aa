mod lenient;
pub mod plan_types;
pub mod raw;
pub mod request;
pub mod response;
pub mod result;

pub use plan_types::{DatePlan, EmojiStory, ItineraryPlan, PlanDetails, TimelineEntry};
pub use raw::{RawModelResponse, ResponsePart};
pub use request::{Budget, ItineraryRequest, PlanRequest, PlanningStyle, PrepTime};
pub use response::{deserialize_structured_response, StructuredPayload};
pub use result::{ItineraryResult, PlanResult};
