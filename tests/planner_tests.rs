use async_trait::async_trait;
use date_night_planner::{
    Budget, DatePlan, ErrorKind, GenerationCall, ItineraryRequest, PlanRequest, Planner,
    PlannerConfig, PlannerError, PlannerSession, PlanView, PrepTime, RawModelResponse, Result,
    TextGenerator, Validator,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

#[derive(Debug)]
enum Reply {
    Text(&'static str),
    Quota,
    Fail(String),
}

#[derive(Debug)]
struct StubGenerator {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, call: GenerationCall<'_>) -> Result<RawModelResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(call.prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(RawModelResponse::from(*text)),
            Reply::Quota => Err(PlannerError::from_upstream_message(
                "429 RESOURCE_EXHAUSTED: quota exceeded for gemini-1.5-pro",
            )),
            Reply::Fail(message) => Err(PlannerError::from_upstream_message(message.clone())),
        }
    }
}

fn request() -> PlanRequest {
    PlanRequest::new(
        "Cozy 🧸",
        "Creative 🎨",
        Budget::Level(2),
        PrepTime::Duration("30 minutes".to_string()),
    )
    .with_model("gemini-1.5-flash-latest")
    .with_constraints("no seafood")
}

fn config() -> PlannerConfig {
    PlannerConfig::new().with_api_key("test-key")
}

#[tokio::test]
async fn test_missing_credential_makes_no_call() {
    let planner = Planner::with_generator(
        &PlannerConfig::new().with_api_key(""),
        StubGenerator::new(Reply::Text("{}")),
    );

    let result = planner.generate_plan(&request()).await;

    assert_eq!(result.error().unwrap().kind, ErrorKind::MissingCredential);
    assert_eq!(planner.generator().calls(), 0);
}

#[tokio::test]
async fn test_absent_credential_makes_no_itinerary_call() {
    let planner = Planner::with_generator(&PlannerConfig::new(), StubGenerator::new(Reply::Text("{}")));

    let result = planner
        .generate_itinerary(&ItineraryRequest::new(DatePlan::default()))
        .await;

    assert_eq!(result.error().unwrap().kind, ErrorKind::MissingCredential);
    assert_eq!(planner.generator().calls(), 0);
}

#[tokio::test]
async fn test_quota_failure_becomes_quota_record() {
    let planner = Planner::with_generator(&config(), StubGenerator::new(Reply::Quota));

    let record = planner.generate_plan(&request()).await.error().cloned().unwrap();

    assert_eq!(record.kind, ErrorKind::QuotaExceeded);
    assert!(record.kind.is_upstream());
    assert!(record.message.contains("quota"));
    assert!(record.detail.unwrap().contains("RESOURCE_EXHAUSTED"));
    assert_eq!(planner.generator().calls(), 1);
}

#[tokio::test]
async fn test_generator_failure_becomes_upstream_record() {
    let planner = Planner::with_generator(
        &config(),
        StubGenerator::new(Reply::Fail("HTTP 503 Service Unavailable error: backend overloaded".to_string())),
    );

    let record = planner.generate_plan(&request()).await.error().cloned().unwrap();

    assert_eq!(record.kind, ErrorKind::UpstreamFailure);
    assert!(record.retryable);
    assert_eq!(
        record.message,
        "An error occurred while generating: HTTP 503 Service Unavailable error: backend overloaded"
    );
}

#[tokio::test]
async fn test_long_upstream_message_is_truncated_in_itinerary_record() {
    let long = format!("connection reset: {}", "z".repeat(1000));
    let planner = Planner::with_generator(&config(), StubGenerator::new(Reply::Fail(long)));

    let record = planner
        .generate_itinerary(&ItineraryRequest::new(DatePlan::default()))
        .await
        .error()
        .cloned()
        .unwrap();

    assert_eq!(record.kind, ErrorKind::UpstreamFailure);
    let detail = record
        .message
        .strip_prefix("An error occurred while generating: ")
        .unwrap();
    assert!(detail.starts_with("connection reset: zzz"));
    assert!(detail.ends_with("..."));
    assert_eq!(detail.chars().count(), 300 + 3);
}

#[tokio::test]
async fn test_mistyped_plan_still_seeds_itinerary() {
    let planner = Planner::with_generator(
        &config(),
        StubGenerator::new(Reply::Text(
            "{\"title\":\"Rooftop Tapas\",\"duration_hours\":\"about 3\",\"tips_and_considerations\":[\"Book a table\"]}",
        )),
    );

    let session = PlannerSession::new().with_plan(planner.generate_plan(&request()).await);
    let plan = session.itinerary_seed().unwrap();

    assert_eq!(plan.title.as_deref(), Some("Rooftop Tapas"));
    assert_eq!(plan.duration_hours, None);
    assert_eq!(plan.tips_and_considerations, vec!["Book a table"]);
}

#[tokio::test]
async fn test_plan_then_itinerary_flow() {
    let plan_planner = Planner::with_generator(
        &config(),
        StubGenerator::new(Reply::Text(
            "```json\n{\"title\":\"Paint & Sip\",\"model_used\":\"gemini-1.5-flash-latest\",\"tips_and_considerations\":[\"Cover the table\"]}\n```",
        )),
    );

    let session = PlannerSession::new().with_plan(plan_planner.generate_plan(&request()).await);
    assert!(matches!(session.plan_view(), PlanView::Plan(_)));

    let prompt = plan_planner.generator().prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Cozy 🧸"));
    assert!(prompt.contains("no seafood"));

    let plan = session.itinerary_seed().unwrap();
    let itinerary_request = ItineraryRequest::new(plan).with_location("Lisbon");
    assert_eq!(itinerary_request.model(), "gemini-1.5-flash-latest");

    let itinerary_planner = Planner::with_generator(
        &config(),
        StubGenerator::new(Reply::Text(
            "{\"title\":\"Paint & Sip in Lisbon\",\"timeline\":[{\"time\":\"6:00 PM\",\"activity\":\"Set up\"}]}",
        )),
    );
    let session = session.with_itinerary(
        itinerary_planner
            .generate_itinerary(&itinerary_request)
            .await,
    );

    let itinerary = session.itinerary().unwrap().itinerary().unwrap();
    assert_eq!(itinerary.title.as_deref(), Some("Paint & Sip in Lisbon"));
    let prompt = itinerary_planner.generator().prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Paint & Sip"));
    assert!(prompt.contains("Lisbon"));
}

#[tokio::test]
async fn test_strict_validator_rejects_incomplete_plan() {
    let planner = Planner::with_generator(
        &config(),
        StubGenerator::new(Reply::Text("{\"title\":\"Only a title\"}")),
    )
    .with_validator(Validator::Strict);

    let record = planner.generate_plan(&request()).await.error().cloned().unwrap();
    assert_eq!(record.kind, ErrorKind::MalformedJson);
    assert_eq!(planner.generator().calls(), 1);
}
