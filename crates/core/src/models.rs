use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Hours,
    Programs,
    Curriculum,
    Location,
    Contact,
    Tour,
    Safety,
    Staff,
    DailyActivities,
    Meals,
    Enrollment,
    Pricing,
    DailySchedule,
    ToddlerProgram,
    PreschoolProgram,
    AfterSchool,
    Fallback,
}

impl Topic {
    /// Evaluation order of the rule table. The first topic whose keywords
    /// occur in the input wins; `Fallback` is never matched by keyword.
    pub const PRIORITY: [Topic; 16] = [
        Topic::Hours,
        Topic::Programs,
        Topic::Curriculum,
        Topic::Location,
        Topic::Contact,
        Topic::Tour,
        Topic::Safety,
        Topic::Staff,
        Topic::DailyActivities,
        Topic::Meals,
        Topic::Enrollment,
        Topic::Pricing,
        Topic::DailySchedule,
        Topic::ToddlerProgram,
        Topic::PreschoolProgram,
        Topic::AfterSchool,
    ];

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Programs => "programs",
            Self::Curriculum => "curriculum",
            Self::Location => "location",
            Self::Contact => "contact",
            Self::Tour => "tour",
            Self::Safety => "safety",
            Self::Staff => "staff",
            Self::DailyActivities => "daily_activities",
            Self::Meals => "meals",
            Self::Enrollment => "enrollment",
            Self::Pricing => "pricing",
            Self::DailySchedule => "daily_schedule",
            Self::ToddlerProgram => "toddler_program",
            Self::PreschoolProgram => "preschool_program",
            Self::AfterSchool => "after_school",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub label: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub topic: Topic,
    pub text: String,
    pub suggested_follow_ups: Vec<FollowUp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            text: text.into(),
            sender,
            created_at: Utc::now(),
            kind: MessageKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "rating")]
    pub aggregate_rating: f64,
    pub review_count: u32,
    #[serde(rename = "url")]
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "image_url")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: String,
    #[serde(rename = "url")]
    pub review_url: String,
    pub text: String,
    pub rating: u8,
    #[serde(rename = "time_created")]
    pub created_at: String,
    #[serde(rename = "user")]
    pub author: ReviewAuthor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewsPayload {
    pub business: BusinessSummary,
    pub reviews: Vec<ReviewRecord>,
}
