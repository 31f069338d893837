use serde::{Deserialize, Serialize};

use crate::contact;

pub const BOOK_TOUR_TEXT: &str = "Great choice! You can book a tour by calling us at (510) 778-3220 or using the 'Book a Tour' button on our website. Tours typically last 30-45 minutes and give you a complete view of our facility.";

pub const UNRECOGNIZED_ACTION_TEXT: &str = "I'd be happy to help with that! Could you please rephrase your question or call us at (510) 778-3220 for immediate assistance.";

/// Quick-reply buttons, keyed by an exact action id. Independent of the
/// keyword table in `intent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickReplyAction {
    CallNow,
    SendEmail,
    BookTour,
    Directions,
    ShowMap,
    Other(String),
}

impl QuickReplyAction {
    pub fn parse(action_id: &str) -> Self {
        match action_id {
            "call_now" => Self::CallNow,
            "send_email" => Self::SendEmail,
            "book_tour" => Self::BookTour,
            "directions" => Self::Directions,
            "show_map" => Self::ShowMap,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_id(&self) -> &str {
        match self {
            Self::CallNow => "call_now",
            Self::SendEmail => "send_email",
            Self::BookTour => "book_tour",
            Self::Directions => "directions",
            Self::ShowMap => "show_map",
            Self::Other(id) => id.as_str(),
        }
    }

    pub fn outcome(&self) -> ActionOutcome {
        match self {
            Self::CallNow => navigate(NavigationKind::Telephone, contact::TELEPHONE_URI),
            Self::SendEmail => navigate(NavigationKind::Mail, contact::MAILTO_URI),
            Self::BookTour => ActionOutcome::Reply {
                text: BOOK_TOUR_TEXT.to_string(),
            },
            Self::Directions => navigate(NavigationKind::Map, contact::DIRECTIONS_URL),
            Self::ShowMap => navigate(NavigationKind::Map, contact::MAP_PLACE_URL),
            Self::Other(_) => ActionOutcome::Reply {
                text: UNRECOGNIZED_ACTION_TEXT.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    Telephone,
    Mail,
    Map,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub kind: NavigationKind,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Navigate { target: NavigationTarget },
    Reply { text: String },
}

pub fn dispatch(action_id: &str) -> ActionOutcome {
    QuickReplyAction::parse(action_id).outcome()
}

fn navigate(kind: NavigationKind, uri: &str) -> ActionOutcome {
    ActionOutcome::Navigate {
        target: NavigationTarget {
            kind,
            uri: uri.to_string(),
        },
    }
}
