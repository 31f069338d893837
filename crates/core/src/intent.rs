use crate::models::{ChatReply, FollowUp, Topic};

pub const GREETING: &str = "Hi! I'm Aama Daycare's AI assistant. I can help answer questions about our programs, hours, curriculum, and more. How can I help you today?";

pub const FALLBACK_TEXT: &str = "That's a great question! While I have comprehensive information about our programs, hours, curriculum, and general operations, for specific details or to schedule a tour, I'd recommend calling us at (510) 778-3220 or emailing aamadaycare@gmail.com. Our staff would be happy to help!";

pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Maps free text to the first topic, in priority order, whose keywords occur
/// anywhere in the lower-cased input.
pub fn classify(text: &str) -> Topic {
    let lower = text.to_lowercase();

    Topic::PRIORITY
        .into_iter()
        .find(|topic| contains_any(&lower, keywords(*topic)))
        .unwrap_or(Topic::Fallback)
}

pub fn respond(text: &str) -> ChatReply {
    reply_for(classify(text))
}

pub fn reply_for(topic: Topic) -> ChatReply {
    let follow_ups = follow_ups(topic)
        .iter()
        .map(|(label, action)| FollowUp {
            label: label.to_string(),
            action: action.to_string(),
        })
        .collect();

    ChatReply {
        topic,
        text: response_text(topic).to_string(),
        suggested_follow_ups: follow_ups,
    }
}

pub fn keywords(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Hours => &["hour", "time", "open", "close", "when"],
        Topic::Programs => &["program", "age", "toddler", "preschool", "care"],
        Topic::Curriculum => &[
            "curriculum",
            "learn",
            "teach",
            "education",
            "what do you teach",
        ],
        Topic::Location => &["location", "address", "where", "directions", "san ramon"],
        Topic::Contact => &["contact", "phone", "email", "call", "reach"],
        Topic::Tour => &["tour", "visit", "see", "come", "look around"],
        Topic::Safety => &["safe", "security", "protect", "secure", "safety"],
        Topic::Staff => &["staff", "teacher", "miss", "caregiver", "who works"],
        Topic::DailyActivities => &[
            "daily",
            "schedule",
            "activity",
            "routine",
            "what do kids do",
        ],
        Topic::Meals => &["food", "meal", "eat", "snack", "lunch"],
        Topic::Enrollment => &["enroll", "register", "join", "start", "sign up"],
        Topic::Pricing => &["price", "cost", "fee", "rate", "how much"],
        Topic::DailySchedule => &["daily schedule", "show me daily schedule"],
        Topic::ToddlerProgram => &["toddler program", "tell me about toddlers"],
        Topic::PreschoolProgram => &["preschool program", "preschool details"],
        Topic::AfterSchool => &["after school care", "after school"],
        Topic::Fallback => &[],
    }
}

fn response_text(topic: Topic) -> &'static str {
    match topic {
        Topic::Hours => "Aama Daycare is open Monday through Friday from 7:30 AM to 6:00 PM. We're closed on weekends and major US holidays including New Year's Day, Memorial Day, Independence Day, Labor Day, Thanksgiving, and Christmas.",
        Topic::Programs => "We offer three main programs: Toddler Care (12 months - 3 years), Preschool Program (3-5 years), and After School Care (5-12 years). Each program is tailored to the developmental needs of that age group with age-appropriate activities and learning goals.",
        Topic::Curriculum => "We use the Mother Goose Time curriculum, a research-backed, play-based program designed to nurture growth and learning in toddlers and preschoolers. It focuses on letters, numbers, colors, shapes, social development, and creative expression through fun, hands-on activities.",
        Topic::Location => "We're located at 737 Birdwood Ct, San Ramon, CA 94582. We serve the San Ramon area and are easily accessible from major roads. Our facility is in a safe, residential neighborhood perfect for families.",
        Topic::Contact => "You can reach us at (510) 778-3220 or email us at aamadaycare@gmail.com. We're happy to answer any questions or schedule a tour of our facility. Our staff typically responds within a few hours during business days.",
        Topic::Tour => "We'd love to show you around! You can schedule a tour by calling us at (510) 778-3220 or by using the 'Book a Tour' button on our website. Tours typically last 30-45 minutes and give you a chance to see our facilities, meet our staff, and ask questions.",
        Topic::Safety => "Your child's safety is our top priority. We have secure facilities with controlled access, trained staff certified in CPR and first aid, and follow strict safety protocols. We maintain clean, secure environments and conduct regular safety drills.",
        Topic::Staff => "Our experienced team creates a nurturing environment where children thrive emotionally, socially, and intellectually. Miss Rasu and our staff are compassionate, certified professionals who genuinely love working with children. We maintain low staff-to-child ratios for personalized attention.",
        Topic::DailyActivities => "Our daily schedule includes structured learning, outdoor play, creative activities, meals, and rest time. We balance fun, learning, and rest so every child enjoys a happy and healthy day. Activities include circle time, arts & crafts, outdoor play, and educational games.",
        Topic::Meals => "We provide healthy, nutritious meals and snacks throughout the day. Our meal schedule includes breakfast, morning snack, lunch, and afternoon snack. We accommodate dietary restrictions and allergies, and all meals are prepared with fresh, wholesome ingredients.",
        Topic::Enrollment => "To enroll your child, please contact us to check availability and schedule a tour. We'll guide you through the enrollment process, including required forms, health records, and documentation. We recommend starting the process early as spots can fill up quickly.",
        Topic::Pricing => "Our pricing varies by program and schedule. For current rates and availability, please contact us directly at (510) 778-3220. We're happy to discuss our competitive pricing, any available discounts, and payment options that work for your family.",
        Topic::DailySchedule => "Our daily schedule runs from 7:30 AM to 6:00 PM and includes: 7:30 AM - Welcome & Free Play, 8:30 AM - Breakfast, 9:00 AM - Circle Time, 9:30 AM - Learning Activities, 10:30 AM - Morning Snack, 11:00 AM - Outdoor Play, 12:00 PM - Lunch, 1:00 PM - Nap Time, 2:30 PM - Quiet Activities, 3:00 PM - Afternoon Snack, 3:30 PM - Outdoor Adventures, 4:30 PM - Creative Play, 6:00 PM - Pick-up.",
        Topic::ToddlerProgram => "Our Toddler Care program (12 months - 3 years) focuses on gentle introduction to learning through play, social interaction, and creative activities. We provide potty training support, music and movement, sensory play, and story time. Our staff maintains a 1:4 staff-to-child ratio for personalized attention.",
        Topic::PreschoolProgram => "Our Preschool Program (3-5 years) is a comprehensive early learning program preparing children for kindergarten success. We focus on letter and number recognition, art and crafts, science exploration, and school readiness skills. Children develop social skills, independence, and a love for learning.",
        Topic::AfterSchool => "Our After School Care (5-12 years) provides a safe, supervised environment with homework help and recreational activities. We offer homework assistance, outdoor play, educational games, and healthy snacks. Perfect for working parents who need reliable after-school care.",
        Topic::Fallback => FALLBACK_TEXT,
    }
}

fn follow_ups(topic: Topic) -> &'static [(&'static str, &'static str)] {
    match topic {
        Topic::Hours => &[
            ("Show me daily schedule", "daily_schedule"),
            ("What about holidays?", "holidays"),
            ("Book a tour", "tour"),
        ],
        Topic::Programs => &[
            ("Tell me about toddlers", "toddler_program"),
            ("Preschool details", "preschool_program"),
            ("After school care", "after_school"),
        ],
        Topic::Curriculum => &[
            ("Show me daily activities", "daily_activities"),
            ("Learning approach", "learning_approach"),
            ("More about curriculum", "curriculum_details"),
        ],
        Topic::Location => &[
            ("Get directions", "directions"),
            ("Show on map", "show_map"),
            ("Service area", "service_area"),
        ],
        Topic::Contact => &[
            ("Call now", "call_now"),
            ("Send email", "send_email"),
            ("Schedule tour", "schedule_tour"),
        ],
        Topic::Tour => &[
            ("Book tour online", "book_tour_online"),
            ("What to expect", "tour_expectations"),
            ("Best time to visit", "best_time"),
        ],
        Topic::Safety => &[
            ("Safety protocols", "safety_protocols"),
            ("Staff training", "staff_training"),
            ("Emergency procedures", "emergency_procedures"),
        ],
        Topic::Staff => &[
            ("Staff qualifications", "staff_qualifications"),
            ("Staff to child ratio", "staff_ratio"),
            ("Meet the team", "meet_team"),
        ],
        Topic::DailyActivities => &[
            ("Show full schedule", "full_schedule"),
            ("Sample activities", "sample_activities"),
            ("Outdoor time", "outdoor_activities"),
        ],
        Topic::Meals => &[
            ("Meal schedule", "meal_schedule"),
            ("Dietary accommodations", "dietary_accommodations"),
            ("Sample menu", "sample_menu"),
        ],
        Topic::Enrollment => &[
            ("Check availability", "check_availability"),
            ("Required documents", "required_documents"),
            ("Enrollment process", "enrollment_process"),
        ],
        Topic::Pricing => &[
            ("Payment options", "payment_options"),
            ("Discounts available", "discounts"),
            ("Financial assistance", "financial_assistance"),
        ],
        Topic::Fallback => &[
            ("Call now", "call_now"),
            ("Book a tour", "book_tour"),
            ("More questions", "more_questions"),
        ],
        Topic::DailySchedule
        | Topic::ToddlerProgram
        | Topic::PreschoolProgram
        | Topic::AfterSchool => &[],
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
